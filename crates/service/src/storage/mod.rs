//! Reusable persistence helpers for the file-backed backend.

pub mod json_file_store;
