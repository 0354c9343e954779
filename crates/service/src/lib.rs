//! Storage layer for logo records.
//! - `logos` holds the `LogoStore` contract, the bundled backends, and the
//!   startup factory that picks one from configuration.
//! - `storage` holds the reusable JSON file-backed map the `json` backend
//!   persists through.
//! - `page_token` is the opaque cursor codec shared by the backends.

pub mod errors;
pub mod logos;
pub mod page_token;
pub mod runtime;
pub mod storage;
