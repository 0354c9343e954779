//! Entity definitions shared by the storage and HTTP layers.

pub mod errors;
pub mod logo;
pub mod user;
