pub mod errors;
pub mod logos;
pub mod routes;
pub mod session;
pub mod startup;
pub mod uploads;
pub mod views;

pub use startup::run;
