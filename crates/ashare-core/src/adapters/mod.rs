//! Concrete [`crate::DataSource`] implementations.

pub mod abu;
pub mod ashare;

pub use abu::AbuAdapter;
pub use ashare::AshareAdapter;
