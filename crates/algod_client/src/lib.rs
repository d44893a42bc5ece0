pub mod apis;
pub mod models;

// Re-export the main client for convenience
pub use apis::{AlgodClient, Error as AlgodError};
