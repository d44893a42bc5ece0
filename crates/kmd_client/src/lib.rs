pub mod apis;
pub mod models;

// Re-export the main client for convenience
pub use apis::Error as KmdError;
pub use apis::client::KmdClient;
