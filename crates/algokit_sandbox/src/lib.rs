//! Integration harness for the hello world approval program on a LocalNet sandbox.
//!
//! Accounts come from the sandbox's KMD, programs are compiled and deployed through algod, and
//! the resulting global state is decoded into readable values for assertions.

pub mod accounts;
pub mod config;
pub mod error;
pub mod fixture;
pub mod programs;
pub mod state;
pub mod transactions;

pub use accounts::{KmdAccountProvider, SigningAccount};
pub use config::{ClientConfig, SandboxConfig, TokenHeader};
pub use error::SandboxError;
pub use fixture::{HelloWorldFixture, current_year};
pub use programs::{ProgramCompiler, load_program};
pub use state::{ReadableGlobalState, StateValue, readable_global_state};
pub use transactions::{AppCreateResult, PreparedTransaction, TransactionSender};
