use std::fs;
use std::path::Path;
use std::sync::Arc;

use algod_client::{AlgodClient, AlgodError};
use base64::{Engine, prelude::BASE64_STANDARD};
use log::debug;
use snafu::ResultExt;

use crate::error::{ProgramFileSnafu, Result};

/// Reads TEAL source from disk.
pub fn load_program(path: &Path) -> Result<String> {
    fs::read_to_string(path).context(ProgramFileSnafu { path })
}

/// Turns TEAL source into bytecode through algod's compile endpoint.
pub struct ProgramCompiler {
    algod: Arc<AlgodClient>,
}

impl ProgramCompiler {
    pub fn new(algod: Arc<AlgodClient>) -> Self {
        ProgramCompiler { algod }
    }

    pub async fn compile(&self, source: &str) -> Result<Vec<u8>> {
        let response = self.algod.teal_compile(source.as_bytes()).await?;
        debug!("Compiled program with hash {}", response.hash);

        BASE64_STANDARD
            .decode(&response.result)
            .map_err(|e| {
                AlgodError::Serde {
                    message: format!("compiled program is not valid base64: {}", e),
                }
                .into()
            })
    }

    pub async fn compile_file(&self, path: &Path) -> Result<Vec<u8>> {
        let source = load_program(path)?;
        self.compile(&source).await
    }
}
