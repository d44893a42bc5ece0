#![allow(dead_code)]
pub mod logging;

use std::sync::Arc;

use algokit_sandbox::{HelloWorldFixture, SandboxConfig, SandboxError};
use rstest::*;

use logging::init_test_logging;

pub type HelloWorldFixtureResult = Result<Arc<HelloWorldFixture>, SandboxError>;

#[fixture]
pub async fn hello_world_fixture() -> HelloWorldFixtureResult {
    init_test_logging();
    let config = SandboxConfig::from_environment_or_localnet()?;
    Ok(Arc::new(HelloWorldFixture::setup(&config).await?))
}
