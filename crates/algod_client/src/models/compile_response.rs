use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompileResponse {
    /// Base32 SHA512_256 of the program bytes (the logic signature address).
    pub hash: String,
    /// Base64 encoded program bytes.
    pub result: String,
}
