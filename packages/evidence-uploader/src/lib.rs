pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod payload;

pub use batch::{compress_batch, compress_one, load_artifact, MAX_BATCH_FILES};
pub use client::ComplianceClient;
pub use config::{options_from_env, ApiConfig};
pub use error::{ConfigError, UploadError};
pub use payload::{EncodedPayload, MAX_ENCODED_PAYLOAD_BYTES};
