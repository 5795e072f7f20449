pub mod artifact;
pub mod codec;
pub mod constants;
pub mod convergence;
pub mod errors;
pub mod options;
pub mod pipeline;
pub mod stats;
pub mod transform;
pub mod validation;

// 公開API
pub use artifact::Artifact;
pub use codec::{ImageCodec, NativeCodec};
pub use constants::{
    DEFAULT_MAX_SIZE_KB, DEFAULT_QUALITY, MAX_ATTEMPTS, MAX_INPUT_BYTES, QUALITY_FLOOR,
};
pub use convergence::{ConvergenceController, ConvergenceOutcome, ConvergenceState};
pub use errors::CompressError;
pub use options::{CompressionOptions, OutputFormat, ResampleFilter};
pub use pipeline::{compress, compress_with, Compressor};
pub use stats::{compression_ratio, CompressionResult, DimensionPair, Dimensions};
pub use transform::{decode_image, encode_image, plan_dimensions, resize_image, RasterImage};
pub use validation::{validate_artifact, validate_options, ACCEPTED_MIME_TYPES};
