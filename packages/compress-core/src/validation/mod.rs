pub mod artifact;
pub mod params;

pub use artifact::{validate_artifact, ACCEPTED_MIME_TYPES};
pub use params::validate_options;
