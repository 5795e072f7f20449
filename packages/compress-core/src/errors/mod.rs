pub mod types;

pub use types::CompressError;
