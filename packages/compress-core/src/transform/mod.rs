pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod orientation;
pub mod raster;
pub mod resize;

pub use decode::{decode_image, probe_dimensions};
pub use dimensions::plan_dimensions;
pub use encode::{encode_image, quality_to_u8};
pub use orientation::{apply_orientation, read_orientation, Orientation};
pub use raster::RasterImage;
pub use resize::resize_image;
