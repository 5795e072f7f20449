use std::borrow::Cow;

use crate::errors::CompressError;
use crate::options::{OutputFormat, ResampleFilter};
use crate::transform::{
    decode_image, encode_image, probe_dimensions, resize_image, RasterImage,
};

/// デコード・リサイズ・エンコードを行うバックエンド
///
/// 呼び出しごとに独立しており、実装は呼び出し間で状態を持たないこと
pub trait ImageCodec {
    /// ピクセルデータをデコードせずに寸法を取得する
    fn probe(&self, data: &[u8]) -> Result<(u32, u32), CompressError>;

    fn decode(&self, data: &[u8]) -> Result<RasterImage, CompressError>;

    fn resize(
        &self,
        raster: &RasterImage,
        target_w: u32,
        target_h: u32,
    ) -> Result<RasterImage, CompressError>;

    /// `target_w` x `target_h` にリサンプリングした上で `format` にエンコードする
    fn encode(
        &self,
        raster: &RasterImage,
        target_w: u32,
        target_h: u32,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, CompressError>;
}

/// image + fast_image_resize によるネイティブ実装
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec {
    filter: ResampleFilter,
}

impl NativeCodec {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }
}

impl ImageCodec for NativeCodec {
    fn probe(&self, data: &[u8]) -> Result<(u32, u32), CompressError> {
        probe_dimensions(data)
    }

    fn decode(&self, data: &[u8]) -> Result<RasterImage, CompressError> {
        decode_image(data)
    }

    fn resize(
        &self,
        raster: &RasterImage,
        target_w: u32,
        target_h: u32,
    ) -> Result<RasterImage, CompressError> {
        resize_image(raster, target_w, target_h, self.filter)
    }

    fn encode(
        &self,
        raster: &RasterImage,
        target_w: u32,
        target_h: u32,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, CompressError> {
        // リサイズ済みの画像が渡された場合は再サンプリングしない
        let sized = if raster.dimensions() == (target_w, target_h) {
            Cow::Borrowed(raster)
        } else {
            Cow::Owned(self.resize(raster, target_w, target_h)?)
        };
        encode_image(&sized, format, quality)
    }
}
