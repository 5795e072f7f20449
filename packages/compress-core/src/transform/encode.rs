use crate::errors::CompressError;
use crate::options::OutputFormat;
use crate::transform::raster::RasterImage;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};
use std::borrow::Cow;
use std::io::Cursor;

/// AVIF エンコード速度（固定値にして出力を決定的にする）
const AVIF_SPEED: u8 = 4;

/// 品質（0.0 < q <= 1.0）をエンコーダの 1-100 に変換する
pub fn quality_to_u8(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// 画像をエンコードする
///
/// 同じ画像・フォーマット・品質なら同じバイト列を返す
pub fn encode_image(
    raster: &RasterImage,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, CompressError> {
    let mut buf = Cursor::new(Vec::new());
    let quality = quality_to_u8(quality);
    let img = normalized(raster);

    match format {
        OutputFormat::Jpeg => {
            // JPEG はアルファ非対応のため RGB8 に落とす
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("JPEG encode failed: {e}")))?;
        }
        OutputFormat::Png => {
            img.write_to(&mut buf, ImageFormat::Png)
                .map_err(|e| CompressError::Encode(format!("PNG encode failed: {e}")))?;
        }
        OutputFormat::WebP => {
            // image クレートの WebP エンコーダはロスレスのみ対応（quality は無視）
            let encoder = WebPEncoder::new_lossless(&mut buf);
            img.write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("WebP encode failed: {e}")))?;
        }
        OutputFormat::Avif => {
            let encoder = AvifEncoder::new_with_speed_quality(&mut buf, AVIF_SPEED, quality);
            img.write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("AVIF encode failed: {e}")))?;
        }
    }

    Ok(buf.into_inner())
}

/// 8bit の RGB / RGBA 以外（16bit PNG、グレースケール等）を変換する
fn normalized(raster: &RasterImage) -> Cow<'_, DynamicImage> {
    match raster.as_image() {
        img @ (DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => Cow::Borrowed(img),
        img if raster.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8())),
        img => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
    }
}
