use image::ImageReader;
use std::io::Cursor;

use crate::constants::MAX_PIXELS;
use crate::errors::CompressError;
use crate::transform::orientation::{apply_orientation, read_orientation, Orientation};
use crate::transform::raster::RasterImage;

/// 画像バイト列をデコードする
///
/// フォーマットはバイト列から推測する（申告された MIME タイプは信用しない）。
/// EXIF Orientation は正立方向に補正済みの状態で返す
pub fn decode_image(data: &[u8]) -> Result<RasterImage, CompressError> {
    // 全体をデコードする前にヘッダだけで解像度を確認し、メモリ枯渇を防ぐ
    let (width, height) = header_dimensions(data)?;
    validate_source_dimensions(width, height)?;

    let img = reader(data)?
        .decode()
        .map_err(|e| CompressError::Decode(format!("decode failed: {e}")))?;

    let orientation = read_orientation(data).unwrap_or(Orientation::Normal);
    let img = apply_orientation(img, orientation);

    tracing::debug!(
        width = img.width(),
        height = img.height(),
        ?orientation,
        "decoded image"
    );

    Ok(RasterImage::new(img))
}

/// ピクセルデータをデコードせずに寸法だけを取得する
///
/// EXIF Orientation による縦横の入れ替えも反映する
pub fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), CompressError> {
    let (width, height) = header_dimensions(data)?;

    match read_orientation(data) {
        Some(orientation) if orientation.swaps_dimensions() => Ok((height, width)),
        _ => Ok((width, height)),
    }
}

fn reader(data: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, CompressError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CompressError::Decode(format!("failed to guess format: {e}")))
}

fn header_dimensions(data: &[u8]) -> Result<(u32, u32), CompressError> {
    let reader = reader(data)?;
    if reader.format().is_none() {
        return Err(CompressError::Decode("unrecognized image format".to_string()));
    }
    reader
        .into_dimensions()
        .map_err(|e| CompressError::Decode(format!("failed to read dimensions: {e}")))
}

/// ソース画像の総ピクセル数を検証する
fn validate_source_dimensions(width: u32, height: u32) -> Result<(), CompressError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(CompressError::ResolutionTooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};

    fn encoded(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    /// SOI の直後に Orientation タグだけを持つ EXIF (APP1) を差し込む
    fn with_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"MM\0*");
        tiff.extend_from_slice(&8u32.to_be_bytes()); // IFD0 のオフセット
        tiff.extend_from_slice(&1u16.to_be_bytes()); // エントリ数
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes()); // 次の IFD なし

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff);

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_exif_orientation_swaps_dimensions() {
        let jpeg = encoded(&DynamicImage::new_rgb8(400, 200), ImageFormat::Jpeg);
        let data = with_orientation(&jpeg, 6);

        assert_eq!(read_orientation(&data), Some(Orientation::Rotate90));
        assert_eq!(probe_dimensions(&data).unwrap(), (200, 400));
        assert_eq!(decode_image(&data).unwrap().dimensions(), (200, 400));
    }

    #[test]
    fn test_exif_orientation_without_rotation() {
        let jpeg = encoded(&DynamicImage::new_rgb8(400, 200), ImageFormat::Jpeg);
        let data = with_orientation(&jpeg, 3);

        assert_eq!(read_orientation(&data), Some(Orientation::Rotate180));
        assert_eq!(probe_dimensions(&data).unwrap(), (400, 200));
        assert_eq!(decode_image(&data).unwrap().dimensions(), (400, 200));
    }

    #[test]
    fn test_decode_webp() {
        let data = encoded(&DynamicImage::new_rgb8(24, 12), ImageFormat::WebP);
        assert_eq!(decode_image(&data).unwrap().dimensions(), (24, 12));
        assert_eq!(probe_dimensions(&data).unwrap(), (24, 12));
    }

    #[test]
    fn test_decode_png() {
        let data = encoded(&DynamicImage::new_rgb8(32, 16), ImageFormat::Png);
        let raster = decode_image(&data).unwrap();
        assert_eq!(raster.dimensions(), (32, 16));
    }

    #[test]
    fn test_decode_gif() {
        let data = encoded(&DynamicImage::new_rgba8(7, 9), ImageFormat::Gif);
        let raster = decode_image(&data).unwrap();
        assert_eq!(raster.dimensions(), (7, 9));
    }

    #[test]
    fn test_decode_corrupt_data() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(CompressError::Decode(_))));

        // ヘッダは正しいが本体が壊れている
        let mut data = encoded(&DynamicImage::new_rgb8(64, 64), ImageFormat::Png);
        data.truncate(40);
        assert!(matches!(decode_image(&data), Err(CompressError::Decode(_))));
    }

    #[test]
    fn test_probe_dimensions() {
        let data = encoded(&DynamicImage::new_rgb8(800, 600), ImageFormat::Jpeg);
        assert_eq!(probe_dimensions(&data).unwrap(), (800, 600));
    }

    #[test]
    fn test_validate_source_dimensions() {
        assert!(validate_source_dimensions(10_000, 10_000).is_ok());
        assert!(matches!(
            validate_source_dimensions(100_000, 100_000),
            Err(CompressError::ResolutionTooLarge { width: 100_000, height: 100_000 })
        ));
    }
}
