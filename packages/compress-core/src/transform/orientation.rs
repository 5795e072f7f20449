use image::DynamicImage;

/// EXIF Orientation タグの値
///
/// ブラウザの `<img>` と同様、デコード時に正立方向へ補正するためだけに使う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Orientation {
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    Transpose = 5,
    Rotate90 = 6,
    Transverse = 7,
    Rotate270 = 8,
}

impl Orientation {
    /// EXIF の値から Orientation を作成
    pub fn from_exif_value(value: u32) -> Option<Self> {
        Some(match value {
            1 => Self::Normal,
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => return None,
        })
    }

    /// 補正後に幅と高さが入れ替わるか
    pub fn swaps_dimensions(&self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }
}

/// 画像を正立方向に補正する
pub fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90 => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270 => img.rotate270(),
    }
}

/// バイト列から EXIF Orientation を読み取る（EXIF がなければ None）
pub fn read_orientation(data: &[u8]) -> Option<Orientation> {
    let mut cursor = std::io::Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;

    let value = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)?;

    Orientation::from_exif_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_exif_value() {
        assert_eq!(Orientation::from_exif_value(1), Some(Orientation::Normal));
        assert_eq!(Orientation::from_exif_value(6), Some(Orientation::Rotate90));
        assert_eq!(Orientation::from_exif_value(0), None);
        assert_eq!(Orientation::from_exif_value(9), None);
    }

    #[test]
    fn test_swaps_dimensions() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(Orientation::Rotate90.swaps_dimensions());
        assert!(Orientation::Transverse.swaps_dimensions());
    }

    #[test]
    fn test_apply_orientation_matches_swaps_dimensions() {
        for value in 1..=8 {
            let orientation = Orientation::from_exif_value(value).unwrap();
            let result = apply_orientation(DynamicImage::new_rgb8(10, 20), orientation);
            let expected = if orientation.swaps_dimensions() { (20, 10) } else { (10, 20) };
            assert_eq!((result.width(), result.height()), expected, "{orientation:?}");
        }
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(b"no exif here"), None);
    }
}
