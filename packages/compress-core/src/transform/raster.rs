use image::DynamicImage;

/// デコード済みの画像（1 回の圧縮呼び出しの間だけ保持する）
#[derive(Debug, Clone)]
pub struct RasterImage {
    image: DynamicImage,
}

impl RasterImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// アルファチャンネルを持つか
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}
