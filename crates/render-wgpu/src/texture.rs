use std::path::Path;

/// Errors from loading a texture image.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded RGBA8 pixels, rows ordered bottom to top.
///
/// Rows are flipped on load so that UV `(0, 0)` samples the bottom-left of
/// the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Load and decode an image file (PNG or JPEG).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)?;
        tracing::debug!(
            "decoded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(image))
    }

    pub fn from_image(image: image::DynamicImage) -> Self {
        let rgba = image.flipv().into_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        }
    }

    /// Two-tone checkerboard of `size`x`size` pixels in 8-pixel cells.
    pub fn checkerboard(size: u32) -> Self {
        let size = size.max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let light = ((x / 8) + (y / 8)) % 2 == 0;
                let v = if light { 200 } else { 60 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Load `path`, falling back to a checkerboard if it is unset or unreadable.
    pub fn load_or_checkerboard(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::checkerboard(64);
        };
        match Self::load(path) {
            Ok(image) => image,
            Err(e) => {
                tracing::error!("failed to load texture {}: {e}", path.display());
                Self::checkerboard(64)
            }
        }
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn rows_are_flipped() {
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));

        let tex = TextureImage::from_image(image::DynamicImage::ImageRgba8(img));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 2);
        assert_eq!(&tex.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&tex.pixels[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.png");
        RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let tex = TextureImage::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (4, 3));
        assert_eq!(tex.pixels.len(), 4 * 3 * 4);
        assert_eq!(tex.bytes_per_row(), 16);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextureImage::load(dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, TextureError::Io(_)));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = TextureImage::load(&path).unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
    }

    #[test]
    fn fallback_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.png");
        let tex = TextureImage::load_or_checkerboard(Some(&missing));
        assert_eq!(tex, TextureImage::checkerboard(64));
        assert_eq!(TextureImage::load_or_checkerboard(None), tex);
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureImage::checkerboard(16);
        assert_eq!(tex.pixels.len(), 16 * 16 * 4);
        assert_eq!(tex.pixels[0], 200);
        let second_cell = (8 * 4) as usize;
        assert_eq!(tex.pixels[second_cell], 60);
    }
}
