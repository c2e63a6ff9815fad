//! Decoded images ready for upload.
//!
//! [`Image`] always stores 8 bits per channel with 1 to 4 channels, rows ordered
//! bottom to top the way OpenGL expects them.

use std::path::Path;

use glam::Vec4;
use image::{DynamicImage, GenericImageView};

use crate::error::ResourceError;

/// CPU side pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channel_count: u8,
    data: Vec<u8>,
}

impl Image {
    /// Loads and decodes an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| {
            log::error!("failed to load image: \"{}\"", path.display());
            ResourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| {
            log::error!("failed to decode image: \"{}\"", path.display());
            ResourceError::Decode {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let image = Self::from_dynamic(decoded.flipv());
        log::info!(
            "image: \"{}\" ({}x{}, {} channels)",
            path.display(),
            image.width,
            image.height,
            image.channel_count
        );
        Ok(image)
    }

    /// Converts a decoded image to 8 bits per channel, keeping its channel count.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let (channel_count, data) = match image.color().channel_count() {
            1 => (1, image.into_luma8().into_raw()),
            2 => (2, image.into_luma_alpha8().into_raw()),
            3 => (3, image.into_rgb8().into_raw()),
            _ => (4, image.into_rgba8().into_raw()),
        };
        Self {
            width,
            height,
            channel_count,
            data,
        }
    }

    /// Zero filled image. Returns `None` if the channel count is outside `1..=4`.
    pub fn new(width: u32, height: u32, channel_count: u8) -> Option<Self> {
        if !(1..=4).contains(&channel_count) {
            return None;
        }
        Some(Self::zeroed(width, height, channel_count))
    }

    fn zeroed(width: u32, height: u32, channel_count: u8) -> Self {
        let len = width as usize * height as usize * channel_count as usize;
        Self {
            width,
            height,
            channel_count,
            data: vec![0; len],
        }
    }

    /// Wraps raw pixel bytes. Returns `None` if the length does not match the
    /// dimensions or the channel count is outside `1..=4`.
    pub fn from_raw(width: u32, height: u32, channel_count: u8, data: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * channel_count as usize;
        if !(1..=4).contains(&channel_count) || data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            channel_count,
            data,
        })
    }

    /// Solid RGBA image, `color` components in `[0, 1]`.
    pub fn single_color(width: u32, height: u32, color: Vec4) -> Self {
        let texel = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0)
            .round()
            .to_array()
            .map(|c| c as u8);
        let mut image = Self::zeroed(width, height, 4);
        for pixel in image.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&texel);
        }
        image
    }

    /// Black and white RGBA checkerboard with `grid` by `grid` pixel cells.
    pub fn checker(width: u32, height: u32, grid: u32) -> Self {
        let grid = grid.max(1);
        let mut image = Self::zeroed(width, height, 4);
        for (i, pixel) in image.data.chunks_exact_mut(4).enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;
            let value = if (x / grid + y / grid) % 2 == 0 { 255 } else { 0 };
            pixel.copy_from_slice(&[value, value, value, 255]);
        }
        image
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("glscaffold-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_channel_count_preserved() {
        let gray = Image::from_dynamic(DynamicImage::new_luma8(2, 2));
        assert_eq!(gray.channel_count(), 1);
        assert_eq!(gray.data().len(), 4);

        let rgb = Image::from_dynamic(DynamicImage::new_rgb8(4, 4));
        assert_eq!(rgb.channel_count(), 3);
        assert_eq!(rgb.data().len(), 48);
    }

    #[test]
    fn test_sixteen_bit_is_narrowed() {
        let wide: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(3, 1, Rgb([65535, 0, 65535]));
        let image = Image::from_dynamic(DynamicImage::ImageRgb16(wide));
        assert_eq!(image.channel_count(), 3);
        assert_eq!(&image.data()[..3], &[255, 0, 255]);
    }

    #[test]
    fn test_load_flips_rows() {
        let path = temp_path("flip.png");
        let mut source = RgbImage::new(1, 2);
        source.put_pixel(0, 0, Rgb([255, 0, 0]));
        source.put_pixel(0, 1, Rgb([0, 0, 255]));
        source.save(&path).unwrap();

        let image = Image::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(image.data(), &[0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Image::load(temp_path("missing.png"));
        assert!(matches!(result, Err(ResourceError::Io { .. })));
    }

    #[test]
    fn test_load_garbage() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let result = Image::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ResourceError::Decode { .. })));
    }

    #[test]
    fn test_new_rejects_bad_channel_count() {
        assert!(Image::new(4, 4, 0).is_none());
        assert!(Image::new(4, 4, 5).is_none());

        let image = Image::new(4, 4, 4).unwrap();
        assert_eq!(image.data().len(), 64);
    }

    #[test]
    fn test_from_raw_validates() {
        assert!(Image::from_raw(2, 2, 3, vec![0; 12]).is_some());
        assert!(Image::from_raw(2, 2, 3, vec![0; 11]).is_none());
        assert!(Image::from_raw(1, 1, 5, vec![0; 5]).is_none());
    }

    #[test]
    fn test_generated_images() {
        let red = Image::single_color(2, 1, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(red.data(), &[255, 0, 0, 255, 255, 0, 0, 255]);

        let checker = Image::checker(4, 4, 2);
        assert_eq!(&checker.data()[0..4], &[255, 255, 255, 255]);
        assert_eq!(&checker.data()[8..12], &[0, 0, 0, 255]);
    }
}
