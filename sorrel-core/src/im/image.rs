// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use fast_image_resize::PixelType;
use image::{DynamicImage, RgbImage, open as open_dynamic};

use crate::constant;
use crate::cv::transform;
use crate::error::SorrelError;

/// An 8-bit RGB pixel grid decoded from a supported input image
///
/// All inputs are normalized to three u8 channels on decode, so crops,
/// resizes, and writes operate on a single pixel layout.
///
/// # Examples
///
/// ```no_run
/// use sorrel_core::im::SorrelImage;
/// let image = SorrelImage::open("cart_001.jpg").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SorrelImage {
    buffer: RgbImage,
}

impl SorrelImage {
    /// Open a new image from a provided path
    ///
    /// # Arguments
    ///
    /// * `path` - A path to an image with a valid extension
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SorrelImage, SorrelError> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());

        if let Some(ext) = extension {
            if constant::SUPPORTED_IMAGE_FORMATS.iter().any(|e| e == &ext) {
                if let Ok(image) = open_dynamic(&path) {
                    return Ok(SorrelImage {
                        buffer: image.into_rgb8(),
                    });
                }

                return Err(SorrelError::ImageReadError);
            }
        }

        Err(SorrelError::ImageExtensionError)
    }

    /// Initialize an image from an existing RGB buffer
    pub fn from_rgb8(buffer: RgbImage) -> SorrelImage {
        SorrelImage { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Crop out a rectangular region of the image
    ///
    /// # Arguments
    ///
    /// * `x` - Left edge of the region
    /// * `y` - Top edge of the region
    /// * `w` - Width of the region, must be positive
    /// * `h` - Height of the region, must be positive
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Result<SorrelImage, SorrelError> {
        if w == 0 || h == 0 || x + w > self.width() || y + h > self.height() {
            return Err(SorrelError::ImageCropError);
        }

        Ok(SorrelImage {
            buffer: image::imageops::crop_imm(&self.buffer, x, y, w, h).to_image(),
        })
    }

    /// Resize the image with area-averaging interpolation
    ///
    /// # Arguments
    ///
    /// * `width` - New width following resizing
    /// * `height` - New height following resizing
    pub fn resize(&self, width: u32, height: u32) -> Result<SorrelImage, SorrelError> {
        let source = DynamicImage::ImageRgb8(self.buffer.clone());

        let resized = transform::resize_area_fast(&source, width, height, PixelType::U8x3);

        let buffer = RgbImage::from_raw(width, height, resized)
            .ok_or(SorrelError::OtherError("Resize produced a short buffer".to_string()))?;

        Ok(SorrelImage { buffer })
    }

    /// Save the image at the provided path, with format chosen by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SorrelError> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());

        if let Some(ext) = extension {
            if constant::SUPPORTED_IMAGE_FORMATS.iter().any(|e| e == &ext) {
                return self
                    .buffer
                    .save(&path)
                    .map_err(|_| SorrelError::ImageWriteError);
            }
        }

        Err(SorrelError::ImageExtensionError)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn gradient(width: u32, height: u32) -> SorrelImage {
        SorrelImage::from_rgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([x as u8, y as u8, 0])
        }))
    }

    #[test]
    fn test_crop_shape_and_offset() {
        let image = gradient(100, 80);

        let cropped = image.crop(10, 20, 30, 40).unwrap();

        assert_eq!(cropped.width(), 30);
        assert_eq!(cropped.height(), 40);
        assert_eq!(cropped.buffer.get_pixel(0, 0).0, [10, 20, 0]);
    }

    #[test]
    fn test_crop_rejects_empty_or_out_of_bounds() {
        let image = gradient(100, 80);

        assert!(image.crop(10, 10, 0, 5).is_err());
        assert!(image.crop(90, 10, 20, 5).is_err());
    }

    #[test]
    fn test_resize_shape() {
        let image = gradient(90, 45);

        let resized = image.resize(224, 224).unwrap();

        assert_eq!(resized.width(), 224);
        assert_eq!(resized.height(), 224);
    }

    #[test]
    fn test_open_rejects_unknown_extension() {
        assert!(matches!(
            SorrelImage::open("image.tiff"),
            Err(SorrelError::ImageExtensionError)
        ));
    }

    #[test]
    fn test_save_and_reopen() {
        const OUTPUT: &str = "TEST_IMAGE_SAVE.png";

        let image = gradient(32, 16);
        image.save(OUTPUT).unwrap();

        let reloaded = SorrelImage::open(OUTPUT).unwrap();
        assert_eq!(reloaded.width(), 32);
        assert_eq!(reloaded.height(), 16);

        std::fs::remove_file(OUTPUT).unwrap();
    }
}
