// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use fast_image_resize;
use fast_image_resize::{FilterType, PixelType, images::Image};
use image::DynamicImage;

/// Resize a 2D u8 image using the SIMD-accelerated fast-image-resize crate
///
/// A box convolution filter is used so that downscales average over the
/// source area covered by each destination pixel, matching the conventional
/// area-interpolation default for shrinking images.
///
/// # Arguments
///
/// * `source` - A DynamicImage with u8 subpixel type
/// * `new_width` - New width following resizing
/// * `new_height` - New height following resizing
/// * `pixel_type` - RGB or Luma pixel type
pub fn resize_area_fast(
    source: &DynamicImage,
    new_width: u32,
    new_height: u32,
    pixel_type: PixelType,
) -> Vec<u8> {
    let mut destination = Image::new(new_width, new_height, pixel_type);

    let mut resizer = fast_image_resize::Resizer::new();
    let option = fast_image_resize::ResizeOptions {
        algorithm: fast_image_resize::ResizeAlg::Convolution(FilterType::Box),
        cropping: fast_image_resize::SrcCropping::None,
        mul_div_alpha: false,
    };

    resizer.resize(source, &mut destination, &option).unwrap();

    destination.into_vec()
}

#[cfg(test)]
mod test {

    use super::*;
    use image::RgbImage;

    #[test]
    fn test_resize_area_shape() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(64, 48));

        let resized = resize_area_fast(&image, 224, 224, PixelType::U8x3);

        assert_eq!(resized.len(), 224 * 224 * 3);
    }

    #[test]
    fn test_resize_area_preserves_constant_image() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            100,
            60,
            image::Rgb([120u8, 40u8, 200u8]),
        ));

        let resized = resize_area_fast(&image, 25, 15, PixelType::U8x3);

        // Averaging over a constant field must not change the value
        for pixel in resized.chunks_exact(3) {
            assert_eq!(pixel, [120, 40, 200]);
        }
    }
}
