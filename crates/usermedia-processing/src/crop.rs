use image::{DynamicImage, GenericImageView};

/// Crop `img` to the stored crop box (x, y, x2, y2).
///
/// Corners are clamped into the image bounds and swapped if inverted. A box
/// that collapses to zero width or height after clamping is ignored and the
/// original image is returned, matching how a stale box from a since-replaced
/// image is treated.
pub fn crop_to_box(img: &DynamicImage, crop_box: (i32, i32, i32, i32)) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (x, y, x2, y2) = crop_box;

    let clamp = |v: i32, max: u32| -> u32 { v.clamp(0, max as i32) as u32 };

    let mut left = clamp(x, width);
    let mut right = clamp(x2, width);
    let mut top = clamp(y, height);
    let mut bottom = clamp(y2, height);

    if left > right {
        std::mem::swap(&mut left, &mut right);
    }
    if top > bottom {
        std::mem::swap(&mut top, &mut bottom);
    }

    if right - left == 0 || bottom - top == 0 {
        tracing::debug!(
            x, y, x2, y2, width, height,
            "Crop box collapses to zero area, ignoring"
        );
        return img.clone();
    }

    img.crop_imm(left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([10, 20, 30, 255]),
        ))
    }

    #[test]
    fn test_crop_within_bounds() {
        let img = test_image(200, 100);
        let cropped = crop_to_box(&img, (10, 20, 110, 70));
        assert_eq!(cropped.dimensions(), (100, 50));
    }

    #[test]
    fn test_crop_clamps_out_of_bounds_corners() {
        let img = test_image(100, 100);
        let cropped = crop_to_box(&img, (-50, -50, 150, 150));
        assert_eq!(cropped.dimensions(), (100, 100));
    }

    #[test]
    fn test_crop_swaps_inverted_corners() {
        let img = test_image(100, 100);
        let cropped = crop_to_box(&img, (80, 90, 20, 10));
        assert_eq!(cropped.dimensions(), (60, 80));
    }

    #[test]
    fn test_degenerate_box_returns_original() {
        let img = test_image(100, 100);
        let cropped = crop_to_box(&img, (50, 0, 50, 100));
        assert_eq!(cropped.dimensions(), (100, 100));

        // Box entirely outside the image clamps to zero area.
        let cropped = crop_to_box(&img, (200, 200, 300, 300));
        assert_eq!(cropped.dimensions(), (100, 100));
    }
}
