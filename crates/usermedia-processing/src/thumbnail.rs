use std::io::Cursor;

use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};

use crate::crop::crop_to_box;

/// Resize dimensions specification
#[derive(Debug, Clone, Copy)]
pub struct ResizeDimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ResizeDimensions {
    /// Parse dimensions from string format: "WxH", "Wx", or "xH"
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split('x').collect();

        if parts.len() != 2 {
            return Err("Invalid dimensions format. Expected: WxH, Wx, or xH".to_string());
        }

        let width = if parts[0].is_empty() {
            None
        } else {
            Some(
                parts[0]
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid width: {}", parts[0]))?,
            )
        };

        let height = if parts[1].is_empty() {
            None
        } else {
            Some(
                parts[1]
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid height: {}", parts[1]))?,
            )
        };

        if width.is_none() && height.is_none() {
            return Err("At least one dimension must be specified".to_string());
        }

        Ok(ResizeDimensions { width, height })
    }
}

/// Encoding format for a storage key extension, when supported.
pub fn format_for_extension(extension: &str) -> Option<ImageFormat> {
    ImageFormat::from_extension(extension)
}

/// Thumbnail rendering
pub struct Thumbnailer;

impl Thumbnailer {
    /// Calculate target dimensions, deriving a missing side from the source
    /// aspect ratio.
    pub fn calculate_dimensions(
        orig_width: u32,
        orig_height: u32,
        dimensions: ResizeDimensions,
    ) -> (u32, u32) {
        match (dimensions.width, dimensions.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => {
                let aspect_ratio = orig_height as f32 / orig_width as f32;
                let h = (w as f32 * aspect_ratio).round() as u32;
                (w, h.max(1))
            }
            (None, Some(h)) => {
                let aspect_ratio = orig_width as f32 / orig_height as f32;
                let w = (h as f32 * aspect_ratio).round() as u32;
                (w.max(1), h)
            }
            (None, None) => (orig_width, orig_height),
        }
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Render a thumbnail from encoded image bytes.
    ///
    /// The crop box is applied first when present. The remaining image is
    /// scaled to cover the target dimensions, upscaling smaller sources, and
    /// center-cropped to exactly the target size. Returns the encoded bytes
    /// and the rendered (width, height).
    pub fn render(
        data: &[u8],
        crop_box: Option<(i32, i32, i32, i32)>,
        dimensions: ResizeDimensions,
        format: ImageFormat,
    ) -> Result<(Vec<u8>, (u32, u32)), image::ImageError> {
        let img = image::load_from_memory(data)?;

        let img = match crop_box {
            Some(corners) => crop_to_box(&img, corners),
            None => img,
        };

        let (orig_width, orig_height) = img.dimensions();
        let (target_width, target_height) =
            Self::calculate_dimensions(orig_width, orig_height, dimensions);

        let scale = (target_width as f32 / orig_width as f32)
            .max(target_height as f32 / orig_height as f32);
        let scaled_width = ((orig_width as f32 * scale).round() as u32).max(target_width);
        let scaled_height = ((orig_height as f32 * scale).round() as u32).max(target_height);

        let filter = Self::select_filter(orig_width, orig_height, scaled_width, scaled_height);
        let resized = img.resize_exact(scaled_width, scaled_height, filter);

        let x_offset = (scaled_width - target_width) / 2;
        let y_offset = (scaled_height - target_height) / 2;
        let thumbnail = resized.crop_imm(x_offset, y_offset, target_width, target_height);

        // JPEG has no alpha channel; drop it before encoding.
        let thumbnail = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(thumbnail.to_rgb8()),
            _ => thumbnail,
        };

        let mut buf = Vec::new();
        thumbnail.write_to(&mut Cursor::new(&mut buf), format)?;

        Ok((buf, (target_width, target_height)))
    }
}
