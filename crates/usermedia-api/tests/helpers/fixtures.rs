//! Test fixtures: PNG blobs.

#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb};

/// Minimal valid 1x1 PNG bytes.
pub fn minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Encode a real PNG of the given dimensions, decodable by the thumbnailer.
pub fn encoded_png(width: u32, height: u32) -> Vec<u8> {
    let buffer = ImageBuffer::from_pixel(width, height, Rgb([120u8, 180, 90]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode test png");
    bytes
}

/// Bytes that are not an image at all.
pub fn not_an_image() -> Vec<u8> {
    b"just some text pretending to be a picture".to_vec()
}
