//! Tests for PNG encoding.

use image::{Rgba, RgbaImage};
use zone_renderer::png::{create_png, create_png_auto, encode_png};
use zone_renderer::raster::RasterSurface;
use zone_renderer::surface::{Point, Rect, Stroke, Surface};

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

fn color_type(bytes: &[u8]) -> u8 {
    // Signature (8) + length (4) + "IHDR" (4) + width/height (8) + depth (1)
    bytes[25]
}

// ============================================================================
// Encoding choice
// ============================================================================

#[test]
fn test_few_colors_encode_indexed() {
    let img = RgbaImage::from_fn(32, 16, |x, _| {
        if x < 16 {
            Rgba([13, 8, 135, 255])
        } else {
            Rgba([240, 249, 33, 255])
        }
    });
    let bytes = encode_png(&img).unwrap();
    assert_eq!(color_type(&bytes), 3);
    assert_eq!(decode(&bytes), img);
}

#[test]
fn test_many_colors_encode_rgba() {
    let img = RgbaImage::from_fn(64, 64, |x, y| Rgba([(x * 4) as u8, (y * 4) as u8, 128, 255]));
    let bytes = encode_png(&img).unwrap();
    assert_eq!(color_type(&bytes), 6);
    assert_eq!(decode(&bytes), img);
}

#[test]
fn test_translucent_palette_survives() {
    let img = RgbaImage::from_fn(8, 8, |x, _| {
        if x % 2 == 0 {
            Rgba([255, 255, 255, 230])
        } else {
            Rgba([0, 0, 0, 255])
        }
    });
    let bytes = encode_png(&img).unwrap();
    assert_eq!(color_type(&bytes), 3);
    assert_eq!(decode(&bytes), img);
}

#[test]
fn test_parallel_extraction_large_image() {
    // Above the parallel threshold with a small palette
    let img = RgbaImage::from_fn(128, 128, |x, y| Rgba([((x / 16) * 30) as u8, ((y / 16) * 30) as u8, 0, 255]));
    let bytes = create_png_auto(img.as_raw(), 128, 128).unwrap();
    assert_eq!(color_type(&bytes), 3);
    assert_eq!(decode(&bytes), img);
}

// ============================================================================
// Rendered rasters
// ============================================================================

#[test]
fn test_rendered_raster_roundtrip() {
    let mut surface = RasterSurface::new(120, 80, None).unwrap();
    surface.fill_rect(Rect::new(10.0, 10.0, 50.0, 30.0), Rgba([204, 71, 120, 255]));
    surface.line(
        Point::new(5.0, 70.0),
        Point::new(115.0, 5.0),
        &Stroke::solid(Rgba([55, 65, 81, 255]), 1.5),
    );
    let img = surface.into_image();
    let bytes = encode_png(&img).unwrap();
    assert_eq!(decode(&bytes), img);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_buffer_size_mismatch() {
    assert!(create_png(&[0u8; 12], 2, 2).is_err());
    assert!(create_png_auto(&[0u8; 16], 2, 2).is_ok());
}

#[test]
fn test_empty_image_rejected() {
    assert!(create_png_auto(&[], 0, 4).is_err());
    assert!(create_png(&[], 4, 0).is_err());
}
