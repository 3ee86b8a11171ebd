//! Photo compression for journal entries.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage};
use log::warn;

pub const MAX_DIMENSION: u32 = 1200;
pub const TARGET_BYTES: usize = 500_000;
const START_QUALITY: u8 = 70;
const MIN_QUALITY: u8 = 30;
const QUALITY_STEP: u8 = 10;

/// Turns picked image bytes into what gets stored on an entry. `None` means
/// the photo could not be processed and the entry is saved without one.
pub trait PhotoCompressor: Send + Sync {
    fn compress(&self, raw: &[u8]) -> Option<Vec<u8>>;
}

/// Downscales to [`MAX_DIMENSION`] and re-encodes as JPEG, lowering quality
/// until the output fits [`TARGET_BYTES`] or quality bottoms out.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCompressor;

impl JpegCompressor {
    fn try_compress(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(raw).context("Failed to decode photo")?;
        let img = resize_to_fit(img, MAX_DIMENSION);
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

        let mut quality = START_QUALITY;
        let mut encoded = encode_jpeg(&rgb, quality)?;
        while encoded.len() > TARGET_BYTES && quality > MIN_QUALITY {
            quality -= QUALITY_STEP;
            encoded = encode_jpeg(&rgb, quality)?;
        }
        Ok(encoded)
    }
}

impl PhotoCompressor for JpegCompressor {
    fn compress(&self, raw: &[u8]) -> Option<Vec<u8>> {
        match self.try_compress(raw) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!("Dropping photo: {err:#}");
                None
            }
        }
    }
}

fn resize_to_fit(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if img.width().max(img.height()) <= max_dimension {
        return img;
    }
    // `resize` keeps the aspect ratio inside the bounding box.
    img.resize(max_dimension, max_dimension, FilterType::Triangle)
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    img.write_with_encoder(encoder)
        .context("Failed to encode JPEG")?;
    Ok(out.into_inner())
}

/// "512 bytes", "48.2 KB", "1.3 MB".
pub fn format_file_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} bytes")
    } else if value < MB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{:.1} MB", value / MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn large_photo_is_downscaled_to_jpeg() {
        let compressed = JpegCompressor.compress(&png_bytes(2400, 1600)).unwrap();
        assert!(compressed.len() <= TARGET_BYTES);

        let decoded = image::load_from_memory(&compressed).unwrap();
        assert_eq!(
            image::guess_format(&compressed).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!((decoded.width(), decoded.height()), (1200, 800));
    }

    #[test]
    fn small_photo_keeps_its_size() {
        let compressed = JpegCompressor.compress(&png_bytes(300, 200)).unwrap();
        let decoded = image::load_from_memory(&compressed).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 200));
    }

    #[test]
    fn garbage_bytes_yield_no_photo() {
        assert!(JpegCompressor.compress(b"definitely not an image").is_none());
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
    }
}
