//! Fast image decoding with format-specific optimizations.
//!
//! Uses zune-jpeg for JPEG files (1.5-2x faster than image crate),
//! falls back to image crate for other formats.

use crate::error::SampleError;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Image formats with a dedicated decoding path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Other,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            _ => Self::Other,
        }
    }
}

/// Fast image decoder that uses optimized decoders per format
pub struct FastDecoder;

impl FastDecoder {
    /// Decode an image from a file path using the fastest available decoder.
    ///
    /// - JPEG: Uses zune-jpeg straight to grayscale, image crate if that fails
    /// - Other formats: image crate
    pub fn decode(path: &Path) -> Result<DynamicImage, SampleError> {
        match ImageFormat::from_path(path) {
            ImageFormat::Jpeg => Self::decode_jpeg(path).or_else(|_| Self::decode_fallback(path)),
            ImageFormat::Other => Self::decode_fallback(path),
        }
    }

    /// Fast JPEG decoding using zune-jpeg
    fn decode_jpeg(path: &Path) -> Result<DynamicImage, SampleError> {
        let file_bytes = fs::read(path).map_err(|e| SampleError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Hashing only needs luminance, so let the decoder do the conversion
        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::Luma);
        let mut decoder = JpegDecoder::new_with_options(&file_bytes, options);

        let pixels = decoder.decode().map_err(|e| SampleError::UnreadableImage {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| SampleError::UnreadableImage {
            path: path.to_path_buf(),
            reason: "Failed to get image info".to_string(),
        })?;

        let width = info.width as u32;
        let height = info.height as u32;
        let buffer_error = |kind: &str| SampleError::UnreadableImage {
            path: path.to_path_buf(),
            reason: format!("Failed to create {kind} buffer"),
        };

        let image = match decoder.get_output_colorspace().unwrap_or(ColorSpace::Luma) {
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("Luma"))?;
                DynamicImage::ImageLuma8(buffer)
            }
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("RGB"))?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("RGBA"))?;
                DynamicImage::ImageRgba8(buffer)
            }
            _ => return Self::decode_fallback(path),
        };

        Ok(image)
    }

    /// Fallback to image crate
    fn decode_fallback(path: &Path) -> Result<DynamicImage, SampleError> {
        image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => SampleError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => SampleError::UnreadableImage {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })
    }
}
