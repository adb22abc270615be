//! PNG codec backed by the `image` crate.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ExtendedColorType, ImageEncoder, ImageFormat};

use crate::core::{PixelLayout, RasterImage};
use crate::error::{Error, Result};

/// PNG file signature
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode a PNG into a raster.
///
/// 8-bit images get max value 255 and 16-bit images 65535; floating point
/// images are rejected.
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| Error::Format(format!("PNG decode failed: {}", e)))?;

    let (layout, wide) = match img.color() {
        ColorType::L8 => (PixelLayout::Gray, false),
        ColorType::La8 => (PixelLayout::GrayAlpha, false),
        ColorType::Rgb8 => (PixelLayout::Rgb, false),
        ColorType::Rgba8 => (PixelLayout::Rgba, false),
        ColorType::L16 => (PixelLayout::Gray, true),
        ColorType::La16 => (PixelLayout::GrayAlpha, true),
        ColorType::Rgb16 => (PixelLayout::Rgb, true),
        ColorType::Rgba16 => (PixelLayout::Rgba, true),
        other => {
            return Err(Error::Format(format!("unsupported PNG pixel type {:?}", other)));
        }
    };

    let (width, height) = (img.width(), img.height());
    log::debug!(
        "Decoded PNG {}x{} as {:?} ({} bit)",
        width,
        height,
        layout,
        if wide { 16 } else { 8 }
    );

    if wide {
        let samples = match layout {
            PixelLayout::Gray => img.into_luma16().into_raw(),
            PixelLayout::GrayAlpha => img.into_luma_alpha16().into_raw(),
            PixelLayout::Rgb => img.into_rgb16().into_raw(),
            PixelLayout::Rgba => img.into_rgba16().into_raw(),
        };
        return RasterImage::new(width, height, layout, u16::MAX, samples);
    }

    let samples = match layout {
        PixelLayout::Gray => img.into_luma8().into_raw(),
        PixelLayout::GrayAlpha => img.into_luma_alpha8().into_raw(),
        PixelLayout::Rgb => img.into_rgb8().into_raw(),
        PixelLayout::Rgba => img.into_rgba8().into_raw(),
    };
    let samples = samples.into_iter().map(u16::from).collect();
    RasterImage::new(width, height, layout, u8::MAX.into(), samples)
}

/// Encode a raster as PNG with a fixed compression profile.
///
/// Max values up to 255 are written as 8-bit samples, larger ones as 16-bit.
/// Either way samples are rescaled to the full range of the bit depth.
pub fn encode(image: &RasterImage) -> Result<Vec<u8>> {
    let wide = image.max_value() > u16::from(u8::MAX);
    let color = match (image.layout(), wide) {
        (PixelLayout::Gray, false) => ExtendedColorType::L8,
        (PixelLayout::GrayAlpha, false) => ExtendedColorType::La8,
        (PixelLayout::Rgb, false) => ExtendedColorType::Rgb8,
        (PixelLayout::Rgba, false) => ExtendedColorType::Rgba8,
        (PixelLayout::Gray, true) => ExtendedColorType::L16,
        (PixelLayout::GrayAlpha, true) => ExtendedColorType::La16,
        (PixelLayout::Rgb, true) => ExtendedColorType::Rgb16,
        (PixelLayout::Rgba, true) => ExtendedColorType::Rgba16,
    };

    // The encoder takes 16-bit samples in native byte order
    let buf: Vec<u8> = if wide {
        full_range(image, u16::MAX)
            .flat_map(|s| s.to_ne_bytes())
            .collect()
    } else {
        full_range(image, u8::MAX.into()).map(|s| s as u8).collect()
    };

    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, CompressionType::Default, FilterType::Adaptive)
        .write_image(&buf, image.width(), image.height(), color)
        .map_err(|e| Error::Format(format!("PNG encode failed: {}", e)))?;
    Ok(out)
}

/// Samples stretched from the raster's max value to `full`.
fn full_range(image: &RasterImage, full: u16) -> impl Iterator<Item = u16> + '_ {
    let (max, full) = (u32::from(image.max_value()), u32::from(full));
    // Alpha samples share the color max value in PGM-derived rasters
    image
        .samples()
        .iter()
        .map(move |&s| ((u32::from(s) * full + max / 2) / max).min(full) as u16)
}
