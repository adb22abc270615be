//! Portable graymap codec.
//!
//! Decodes both the ASCII (`P2`) and binary (`P5`) variants through the
//! `image` crate's PNM decoder; encodes binary only.
//!
//! ```text
//! P5            magic
//! # comment     optional, anywhere in the header
//! 640 480       width height
//! 255           maxval (1..=65535)
//! <raster>      width*height samples, 1 byte each (2 big-endian if maxval > 255)
//! ```

use image::ImageDecoder;
use image::codecs::pnm::{PnmDecoder, PnmSubtype, SampleEncoding};

use crate::core::{PixelLayout, RasterImage, sample_count};
use crate::error::{Error, Result};

/// ASCII graymap magic
pub const ASCII_MAGIC: &[u8; 2] = b"P2";

/// Binary graymap magic
pub const BINARY_MAGIC: &[u8; 2] = b"P5";

/// Decode a `P2` or `P5` graymap.
///
/// Samples keep the file's own maxval, 8 and 16 bit alike. Samples above
/// maxval saturate to maxval.
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    let decoder =
        PnmDecoder::new(bytes).map_err(|e| Error::Format(format!("invalid PGM header: {}", e)))?;

    let header = decoder.header();
    let encoding = match header.subtype() {
        PnmSubtype::Graymap(encoding) => encoding,
        other => {
            return Err(Error::Format(format!("not a graymap: {:?}", other)));
        }
    };
    let maxval = u16::try_from(header.maximal_sample())
        .map_err(|_| Error::Format(format!("PGM maxval {} too large", header.maximal_sample())))?;

    let (width, height) = decoder.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Format(format!("PGM has empty dimensions {}x{}", width, height)));
    }

    let expected = sample_count(width, height, PixelLayout::Gray)?;
    let wide = maxval > u16::from(u8::MAX);
    let mut buf = vec![0u8; expected * if wide { 2 } else { 1 }];
    if let Err(e) = decoder.read_image(&mut buf) {
        let actual = available_samples(bytes, encoding, wide);
        if actual < expected {
            return Err(Error::TruncatedData { expected, actual });
        }
        return Err(Error::Format(format!("invalid PGM raster: {}", e)));
    }

    let samples: Vec<u16> = if wide {
        buf.chunks_exact(2)
            .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
            .collect()
    } else {
        buf.into_iter().map(u16::from).collect()
    };
    let full = if wide { u16::MAX } else { u16::from(u8::MAX) };

    log::debug!(
        "Decoded {:?} PGM {}x{} maxval {}",
        encoding,
        width,
        height,
        maxval
    );

    Ok(RasterImage::from_parts(
        width,
        height,
        PixelLayout::Gray,
        maxval,
        restore_maxval(samples, full, maxval),
    ))
}

/// The decoder stretches samples to the full 8 or 16 bit range; map them
/// back onto the file's maxval.
///
/// Exact for 8-bit files. For 16-bit maxvals above 65015 the decoder's `f32`
/// stretch can move a sample by one unit.
fn restore_maxval(samples: Vec<u16>, full: u16, maxval: u16) -> Vec<u16> {
    if maxval == full {
        return samples;
    }
    let (full, max) = (u32::from(full), u32::from(maxval));
    samples
        .into_iter()
        .map(|s| ((u32::from(s) * max + full / 2) / full) as u16)
        .collect()
}

/// Samples present after the header, for truncation reports.
fn available_samples(bytes: &[u8], encoding: SampleEncoding, wide: bool) -> usize {
    let mut raster = bytes;
    // Reading the header again leaves `raster` at the first sample
    let header_ok = PnmDecoder::new(&mut raster).is_ok();
    if !header_ok {
        return 0;
    }
    match encoding {
        SampleEncoding::Binary => raster.len() / if wide { 2 } else { 1 },
        SampleEncoding::Ascii => raster
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
            .count(),
    }
}

/// Encode a single-channel raster as binary `P5`.
///
/// Maxvals above 255 are written as two big-endian bytes per sample.
pub fn encode(image: &RasterImage) -> Result<Vec<u8>> {
    if image.layout() != PixelLayout::Gray {
        return Err(Error::Format(format!(
            "PGM holds one gray channel, image layout is {:?}",
            image.layout()
        )));
    }

    let header = format!("P5\n{} {}\n{}\n", image.width(), image.height(), image.max_value());
    let wide = image.max_value() > u16::from(u8::MAX);
    let mut out = Vec::with_capacity(header.len() + image.samples().len() * 2);
    out.extend_from_slice(header.as_bytes());
    for &sample in image.samples() {
        if wide {
            out.extend_from_slice(&sample.to_be_bytes());
        } else {
            out.push(sample as u8);
        }
    }
    Ok(out)
}
