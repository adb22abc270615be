//! Decoded raster images.

use crate::error::{Error, Result};

/// Channel arrangement of a decoded pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// One intensity channel
    Gray,
    /// Intensity followed by alpha
    GrayAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl PixelLayout {
    /// Samples per pixel, alpha included
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::GrayAlpha => 2,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    /// Samples that contribute to intensity
    #[inline]
    pub fn color_channels(self) -> usize {
        match self {
            PixelLayout::Gray | PixelLayout::GrayAlpha => 1,
            PixelLayout::Rgb | PixelLayout::Rgba => 3,
        }
    }

    /// Last sample of each pixel is alpha
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelLayout::GrayAlpha | PixelLayout::Rgba)
    }
}

/// Row-major raster of up to 16 bits per sample. Row 0 is the top row as
/// stored on disk.
///
/// `max_value` is the sample value of full intensity as declared by the
/// source file (a PGM maxval, 255 or 65535 for PNG), so scores are computed
/// against the file's own scale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    layout: PixelLayout,
    max_value: u16,
    samples: Vec<u16>,
}

impl RasterImage {
    /// Build a raster from decoded samples.
    ///
    /// `samples` must hold exactly `width * height * layout.channels()`
    /// values; a shorter buffer is reported as truncated data.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        max_value: u16,
        samples: Vec<u16>,
    ) -> Result<Self> {
        if max_value == 0 {
            return Err(Error::validation("max_value", "must be at least 1"));
        }
        if let Some(bad) = samples.iter().find(|&&s| s > max_value) {
            return Err(Error::validation(
                "samples",
                format!("sample {} exceeds max value {}", bad, max_value),
            ));
        }
        let expected = sample_count(width, height, layout)?;
        if samples.len() < expected {
            return Err(Error::TruncatedData {
                expected,
                actual: samples.len(),
            });
        }
        if samples.len() > expected {
            return Err(Error::validation(
                "samples",
                format!("expected {} samples, got {}", expected, samples.len()),
            ));
        }
        Ok(Self::from_parts(width, height, layout, max_value, samples))
    }

    /// Single-channel 8-bit raster (max value 255)
    pub fn gray(width: u32, height: u32, samples: Vec<u16>) -> Result<Self> {
        Self::new(width, height, PixelLayout::Gray, u8::MAX.into(), samples)
    }

    /// Caller guarantees the sample count matches the dimensions.
    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        layout: PixelLayout,
        max_value: u16,
        samples: Vec<u16>,
    ) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * layout.channels()
        );
        Self {
            width,
            height,
            layout,
            max_value,
            samples,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel arrangement
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Sample value that represents full intensity
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// All samples, row-major
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Samples of one raster row
    pub fn row(&self, y: u32) -> &[u16] {
        let stride = self.width as usize * self.layout.channels();
        let start = y as usize * stride;
        &self.samples[start..start + stride]
    }

    /// Samples of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> &[u16] {
        let channels = self.layout.channels();
        let start = x as usize * channels;
        &self.row(y)[start..start + channels]
    }

    /// Consume the image, returning its samples
    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }
}

/// Samples required for the given dimensions, rejecting overflow.
pub(crate) fn sample_count(width: u32, height: u32, layout: PixelLayout) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(layout.channels()))
        .ok_or_else(|| Error::Format(format!("raster dimensions {}x{} overflow", width, height)))
}
