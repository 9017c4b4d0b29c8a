use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};

/// Packed RGBA pixels of a captured screen region.
#[derive(Clone, PartialEq, Eq)]
pub struct CaptureBuffer {
    pub width: u32,
    pub height: u32,
    raw_data: Vec<u8>,
}

impl std::fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl CaptureBuffer {
    #[cfg(test)]
    pub fn build_from_raw_data(width_pixels: u32, height_pixels: u32, raw_rgba_data: Vec<u8>) -> Result<Self> {
        let expected_len = width_pixels as usize * height_pixels as usize * 4;
        if raw_rgba_data.len() != expected_len {
            anyhow::bail!(
                "RGBA buffer holds {} bytes, expected {} for {}x{}",
                raw_rgba_data.len(),
                expected_len,
                width_pixels,
                height_pixels
            );
        }

        log::debug!("[CAPTURE_BUFFER] building buffer: {}x{}", width_pixels, height_pixels);

        Ok(Self {
            width: width_pixels,
            height: height_pixels,
            raw_data: raw_rgba_data,
        })
    }

    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            raw_data: Vec::new(),
        }
    }

    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            raw_data: image.into_raw(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    pub fn to_dynamic_image(&self) -> Result<DynamicImage> {
        let image = RgbaImage::from_raw(self.width, self.height, self.raw_data.clone())
            .context("Failed to create image from raw data")?;
        Ok(DynamicImage::ImageRgba8(image))
    }

    /// Copies the given region, clamped to the buffer bounds. A region that
    /// ends up with no pixels yields an empty buffer.
    pub fn crop_region(&self, x: u32, y: u32, crop_width: u32, crop_height: u32) -> Self {
        let x = x.min(self.width);
        let y = y.min(self.height);
        let crop_width = crop_width.min(self.width - x);
        let crop_height = crop_height.min(self.height - y);

        if crop_width == 0 || crop_height == 0 {
            return Self::empty();
        }

        log::debug!(
            "[CAPTURE_BUFFER] Cropping region: {}x{} at ({}, {}) from {}x{}",
            crop_width,
            crop_height,
            x,
            y,
            self.width,
            self.height
        );

        let row_stride = self.width as usize * 4;
        let mut cropped_data = Vec::with_capacity(crop_width as usize * crop_height as usize * 4);

        for row in y..(y + crop_height) {
            let row_start = row as usize * row_stride + x as usize * 4;
            let row_end = row_start + crop_width as usize * 4;
            cropped_data.extend_from_slice(&self.raw_data[row_start..row_end]);
        }

        Self {
            width: crop_width,
            height: crop_height,
            raw_data: cropped_data,
        }
    }
}
