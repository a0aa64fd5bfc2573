//! PNG QR renderer backed by `qrcode` and `image`.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::QrRenderer;

/// Default edge length of the rendered image in pixels.
pub const DEFAULT_QR_SIZE_PX: u32 = 320;

#[derive(Debug, Clone)]
pub struct PngQrRenderer {
    size_px: u32,
}

impl PngQrRenderer {
    pub fn new(size_px: u32) -> Self {
        Self { size_px }
    }
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SIZE_PX)
    }
}

impl QrRenderer for PngQrRenderer {
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, DomainError> {
        // Medium correction keeps the code scannable on cracked phone screens.
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("QR encode failed: {}", e)))?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.size_px, self.size_px)
            .quiet_zone(true)
            .build();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("PNG encode failed: {}", e)))?;

        Ok(png)
    }
}
