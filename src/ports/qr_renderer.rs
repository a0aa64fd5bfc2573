//! QR image rendering port.

use crate::domain::foundation::DomainError;

/// Turns a payload into an image a phone can display at the door.
pub trait QrRenderer: Send + Sync {
    /// Renders `payload` as a PNG image.
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, DomainError>;
}
