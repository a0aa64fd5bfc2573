//! QR rendering adapter.

mod png_renderer;

pub use png_renderer::PngQrRenderer;
