//! HTTP adapter for member (socio) endpoints, including the member's QR code.

mod dto;
mod handlers;
mod routes;

pub use dto::{MemberResponse, RegisterMemberRequest, RotateTokenResponse, UpdateMemberRequest};
pub use routes::socio_routes;
