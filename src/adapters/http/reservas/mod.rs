//! HTTP adapter for reservation (reserva) endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateReservationRequest, MarkAttendanceRequest, ReservationCreatedResponse,
    ReservationResponse,
};
pub use routes::reserva_routes;
