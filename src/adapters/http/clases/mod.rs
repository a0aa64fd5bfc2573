//! HTTP adapter for class (clase) endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ClassResponse, ClassRosterResponse, CreateClassRequest};
pub use routes::clase_routes;
