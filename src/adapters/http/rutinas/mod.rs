//! HTTP adapter for routines and instructor exercise review.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateRoutineRequest, ExerciseResponse, ReviewExerciseRequest, RoutineResponse};
pub use routes::rutina_routes;
