//! kennel-axum: Axum adapter for the Kennel dog registry.
//!
//! Builds the HTTP router over any [`kennel_core::DogStore`]: the dog
//! routes, the error fallback and the request middleware.

pub mod app;
pub mod body;
pub mod middlewares;
pub mod rest;
pub mod state;
mod error;
pub use error::KennelAxumError;
pub use state::KennelState;

pub use app::{kennel, KennelApp};
