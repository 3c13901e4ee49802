pub mod booking;
pub mod error;
pub mod flight;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
