//! # Beacon Shared
//!
//! Wire types shared between the marketing frontend and the backend.

pub mod dto;
pub mod response;

pub use response::{ApiError, ApiResponse};
