//! Path revalidator implementations.

mod memory;

pub use memory::InMemoryPathRevalidator;

#[cfg(feature = "http-revalidate")]
mod http;
#[cfg(feature = "http-revalidate")]
pub use http::{HttpPathRevalidator, HttpRevalidatorConfig};
