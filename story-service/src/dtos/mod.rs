pub mod story;

pub use service_core::error::ErrorResponse;
pub use story::{ChatInput, ChatOutput, HealthResponse, WelcomeMessage};
