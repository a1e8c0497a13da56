pub mod health;
pub mod prediction;

pub use health::{EndpointHealth, HealthResponse, HealthStatus};
pub use prediction::PredictionService;
