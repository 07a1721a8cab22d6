//! HTTP API handlers

pub mod health;
pub mod outputs;
pub mod prompts;
pub mod response;

pub use health::health_routes;
pub use outputs::output_routes;
pub use prompts::prompt_routes;
pub use response::{Envelope, Meta, Success, API_VERSION};
