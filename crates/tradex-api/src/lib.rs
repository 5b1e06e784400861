mod config;
mod error;
mod handlers;
mod server;
mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorBody, Operation, NO_RESULT_MESSAGE};
pub use handlers::{HealthResponse, ResultResponse, RETRIEVED_MESSAGE, SUBMITTED_MESSAGE};
pub use server::create_app;
pub use state::AppState;
