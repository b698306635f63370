pub mod error;
pub mod forecast;
pub mod generation;
pub mod handlers;
pub mod prompt;
pub mod router;
pub mod server;

pub use error::{ApiError, Result};
pub use generation::{AzureObservationGenerator, GeneratorState, ObservationGenerator};
pub use router::create_router;
pub use server::run_server;
