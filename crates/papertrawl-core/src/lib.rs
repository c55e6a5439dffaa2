//! Papertrawl Core - shared infrastructure for the fetch pipeline
//!
//! Provides the blocking HTTP facade, logging setup, and spinner
//! progress used by the PubMed pipeline.

pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use http::{HttpError, SHARED_RUNTIME, get_text, http_client};
pub use logging::init_logging;
pub use progress::{ProgressContext, SharedProgress, SpinnerGuard};
