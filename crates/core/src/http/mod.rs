//! Outbound HTTP calls with retry, correlation and header logging.

mod executor;
mod headers;

pub use executor::{HttpResponse, RequestExecutor};
pub use headers::{log_headers, render_headers};
