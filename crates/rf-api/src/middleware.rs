//! rusty-forum/crates/rf-api/src/middleware.rs
//!
//! Shared middleware for logging and traffic control.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Returns the standard request logger:
/// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn request_logger() -> Logger {
    Logger::default()
}

/// Configures CORS. The API is JSON-only and stateless, so any origin may
/// read it; writes are still plain POSTs.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}
