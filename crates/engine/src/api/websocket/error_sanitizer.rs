//! Error sanitization for client-facing messages.
//!
//! Prevents leaking executor output or internal details to clients.

/// Sanitize an error for client consumption.
///
/// Logs the full error server-side, returns a generic message for the client.
pub fn sanitize_error<E: std::fmt::Display>(error: &E, context: &str) -> String {
    tracing::error!(
        error = %error,
        context = context,
        "Internal error occurred"
    );

    format!("An error occurred while {}", context)
}
