//! EC2 fleet discovery and lifecycle operations.

pub mod client;
pub mod filter;
pub mod inventory;
pub mod lifecycle;

pub use client::Ec2Client;
pub use filter::FilterSpec;
pub use lifecycle::Action;

use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};

/// Render an SDK error as `code: message` when service metadata is present,
/// falling back to the full cause chain for transport-level failures.
pub(crate) fn sdk_error_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let Some(code) = err.code() {
        let message = err.message().unwrap_or("no message");
        return format!("{}: {}", code, message);
    }

    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
