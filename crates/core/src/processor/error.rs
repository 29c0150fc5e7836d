//! Error types for the processor module.

use thiserror::Error;

use crate::converter::ConverterError;
use crate::destination::DestinationError;

/// Why a single item failed.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Destination(#[from] DestinationError),

    #[error(transparent)]
    Conversion(#[from] ConverterError),
}

impl ProcessError {
    /// Captured subprocess stderr, when the failure came from the pipeline.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Conversion(e) => e.stderr(),
            Self::Destination(_) => None,
        }
    }
}

/// Renders an error followed by its sources, joined with `: `.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
