//! Per-file conversion.
//!
//! Sources already in the target codec are copied verbatim with their
//! timestamps. Other supported sources are streamed through an external
//! decoder into an external encoder; the intermediate audio never touches
//! disk. Anything else is skipped.

mod commands;
mod config;
mod error;
mod piped;
mod traits;
mod types;

pub use commands::{decode_args, describe, encode_args, tag_args};
pub use config::ConverterConfig;
pub use error::ConverterError;
pub use piped::PipedConverter;
pub use traits::Converter;
pub use types::{ConversionJob, ConversionOutcome, PipelineStage, SkipReason, SourceKind};
