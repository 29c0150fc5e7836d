//! Tag extraction for source files.
//!
//! Reads the metadata of a source file through a [`TagReader`], keeps the
//! allow-listed fields that carry a value and derives `year` from `date`
//! when the file only has the latter. Extraction never fails: unreadable
//! or malformed files yield an empty [`TagSet`] so the transcode still runs.

mod config;
mod error;
mod extractor;
mod lofty_reader;
mod traits;
mod types;

pub use config::TagsConfig;
pub use error::TagReadError;
pub use extractor::TagExtractor;
pub use lofty_reader::LoftyTagReader;
pub use traits::{RawTags, TagReader};
pub use types::{TagField, TagSet};
