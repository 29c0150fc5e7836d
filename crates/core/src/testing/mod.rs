//! Test doubles for the collaborator traits.
//!
//! These let consumers exercise the whole batch without external tools,
//! real tag parsing or the host's mount table.
//!
//! # Example
//!
//! ```rust,ignore
//! use transmirror_core::testing::{MockConverter, MockTagReader, StaticMountTable};
//!
//! let converter = MockConverter::new();
//! let reader = MockTagReader::new();
//! let mounts = StaticMountTable::root("vfat");
//!
//! reader.set_tags("/music/A/song.flac", tags);
//! converter.fail_on("/music/A/broken.flac").await;
//! ```

mod mock_converter;
mod mock_tag_reader;
mod static_mount_table;

pub use mock_converter::{MockConverter, RecordedConversion};
pub use mock_tag_reader::MockTagReader;
pub use static_mount_table::StaticMountTable;
