//! Filesystem type resolution.
//!
//! Answers "which filesystem will this path land on?" by matching the path
//! against the live mount table. The answer decides whether destination
//! names must be sanitized for FAT-family volumes.
//!
//! # Example
//!
//! ```ignore
//! use transmirror_core::mounts::{FilesystemResolver, ProcMountTable};
//!
//! let resolver = FilesystemResolver::new(Arc::new(ProcMountTable::default()));
//! let fs_type = resolver.resolve(Path::new("/mnt/usb/Music")).await?;
//! assert_eq!(fs_type, "vfat");
//! ```

mod config;
mod error;
mod proc_mounts;
mod resolver;
mod traits;
mod types;

pub use config::MountConfig;
pub use error::MountError;
pub use proc_mounts::ProcMountTable;
pub use resolver::FilesystemResolver;
pub use traits::MountTable;
pub use types::MountEntry;
