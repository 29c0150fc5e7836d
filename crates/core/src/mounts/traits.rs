//! Trait definitions for the mounts module.

use async_trait::async_trait;

use super::error::MountError;
use super::types::MountEntry;

/// A live view of the mounted filesystems.
///
/// Implementations must query the system on every call; callers rely on
/// seeing mounts that appeared after startup.
#[async_trait]
pub trait MountTable: Send + Sync {
    /// Returns the name of this mount table implementation.
    fn name(&self) -> &str;

    /// Lists the currently mounted filesystems.
    async fn entries(&self) -> Result<Vec<MountEntry>, MountError>;
}
