//! Mount table backed by a `/proc/mounts`-style file.

use async_trait::async_trait;

use super::config::MountConfig;
use super::error::MountError;
use super::traits::MountTable;
use super::types::MountEntry;

/// Reads mounts from the kernel's table on every call.
#[derive(Debug, Clone, Default)]
pub struct ProcMountTable {
    config: MountConfig,
}

impl ProcMountTable {
    /// Creates a mount table reader with the given configuration.
    pub fn new(config: MountConfig) -> Self {
        Self { config }
    }

    /// Parses the contents of a mount table.
    ///
    /// Each line is `device mount_point fs_type options dump pass`; lines
    /// with fewer than three fields are ignored.
    pub fn parse(content: &str) -> Vec<MountEntry> {
        content
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let _device = fields.next()?;
                let mount_point = fields.next()?;
                let fs_type = fields.next()?;
                Some(MountEntry::new(unescape(mount_point), fs_type))
            })
            .collect()
    }
}

/// Decodes the octal escapes the kernel uses for whitespace and backslashes.
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && is_octal_escape(&bytes[i + 1..]) {
            let value = (bytes[i + 1] - b'0') * 64 + (bytes[i + 2] - b'0') * 8 + (bytes[i + 3] - b'0');
            out.push(value);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal_escape(rest: &[u8]) -> bool {
    rest.len() >= 3
        && matches!(rest[0], b'0'..=b'3')
        && rest[1..3].iter().all(|b| matches!(b, b'0'..=b'7'))
}

#[async_trait]
impl MountTable for ProcMountTable {
    fn name(&self) -> &str {
        "proc"
    }

    async fn entries(&self) -> Result<Vec<MountEntry>, MountError> {
        let content = tokio::fs::read_to_string(&self.config.table_path)
            .await
            .map_err(|source| MountError::TableUnreadable {
                path: self.config.table_path.clone(),
                source,
            })?;
        Ok(Self::parse(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
sysfs /sys sysfs rw,nosuid,nodev,noexec,relatime 0 0
/dev/nvme0n1p2 / ext4 rw,relatime 0 0
/dev/sdb1 /mnt/usb vfat rw,relatime,fmask=0022 0 0
/dev/sdc1 /media/user/My\\040Music exfat rw,relatime 0 0
";

    #[test]
    fn test_parse_mount_table() {
        let entries = ProcMountTable::parse(SAMPLE);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1], MountEntry::new("/", "ext4"));
        assert_eq!(entries[2], MountEntry::new("/mnt/usb", "vfat"));
    }

    #[test]
    fn test_parse_decodes_escapes() {
        let entries = ProcMountTable::parse(SAMPLE);
        assert_eq!(
            entries[3].mount_point,
            PathBuf::from("/media/user/My Music")
        );
        assert_eq!(unescape("a\\011b\\134c"), "a\tb\\c");
    }

    #[test]
    fn test_parse_keeps_lone_backslash() {
        assert_eq!(unescape("/weird\\path"), "/weird\\path");
        assert_eq!(unescape("/end\\04"), "/end\\04");
    }

    #[test]
    fn test_parse_skips_short_lines() {
        let entries = ProcMountTable::parse("\nbroken line\n/dev/sda1 /boot vfat rw 0 0\n");
        assert_eq!(entries, vec![MountEntry::new("/boot", "vfat")]);
    }

    #[tokio::test]
    async fn test_entries_reads_file_each_call() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "/dev/sda1 / ext4 rw 0 0").unwrap();
        file.flush().unwrap();

        let table = ProcMountTable::new(
            MountConfig::default().with_table_path(file.path().to_path_buf()),
        );
        assert_eq!(table.entries().await.unwrap().len(), 1);

        writeln!(file, "/dev/sdb1 /mnt/usb vfat rw 0 0").unwrap();
        file.flush().unwrap();
        assert_eq!(table.entries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_entries_missing_table() {
        let table = ProcMountTable::new(
            MountConfig::default().with_table_path(PathBuf::from("/nonexistent/mounts")),
        );
        let err = table.entries().await.unwrap_err();
        assert!(matches!(err, MountError::TableUnreadable { .. }));
    }
}
