//! Tag reader backed by `lofty`.

use lofty::error::ErrorKind;
use lofty::file::TaggedFileExt;
use lofty::tag::{ItemKey, Tag};
use std::path::Path;

use super::error::TagReadError;
use super::traits::{RawTags, TagReader};
use super::types::TagField;

/// Reads ID3, Vorbis comments, MP4 atoms, APE and friends through `lofty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagReader;

impl LoftyTagReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }

    fn item_key(field: TagField) -> ItemKey {
        match field {
            TagField::Album => ItemKey::AlbumTitle,
            TagField::Artist => ItemKey::TrackArtist,
            TagField::Date => ItemKey::RecordingDate,
            TagField::DiscNumber => ItemKey::DiscNumber,
            TagField::Performer => ItemKey::Performer,
            TagField::Title => ItemKey::TrackTitle,
            TagField::TrackNumber => ItemKey::TrackNumber,
            TagField::Year => ItemKey::Year,
        }
    }

    fn collect(tag: &Tag) -> RawTags {
        TagField::ALL
            .into_iter()
            .filter_map(|field| {
                tag.get_string(&Self::item_key(field))
                    .map(|value| (field.key().to_string(), value.to_string()))
            })
            .collect()
    }
}

impl TagReader for LoftyTagReader {
    fn name(&self) -> &str {
        "lofty"
    }

    fn read(&self, path: &Path) -> Result<Option<RawTags>, TagReadError> {
        let tagged_file = lofty::read_from_path(path).map_err(|e| match e.kind() {
            ErrorKind::Io(io) => TagReadError::Io {
                path: path.to_path_buf(),
                reason: io.to_string(),
            },
            _ => TagReadError::HeaderNotFound {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        Ok(tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .map(Self::collect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Builds a FLAC stream with no audio frames: STREAMINFO followed by a
    /// VORBIS_COMMENT block holding `comments`.
    fn minimal_flac(comments: &[&str]) -> Vec<u8> {
        let mut bytes = b"fLaC".to_vec();

        // STREAMINFO: 4096-sample blocks, 44.1 kHz, stereo, 16 bit.
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 34]);
        bytes.extend_from_slice(&4096u16.to_be_bytes());
        bytes.extend_from_slice(&4096u16.to_be_bytes());
        bytes.extend_from_slice(&[0; 6]);
        let packed: u64 = (44_100 << 44) | (1 << 41) | (15 << 36);
        bytes.extend_from_slice(&packed.to_be_bytes());
        bytes.extend_from_slice(&[0; 16]);

        let vendor = b"transmirror";
        let mut block = Vec::new();
        block.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
        block.extend_from_slice(vendor);
        block.extend_from_slice(&(comments.len() as u32).to_le_bytes());
        for comment in comments {
            block.extend_from_slice(&(comment.len() as u32).to_le_bytes());
            block.extend_from_slice(comment.as_bytes());
        }

        let length = (block.len() as u32).to_be_bytes();
        bytes.push(0x80 | 4);
        bytes.extend_from_slice(&length[1..]);
        bytes.extend_from_slice(&block);
        bytes
    }

    #[test]
    fn test_reads_every_allowed_vorbis_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tagged.flac");
        std::fs::write(
            &path,
            minimal_flac(&[
                "ARTIST=X",
                "TITLE=Y",
                "ALBUM=Z",
                "TRACKNUMBER=3/12",
                "DISCNUMBER=1/2",
                "DATE=2003-11-02",
                "PERFORMER=P",
                "GENRE=Ignored",
            ]),
        )
        .unwrap();

        let raw = LoftyTagReader::new().read(&path).unwrap().unwrap();

        let expected = [
            ("artist", "X"),
            ("title", "Y"),
            ("album", "Z"),
            ("tracknumber", "3/12"),
            ("discnumber", "1/2"),
            ("date", "2003-11-02"),
            ("performer", "P"),
        ];
        for (key, value) in expected {
            assert_eq!(raw.get(key).map(String::as_str), Some(value), "field {}", key);
        }
        assert_eq!(raw.len(), expected.len());
    }

    #[test]
    fn test_garbage_file_reports_header_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.flac");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"this is not a flac stream at all").unwrap();

        let err = LoftyTagReader::new().read(&path).unwrap_err();
        assert!(matches!(err, TagReadError::HeaderNotFound { .. }));
    }

    #[test]
    fn test_missing_file_reports_io() {
        let err = LoftyTagReader::new()
            .read(Path::new("/nonexistent/file.flac"))
            .unwrap_err();
        assert!(matches!(err, TagReadError::Io { .. }));
    }
}
