//! Types for the tags module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata fields carried from source to destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagField {
    Album,
    Artist,
    Date,
    DiscNumber,
    Performer,
    Title,
    TrackNumber,
    Year,
}

impl TagField {
    /// Every known field.
    pub const ALL: [TagField; 8] = [
        Self::Album,
        Self::Artist,
        Self::Date,
        Self::DiscNumber,
        Self::Performer,
        Self::Title,
        Self::TrackNumber,
        Self::Year,
    ];

    /// The lowercase key readers use for this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Date => "date",
            Self::DiscNumber => "discnumber",
            Self::Performer => "performer",
            Self::Title => "title",
            Self::TrackNumber => "tracknumber",
            Self::Year => "year",
        }
    }

    /// Looks a field up by its key, ignoring ASCII case.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Non-empty tag values for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    values: BTreeMap<TagField, String>,
}

impl TagSet {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `field`.
    ///
    /// Values are stored as given. Blank values are dropped and any
    /// previous value for the field is kept.
    pub fn insert(&mut self, field: TagField, value: impl AsRef<str>) {
        let value = value.as_ref();
        if !value.trim().is_empty() {
            self.values.insert(field, value.to_string());
        }
    }

    /// Builder form of [`TagSet::insert`].
    pub fn with(mut self, field: TagField, value: impl AsRef<str>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the value for `field`, if present.
    pub fn get(&self, field: TagField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Whether `field` has a value.
    pub fn contains(&self, field: TagField) -> bool {
        self.values.contains_key(&field)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates fields in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (TagField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Fills `year` from the first four characters of `date` when only
    /// `date` is present.
    pub fn derive_year(&mut self) {
        if self.contains(TagField::Year) {
            return;
        }
        if let Some(date) = self.get(TagField::Date) {
            let year: String = date.trim_start().chars().take(4).collect();
            self.insert(TagField::Year, year);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_round_trip() {
        for field in TagField::ALL {
            assert_eq!(TagField::from_key(field.key()), Some(field));
        }
        assert_eq!(TagField::from_key("TRACKNUMBER"), Some(TagField::TrackNumber));
        assert_eq!(TagField::from_key("genre"), None);
    }

    #[test]
    fn test_insert_drops_blank_values() {
        let mut tags = TagSet::new();
        tags.insert(TagField::Title, "  Song  ");
        tags.insert(TagField::Artist, "");
        tags.insert(TagField::Album, "   ");
        assert!(tags.contains(TagField::Title));
        assert!(!tags.contains(TagField::Artist));
        assert!(!tags.contains(TagField::Album));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_insert_keeps_surrounding_whitespace() {
        let tags = TagSet::new()
            .with(TagField::Title, "  Song  ")
            .with(TagField::Artist, "Artist\t");
        assert_eq!(tags.get(TagField::Title), Some("  Song  "));
        assert_eq!(tags.get(TagField::Artist), Some("Artist\t"));
    }

    #[test]
    fn test_derive_year_from_date() {
        let mut tags = TagSet::new().with(TagField::Date, "2003-11-02");
        tags.derive_year();
        assert_eq!(tags.get(TagField::Year), Some("2003"));
    }

    #[test]
    fn test_derive_year_keeps_existing_year() {
        let mut tags = TagSet::new()
            .with(TagField::Date, "2003-11-02")
            .with(TagField::Year, "1999");
        tags.derive_year();
        assert_eq!(tags.get(TagField::Year), Some("1999"));
    }

    #[test]
    fn test_derive_year_without_date() {
        let mut tags = TagSet::new().with(TagField::Title, "Song");
        tags.derive_year();
        assert!(!tags.contains(TagField::Year));
    }

    #[test]
    fn test_iter_is_ordered() {
        let tags = TagSet::new()
            .with(TagField::Title, "T")
            .with(TagField::Album, "A");
        let fields: Vec<TagField> = tags.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![TagField::Album, TagField::Title]);
    }
}
