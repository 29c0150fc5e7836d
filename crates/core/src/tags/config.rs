//! Configuration for the tags module.

use serde::{Deserialize, Serialize};

use super::types::TagField;

/// Which fields are copied from source files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsConfig {
    /// Allow-list of fields; anything else a reader reports is dropped.
    #[serde(default = "default_fields")]
    pub fields: Vec<TagField>,
}

fn default_fields() -> Vec<TagField> {
    TagField::ALL.to_vec()
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
        }
    }
}
