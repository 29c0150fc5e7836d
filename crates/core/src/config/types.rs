use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;
use crate::destination::DestinationConfig;
use crate::mounts::MountConfig;
use crate::processor::ProcessorConfig;
use crate::tags::TagsConfig;

/// Root configuration; every section is optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub destination: DestinationConfig,
    #[serde(default)]
    pub processor: ProcessorConfig,
    #[serde(default)]
    pub mounts: MountConfig,
    #[serde(default)]
    pub tags: TagsConfig,
}
