pub mod config;
pub mod converter;
pub mod destination;
pub mod discovery;
pub mod metrics;
pub mod mounts;
pub mod processor;
pub mod tags;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use converter::{
    ConversionJob, ConversionOutcome, Converter, ConverterConfig, ConverterError, PipedConverter,
    SkipReason, SourceKind,
};
pub use destination::{DestinationConfig, DestinationError, DestinationResolver};
pub use discovery::{InputError, InputSet};
pub use mounts::{FilesystemResolver, MountEntry, MountError, MountTable, ProcMountTable};
pub use processor::{
    BatchReport, FileOutcome, FileProcessor, ItemHandler, ProcessorConfig, WorkDistributor,
    WorkQueue,
};
pub use tags::{LoftyTagReader, TagExtractor, TagField, TagReader, TagSet, TagsConfig};
