use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix of environment variable overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "TRANSMIRROR_";

/// Load configuration: defaults, then the optional TOML file, then
/// `TRANSMIRROR_*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.converter.encoder_quality, 2);
        assert_eq!(config.processor.oversubscription, 2);
        assert_eq!(config.destination.replacement, '_');
    }

    #[test]
    fn test_load_config_from_str_partial_section() {
        let toml = r#"
[converter]
encoder_quality = 0
encoder_path = "/opt/lame/bin/lame"

[destination]
restricted_filesystems = ["vfat"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.converter.encoder_quality, 0);
        assert_eq!(config.converter.decoder_path.to_str(), Some("ffmpeg"));
        assert_eq!(config.destination.restricted_filesystems, vec!["vfat"]);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let result = load_config_from_str("[converter]\nencoder_quality = \"high\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[processor]
max_workers = 3

[mounts]
table_path = "/tmp/mounts"
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.processor.max_workers, Some(3));
        assert_eq!(config.mounts.table_path.to_str(), Some("/tmp/mounts"));
        assert_eq!(config.converter.target_extension, "mp3");
    }
}
