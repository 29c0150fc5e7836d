use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Encoder quality is a VBR level (0-9)
/// - Target extension is non-empty and has no dot
/// - Decoder and encoder paths are set
/// - Worker settings are non-zero
/// - The replacement character is not itself forbidden
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let converter = &config.converter;
    if converter.encoder_quality > 9 {
        return Err(ConfigError::ValidationError(format!(
            "converter.encoder_quality must be between 0 and 9, got {}",
            converter.encoder_quality
        )));
    }
    if converter.target_extension.is_empty() || converter.target_extension.contains('.') {
        return Err(ConfigError::ValidationError(format!(
            "converter.target_extension must be a bare extension, got {:?}",
            converter.target_extension
        )));
    }
    if converter.decoder_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.decoder_path cannot be empty".to_string(),
        ));
    }
    if converter.encoder_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.encoder_path cannot be empty".to_string(),
        ));
    }

    if config.processor.oversubscription == 0 {
        return Err(ConfigError::ValidationError(
            "processor.oversubscription cannot be 0".to_string(),
        ));
    }
    if config.processor.max_workers == Some(0) {
        return Err(ConfigError::ValidationError(
            "processor.max_workers cannot be 0".to_string(),
        ));
    }

    let destination = &config.destination;
    if destination.forbidden_chars.contains(destination.replacement) {
        return Err(ConfigError::ValidationError(format!(
            "destination.replacement {:?} is itself a forbidden character",
            destination.replacement
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_quality_out_of_range() {
        let mut config = Config::default();
        config.converter.encoder_quality = 10;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("encoder_quality")));
    }

    #[test]
    fn test_validate_dotted_extension() {
        let mut config = Config::default();
        config.converter.target_extension = ".mp3".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_workers() {
        let mut config = Config::default();
        config.processor.max_workers = Some(0);
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.processor.oversubscription = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_forbidden_replacement() {
        let mut config = Config::default();
        config.destination.replacement = '?';
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_encoder_path() {
        let mut config = Config::default();
        config.converter.encoder_path = Default::default();
        assert!(validate_config(&config).is_err());
    }
}
