use std::{fs, path::Path};
use pedometer::StepConfig;
use crate::error::AppError;

/// Loads the step detection parameters from a TOML file, or the signed sum preset without one.
/// 
pub fn load_config(path: Option<&Path>) -> Result<StepConfig, AppError> {
    match path {
        Some(path) => {
            let config = parse_config(&fs::read_to_string(path)?)?;
            log::info!("Loaded configuration from {}", path.display());
            Ok(config)
        },
        None => {
            log::info!("No config file given, using the signed sum preset");
            Ok(StepConfig::default())
        },
    }
}

/// Parses and validates a TOML config. Omitted fields take the signed sum preset's value.
/// 
pub fn parse_config(contents: &str) -> Result<StepConfig, AppError> {
    let config: StepConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}
