use std::{error::Error, fmt, io, path::PathBuf};
use pedometer::ConfigError;

#[derive(Debug)]
pub enum AppError
{
    Usage,
    InvalidPath(PathBuf),
    Io(io::Error),
    Csv(csv::Error),
    Toml(toml::de::Error),
    Config(ConfigError),
}

impl Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "Usage: test-pedometer <samples.csv> [config.toml]"),
            Self::InvalidPath(path) => write!(f, "Cannot derive an output name from {}", path.display()),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Csv(err) => write!(f, "CSV error: {}", err),
            Self::Toml(err) => write!(f, "Config file error: {}", err),
            Self::Config(err) => write!(f, "Invalid configuration: {}", err),
        }
    }
}

impl From<io::Error> for AppError
{
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<csv::Error> for AppError
{
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<toml::de::Error> for AppError
{
    fn from(err: toml::de::Error) -> Self {
        AppError::Toml(err)
    }
}

impl From<ConfigError> for AppError
{
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}
