// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Svg(String),
    Config(String),
    /// Network transfer failed (connection, timeout, HTTP status, size limit).
    Fetch(String),
    /// Fetched bytes could not be decoded into an image.
    Decode(String),
    /// The request carried no locator, or an empty one.
    MissingLocator,
    /// The locator uses a scheme the loader cannot serve.
    UnsupportedLocator(String),
    Placeholder(PlaceholderError),
}

/// Reasons a placeholder encoding could not be turned into a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    /// Requested bitmap size is zero or above the supported maximum.
    InvalidDimensions { width: u32, height: u32 },

    /// Encoding contains characters outside the base83 alphabet.
    NonAscii,

    /// Encoding was rejected by the decoder (bad length, bad digits, ...).
    Malformed(String),
}

impl fmt::Display for PlaceholderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderError::InvalidDimensions { width, height } => {
                write!(f, "Unsupported placeholder size {}x{}", width, height)
            }
            PlaceholderError::NonAscii => write!(f, "Placeholder encoding is not ASCII"),
            PlaceholderError::Malformed(msg) => write!(f, "Malformed placeholder: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Svg(e) => write!(f, "SVG Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::MissingLocator => write!(f, "No image locator supplied"),
            Error::UnsupportedLocator(locator) => {
                write!(f, "Unsupported image locator: {}", locator)
            }
            Error::Placeholder(e) => write!(f, "Placeholder Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<PlaceholderError> for Error {
    fn from(err: PlaceholderError) -> Self {
        Error::Placeholder(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
