//! Errors are split by how they are handled.
//! The track inserter propagates every `LoaderError` and terminates.
//! The seed phase catches them, rolls back, and reports a failure to its caller instead.

use std::error;
use std::fmt;

/// Represents a loader error.
#[derive(Debug)]
pub enum LoaderError {
    /// Database driver error, including connection refusal and constraint violations.
    Database(sqlx::Error),

    /// Configuration could not be read or deserialized.
    Config(config::ConfigError),

    /// Track lookup file is malformed.
    TrackFile(csv::Error),

    /// Track lookup file contains no rows.
    EmptyTrackFile(String),

    /// A setting has a value the loaders cannot use.
    InvalidSetting(String),

    /// Standard input/output error.
    Io(std::io::Error),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use LoaderError::*;
        match *self {
            Database(ref e) => write!(f, "database error: {}", e),
            Config(ref e) => write!(f, "configuration error: {}", e),
            TrackFile(ref e) => write!(f, "unable to read track file: {}", e),
            EmptyTrackFile(ref path) => write!(f, "track file {} contains no rows", path),
            InvalidSetting(ref s) => write!(f, "invalid setting: {}", s),
            Io(ref e) => write!(f, "io error: {}", e),
        }
    }
}

impl error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use LoaderError::*;
        match *self {
            Database(ref e) => Some(e),
            Config(ref e) => Some(e),
            TrackFile(ref e) => Some(e),
            Io(ref e) => Some(e),
            EmptyTrackFile(_) | InvalidSetting(_) => None,
        }
    }
}

impl From<sqlx::Error> for LoaderError {
    fn from(error: sqlx::Error) -> Self {
        LoaderError::Database(error)
    }
}

impl From<config::ConfigError> for LoaderError {
    fn from(error: config::ConfigError) -> Self {
        LoaderError::Config(error)
    }
}

impl From<csv::Error> for LoaderError {
    fn from(error: csv::Error) -> Self {
        LoaderError::TrackFile(error)
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(error: std::io::Error) -> Self {
        LoaderError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn loader_error_test() {
        let e = LoaderError::EmptyTrackFile("/tmp/track.csv".to_string());
        assert_eq!(format!("{}", e), "track file /tmp/track.csv contains no rows");
        assert!(e.source().is_none());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed");
        let e: LoaderError = io.into();
        assert_eq!(format!("{}", e), "io error: stdin closed");
        assert!(e.source().is_some());
    }
}
