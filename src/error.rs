// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Playback(PlaybackError),
}

/// Fatal playback failures surfaced to the user.
///
/// Both variants are handled identically: show a toast, leave the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The engine reported a decode/format error for the source.
    UnsupportedSource(String),

    /// The stream did not become ready before the load watchdog fired.
    LoadTimeout,
}

impl PlaybackError {
    /// Returns the i18n message key for the user-facing toast.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PlaybackError::UnsupportedSource(_) => "notification-load-error-format",
            PlaybackError::LoadTimeout => "notification-load-error-timeout",
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::UnsupportedSource(msg) => {
                write!(f, "Unsupported source: {}", msg)
            }
            PlaybackError::LoadTimeout => write!(f, "Stream did not become ready in time"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Playback(e) => write!(f, "Playback Error: {}", e),
        }
    }
}

impl From<PlaybackError> for Error {
    fn from(err: PlaybackError) -> Self {
        Error::Playback(err)
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

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn playback_error_i18n_keys() {
        assert_eq!(
            PlaybackError::UnsupportedSource("codec".into()).i18n_key(),
            "notification-load-error-format"
        );
        assert_eq!(
            PlaybackError::LoadTimeout.i18n_key(),
            "notification-load-error-timeout"
        );
    }

    #[test]
    fn playback_error_display() {
        let err = PlaybackError::UnsupportedSource("no h264 decoder".to_string());
        assert!(format!("{}", err).contains("no h264 decoder"));
    }

    #[test]
    fn from_playback_error_wraps_variant() {
        let err: Error = PlaybackError::LoadTimeout.into();
        assert!(matches!(err, Error::Playback(PlaybackError::LoadTimeout)));
    }
}
