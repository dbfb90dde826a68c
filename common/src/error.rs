use crate::json::Encoding;
use std::io::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to create directory {path}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },
    #[error("{0} path is not a directory")]
    NotADirectory(String),
    #[error("Unable to open {path}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("Unable to create {path}")]
    Create {
        path: String,
        source: std::io::Error,
    },
    #[error("Unable to read {path}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Unable to write {path}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Unable to serialize data to json")]
    Serialize(#[source] serde_json::Error),
    #[error("Unable to parse json from {origin}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    #[error("Character {character:?} cannot be encoded as {encoding}")]
    Encode { character: char, encoding: Encoding },
    #[error("Content of {path} is not valid {encoding} (at byte {offset})")]
    Decode {
        path: String,
        encoding: Encoding,
        offset: usize,
    },
    #[error("Unknown encoding {0}")]
    UnknownEncoding(String),
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),
    #[error("Unable to parse config file {path}")]
    Config {
        path: String,
        source: serde_yaml::Error,
    },
}

impl Error {
    /// Kind of the underlying io error, if this error comes from a file system call.
    pub fn io_kind(&self) -> Option<ErrorKind> {
        match self {
            Error::CreateDir { source, .. }
            | Error::Open { source, .. }
            | Error::Create { source, .. }
            | Error::Read { source, .. }
            | Error::Write { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub fn format_error(error: anyhow::Error) -> String {
    error
        .chain()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\nCaused by:\n    ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_format_error_chain() {
        let io = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        let err: anyhow::Error = Err::<(), _>(Error::CreateDir {
            path: "/root/forbidden".into(),
            source: io,
        })
        .context("mkdir failed")
        .unwrap_err();
        assert_eq!(
            format_error(err),
            "mkdir failed\nCaused by:\n    Unable to create directory /root/forbidden\nCaused by:\n    denied"
        );
    }

    #[test]
    fn test_io_kind() {
        let err = Error::Open {
            path: "nope".into(),
            source: std::io::Error::from(ErrorKind::NotFound),
        };
        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
        assert_eq!(Error::NotADirectory("x".into()).io_kind(), None);
    }
}
