#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the analyzer crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the forge client, the pipeline and the CLI.
///
/// Variants are split along the recovery boundaries of a run: forge failures
/// abort listing but only skip a repository during enrichment, while I/O
/// failures skip a single project file. Credentials never appear in messages.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors raised while creating the output directory or writing
    /// a project file.
    #[error("failed to write {path:?}: {source}")]
    Io {
        /// Location of the file or directory being written.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML encoding errors raised while serializing frontmatter.
    #[error("failed to serialize frontmatter: {source}")]
    Serialize {
        /// Source encoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when a forge response body is not the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Resource that produced the undecodable body.
        url:    String,
        /// Underlying decoding error.
        source: serde_json::Error
    },
    /// Returned when run configuration or forge data violates invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// The forge answered with a non-success, non-throttling status.
    #[error("forge request failed with status {status}: {body}")]
    ForgeRequest {
        /// HTTP status code returned by the forge.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body:   String
    },
    /// The request never produced an HTTP response.
    #[error("forge transport error: {message}")]
    Transport {
        /// Human readable message describing the transport failure.
        message: String
    },
    /// Throttling persisted past the configured retry cap.
    #[error("gave up on {url} after {attempts} throttled attempts")]
    ThrottleExhausted {
        /// Resource that kept answering with HTTP 429.
        url:      String,
        /// Number of throttled responses observed.
        attempts: u32
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a transport error from the provided displayable value.
    pub fn transport<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Transport {
            message: message.into()
        }
    }

    /// Returns the HTTP status when the error originated from a forge reply.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ForgeRequest {
                status, ..
            } => Some(*status),
            _ => None
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file or directory that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
