//! Failure classes that end a chew run, each with its own exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for errors that are not a [`ChewError`].
pub const EXIT_UNEXPECTED: u8 = 1;
/// Exit code clap uses for bad arguments.
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_LOOKUP: u8 = 3;
pub const EXIT_NETWORK: u8 = 4;
pub const EXIT_RESPONSE_FORMAT: u8 = 5;
pub const EXIT_PACKAGE_EXISTS: u8 = 6;
pub const EXIT_PACKAGE_NOT_FOUND: u8 = 7;
pub const EXIT_SUBPROCESS: u8 = 8;
pub const EXIT_WORKSPACE: u8 = 9;

/// Domain errors raised by chew operations.
///
/// These travel inside `anyhow::Error`; `main` downcasts to pick the exit code.
#[derive(Debug, Error)]
pub enum ChewError {
    /// The fridge answered with a status other than `OK`.
    #[error("Could not find package {package}: {message}")]
    PackageLookup { package: String, message: String },

    /// The fridge could not be reached.
    #[error("Could not reach the fridge at {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The fridge answered with something that is not a lookup response.
    #[error("Unexpected response from the fridge at {url}: {reason}")]
    ResponseFormat { url: String, reason: String },

    #[error("Package {package} is already in the Kitchen at {}. Try `chew update {package}` instead.", .path.display())]
    PackageExists { package: String, path: PathBuf },

    #[error("Package {package} is not installed (no {} in the Kitchen).", .path.display())]
    PackageNotFound { package: String, path: PathBuf },

    /// An external command (git) could not be started or exited non-zero.
    #[error("{action} failed: `{command}` {outcome}")]
    Subprocess {
        action: SubprocessAction,
        command: String,
        outcome: String,
    },

    /// A Kitchen or Bin filesystem operation failed.
    #[error("{what} {}: {reason}", .path.display())]
    Workspace {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },
}

/// Which external step a [`ChewError::Subprocess`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubprocessAction {
    Clone,
    Pull,
}

impl std::fmt::Display for SubprocessAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubprocessAction::Clone => write!(f, "Clone"),
            SubprocessAction::Pull => write!(f, "Pull"),
        }
    }
}

impl ChewError {
    pub fn workspace(
        what: &'static str,
        path: impl Into<PathBuf>,
        source: anyhow::Error,
    ) -> Self {
        ChewError::Workspace {
            what,
            path: path.into(),
            reason: format!("{:#}", source),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ChewError::PackageLookup { .. } => EXIT_LOOKUP,
            ChewError::Network { .. } => EXIT_NETWORK,
            ChewError::ResponseFormat { .. } => EXIT_RESPONSE_FORMAT,
            ChewError::PackageExists { .. } => EXIT_PACKAGE_EXISTS,
            ChewError::PackageNotFound { .. } => EXIT_PACKAGE_NOT_FOUND,
            ChewError::Subprocess { .. } => EXIT_SUBPROCESS,
            ChewError::Workspace { .. } => EXIT_WORKSPACE,
        }
    }
}

/// Map any error from a command to the process exit code.
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<ChewError>()
        .map(ChewError::exit_code)
        .unwrap_or(EXIT_UNEXPECTED)
}
