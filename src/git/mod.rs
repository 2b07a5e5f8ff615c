//! Version control operations, run through an external `git` binary.

use anyhow::Result;
use log::debug;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use crate::error::{ChewError, SubprocessAction};

pub const DEFAULT_GIT: &str = "git";

#[cfg_attr(test, mockall::automock)]
pub trait Vcs: Send + Sync {
    /// Clone `url` into `dest`, which must not exist yet.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Pull the remote's default branch into the checkout at `repo_dir`.
    fn pull(&self, repo_dir: &Path) -> Result<()>;
}

/// [`Vcs`] backed by the git command line. Output goes straight to the terminal.
pub struct GitCli {
    program: OsString,
}

impl GitCli {
    pub fn new(program: Option<OsString>) -> Self {
        Self {
            program: program.unwrap_or_else(|| OsString::from(DEFAULT_GIT)),
        }
    }

    fn run(&self, action: SubprocessAction, args: &[&OsStr]) -> Result<()> {
        let display = std::iter::once(self.program.as_os_str())
            .chain(args.iter().copied())
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Running {}", display);

        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|e| ChewError::Subprocess {
                action,
                command: display.clone(),
                outcome: format!("could not be started: {}", e),
            })?;

        if !status.success() {
            return Err(ChewError::Subprocess {
                action,
                command: display,
                outcome: format!("exited with {}", status),
            }
            .into());
        }

        Ok(())
    }
}

impl Vcs for GitCli {
    #[tracing::instrument(skip(self))]
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        self.run(
            SubprocessAction::Clone,
            &[
                OsStr::new("clone"),
                OsStr::new("--"),
                OsStr::new(url),
                dest.as_os_str(),
            ],
        )
    }

    #[tracing::instrument(skip(self))]
    fn pull(&self, repo_dir: &Path) -> Result<()> {
        self.run(
            SubprocessAction::Pull,
            &[
                OsStr::new("-C"),
                repo_dir.as_os_str(),
                OsStr::new("pull"),
                OsStr::new("origin"),
                OsStr::new("HEAD"),
            ],
        )
    }
}
