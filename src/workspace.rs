//! The Kitchen and Bin directories, and where each package lives inside them.

use anyhow::Result;
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::error::ChewError;
use crate::runtime::Runtime;

/// Default root holding one cloned repository per package.
pub const DEFAULT_KITCHEN: &str = "/usr/local/Kitchen";
/// Default directory holding one symlink per package.
pub const DEFAULT_BIN: &str = "/usr/local/bin";

/// A name only maps to a package directory when it is a single plain path
/// component, so `.`, `..` or `a/b` never reach outside the Kitchen.
pub fn is_package_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Path bookkeeping for the Kitchen and Bin roots.
///
/// Every path handed out is built from the configured roots, so nothing
/// depends on the process working directory.
pub struct Workspace<'a, R: Runtime> {
    runtime: &'a R,
    kitchen: PathBuf,
    bin: PathBuf,
}

impl<'a, R: Runtime> Workspace<'a, R> {
    pub fn new(runtime: &'a R, kitchen: impl Into<PathBuf>, bin: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            kitchen: kitchen.into(),
            bin: bin.into(),
        }
    }

    /// Create the Kitchen if it is missing.
    #[tracing::instrument(skip(self))]
    pub fn ensure_kitchen(&self) -> Result<&Path> {
        self.ensure_dir(&self.kitchen)?;
        Ok(&self.kitchen)
    }

    /// Create the Bin directory if it is missing.
    #[tracing::instrument(skip(self))]
    pub fn ensure_bin(&self) -> Result<&Path> {
        self.ensure_dir(&self.bin)?;
        Ok(&self.bin)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.runtime.is_dir(dir) {
            return Ok(());
        }
        debug!("Creating {:?}", dir);
        self.runtime
            .create_dir_all(dir)
            .map_err(|e| ChewError::workspace("Failed to create", dir, e))?;
        Ok(())
    }

    /// `<Kitchen>/<name>`
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.kitchen.join(name)
    }

    /// `<Kitchen>/<name>/<name>`, the executable a package is expected to ship.
    pub fn executable_path(&self, name: &str) -> PathBuf {
        self.package_dir(name).join(name)
    }

    /// `<Bin>/<name>`
    pub fn link_path(&self, name: &str) -> PathBuf {
        self.bin.join(name)
    }

    pub fn is_installed(&self, name: &str) -> bool {
        is_package_name(name) && self.runtime.exists(&self.package_dir(name))
    }
}
