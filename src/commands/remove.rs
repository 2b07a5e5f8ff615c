use anyhow::Result;
use log::debug;

use crate::{
    error::ChewError, fridge::ResolvePackage, git::Vcs, report, runtime::Runtime,
    workspace::Workspace,
};

use super::config::{Config, Settings};

/// Delete a package's directory from the Kitchen and its link from Bin.
#[tracing::instrument(skip(runtime, settings))]
pub fn remove<R: Runtime + 'static>(runtime: R, package: &str, settings: Settings) -> Result<()> {
    let config = Config::new(runtime, settings)?;
    run(package, config)
}

#[tracing::instrument(skip(config))]
pub fn run<R: Runtime, P: ResolvePackage, V: Vcs>(
    package: &str,
    config: Config<R, P, V>,
) -> Result<()> {
    let runtime = &config.runtime;
    let workspace = Workspace::new(runtime, &config.kitchen, &config.bin);
    workspace.ensure_kitchen()?;

    let package_dir = workspace.package_dir(package);
    if !workspace.is_installed(package) {
        return Err(ChewError::PackageNotFound {
            package: package.to_string(),
            path: package_dir,
        }
        .into());
    }

    debug!("Removing {:?}", package_dir);
    runtime
        .remove_dir_all(&package_dir)
        .map_err(|e| ChewError::workspace("Failed to remove", &package_dir, e))?;

    workspace.ensure_bin()?;
    let link = workspace.link_path(package);
    if runtime.is_symlink(&link) {
        if let Ok(target) = runtime.read_link(&link) {
            debug!("Removing link {:?} -> {:?}", link, target);
        }
        runtime
            .remove_symlink(&link)
            .map_err(|e| ChewError::workspace("Failed to remove link", &link, e))?;
    } else if runtime.exists(&link) {
        report::warning(format!(
            "{} is not a symlink, leaving it in place",
            link.display()
        ));
    } else {
        debug!("No link at {:?}", link);
    }

    report::success(format!("Removed {}", package));
    Ok(())
}
