use anyhow::Result;
use log::debug;

use crate::{
    error::ChewError, fridge::ResolvePackage, git::Vcs, report, runtime::Runtime,
    workspace::Workspace,
};

use super::config::{Config, Settings};

/// Pull the latest changes of an installed package. The Bin link is left alone.
#[tracing::instrument(skip(runtime, settings))]
pub fn update<R: Runtime + 'static>(runtime: R, package: &str, settings: Settings) -> Result<()> {
    let config = Config::new(runtime, settings)?;
    run(package, config)
}

#[tracing::instrument(skip(config))]
pub fn run<R: Runtime, P: ResolvePackage, V: Vcs>(
    package: &str,
    config: Config<R, P, V>,
) -> Result<()> {
    let workspace = Workspace::new(&config.runtime, &config.kitchen, &config.bin);
    workspace.ensure_kitchen()?;

    let package_dir = workspace.package_dir(package);
    if !workspace.is_installed(package) {
        return Err(ChewError::PackageNotFound {
            package: package.to_string(),
            path: package_dir,
        }
        .into());
    }

    debug!("Updating {} in {:?}", package, package_dir);
    report::step(format!("Pulling {}", package_dir.display()));
    config.vcs.pull(&package_dir)?;

    report::success(format!("Updated {}", package));
    Ok(())
}
