use anyhow::Result;
use log::{debug, warn};

use crate::{
    error::ChewError,
    fridge::ResolvePackage,
    git::Vcs,
    report,
    runtime::Runtime,
    workspace::{Workspace, is_package_name},
};

use super::config::{Config, Settings};

/// Clone a package into the Kitchen and link its executable into Bin.
#[tracing::instrument(skip(runtime, settings))]
pub async fn install<R: Runtime + 'static>(
    runtime: R,
    package: &str,
    settings: Settings,
) -> Result<()> {
    let config = Config::new(runtime, settings)?;
    run(package, config).await
}

#[tracing::instrument(skip(config))]
pub async fn run<R: Runtime, P: ResolvePackage, V: Vcs>(
    package: &str,
    config: Config<R, P, V>,
) -> Result<()> {
    if !is_package_name(package) {
        return Err(ChewError::PackageLookup {
            package: package.to_string(),
            message: "not a package name".to_string(),
        }
        .into());
    }

    debug!("Resolving {}", package);
    let repo_url = config.resolver.resolve(package).await?;

    let workspace = Workspace::new(&config.runtime, &config.kitchen, &config.bin);
    workspace.ensure_kitchen()?;

    let package_dir = workspace.package_dir(package);
    if workspace.is_installed(package) {
        return Err(ChewError::PackageExists {
            package: package.to_string(),
            path: package_dir,
        }
        .into());
    }

    report::step(format!("Cloning {} into {}", repo_url, package_dir.display()));
    config.vcs.clone_repo(&repo_url, &package_dir)?;

    let executable = workspace.executable_path(package);
    if !config.runtime.exists(&executable) {
        warn!(
            "{} has no executable at {:?}; the link will dangle",
            package, executable
        );
    }

    workspace.ensure_bin()?;
    let link = workspace.link_path(package);
    debug!("Linking {:?} -> {:?}", link, executable);
    config
        .runtime
        .symlink(&executable, &link)
        .map_err(|e| ChewError::workspace("Failed to link", &link, e))?;

    report::success(format!("Installed {} to {}", package, link.display()));
    Ok(())
}
