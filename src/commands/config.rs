use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    fridge::{Fridge, ResolvePackage},
    git::{GitCli, Vcs},
    runtime::Runtime,
    workspace::{DEFAULT_BIN, DEFAULT_KITCHEN},
};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// User-supplied overrides, as collected from flags and environment variables.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub kitchen: Option<PathBuf>,
    pub bin: Option<PathBuf>,
    pub fridge_url: Option<String>,
    pub git: Option<OsString>,
}

/// Everything a command needs: the runtime, the remote services and the
/// resolved, absolute Kitchen and Bin roots.
pub struct Config<R: Runtime, P: ResolvePackage, V: Vcs> {
    pub runtime: R,
    pub resolver: P,
    pub vcs: V,
    pub kitchen: PathBuf,
    pub bin: PathBuf,
}

impl<R: Runtime> Config<R, Fridge, GitCli> {
    pub fn new(runtime: R, settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent("chew-cli")
            .timeout(LOOKUP_TIMEOUT)
            .build()?;

        let resolver = Fridge::new(client, settings.fridge_url);
        let vcs = GitCli::new(settings.git);

        Self::with_services(runtime, resolver, vcs, settings.kitchen, settings.bin)
    }
}

impl<R: Runtime, P: ResolvePackage, V: Vcs> Config<R, P, V> {
    /// Resolve the roots against their defaults and the current directory.
    pub fn with_services(
        runtime: R,
        resolver: P,
        vcs: V,
        kitchen: Option<PathBuf>,
        bin: Option<PathBuf>,
    ) -> Result<Self> {
        let kitchen = absolute_root(&runtime, kitchen, DEFAULT_KITCHEN)?;
        let bin = absolute_root(&runtime, bin, DEFAULT_BIN)?;
        debug!("Using Kitchen {:?} and Bin {:?}", kitchen, bin);

        Ok(Self {
            runtime,
            resolver,
            vcs,
            kitchen,
            bin,
        })
    }
}

/// Symlink targets must be absolute, so relative roots are anchored at the
/// current directory once, up front.
fn absolute_root<R: Runtime>(
    runtime: &R,
    configured: Option<PathBuf>,
    default: &str,
) -> Result<PathBuf> {
    let path = configured.unwrap_or_else(|| PathBuf::from(default));
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = runtime
        .current_dir()
        .context("Could not resolve a relative directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fridge::MockResolvePackage;
    use crate::git::MockVcs;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{test_bin_dir, test_home, test_kitchen};
    use mockito::Server;

    #[cfg(unix)]
    #[test]
    fn test_defaults() {
        // Absolute defaults never consult the current directory
        let runtime = MockRuntime::new();
        let config = Config::with_services(
            runtime,
            MockResolvePackage::new(),
            MockVcs::new(),
            None,
            None,
        )
        .unwrap();

        assert_eq!(config.kitchen, PathBuf::from(DEFAULT_KITCHEN));
        assert_eq!(config.bin, PathBuf::from(DEFAULT_BIN));
    }

    #[test]
    fn test_relative_roots_are_anchored() {
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().returning(|| Ok(test_home()));

        let config = Config::with_services(
            runtime,
            MockResolvePackage::new(),
            MockVcs::new(),
            Some(PathBuf::from("Kitchen")),
            Some(PathBuf::from("bin")),
        )
        .unwrap();

        assert_eq!(config.kitchen, test_home().join("Kitchen"));
        assert_eq!(config.bin, test_home().join("bin"));
    }

    #[test]
    fn test_relative_root_without_cwd_fails() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_current_dir()
            .returning(|| Err(anyhow::anyhow!("cwd was deleted")));

        let result = Config::with_services(
            runtime,
            MockResolvePackage::new(),
            MockVcs::new(),
            Some(PathBuf::from("Kitchen")),
            None,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_new_uses_fridge_url_and_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/fridge/?dac")
            .match_header("user-agent", "chew-cli")
            .with_status(200)
            .with_body(r#"{"status":"OK","content":"git@codebasehq.com:meanbee/general/dac.git"}"#)
            .create_async()
            .await;

        let settings = Settings {
            kitchen: Some(test_kitchen()),
            bin: Some(test_bin_dir()),
            fridge_url: Some(format!("{}/fridge/", server.url())),
            ..Default::default()
        };
        let config = Config::new(MockRuntime::new(), settings).unwrap();
        let url = config.resolver.resolve("dac").await.unwrap();

        mock.assert_async().await;
        assert_eq!(url, "git@codebasehq.com:meanbee/general/dac.git");
    }
}
