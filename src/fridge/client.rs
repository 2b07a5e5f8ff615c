use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::error::ChewError;

use super::types::LookupResponse;

/// Default lookup endpoint; the package name is appended as the query string.
pub const DEFAULT_FRIDGE_URL: &str = "https://chew.meanbee.com/fridge/";

/// Maps a package short name to its repository URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResolvePackage: Send + Sync {
    async fn resolve(&self, package: &str) -> Result<String>;
}

/// HTTP client for the fridge lookup service.
pub struct Fridge {
    pub client: Client,
    pub fridge_url: String,
}

impl Fridge {
    #[tracing::instrument(skip(client, fridge_url))]
    pub fn new(client: Client, fridge_url: Option<String>) -> Self {
        let fridge_url = fridge_url.unwrap_or_else(|| DEFAULT_FRIDGE_URL.to_string());
        Self { client, fridge_url }
    }

    /// The name is appended verbatim, not URL-encoded.
    pub fn lookup_url(&self, package: &str) -> String {
        format!("{}?{}", self.fridge_url, package)
    }
}

#[async_trait]
impl ResolvePackage for Fridge {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, package: &str) -> Result<String> {
        let url = self.lookup_url(package);
        debug!("Looking up {} at {}...", package, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ChewError::Network {
                url: url.clone(),
                source,
            })?;

        // Failures are reported in the body, so the HTTP status is only logged.
        debug!("Fridge answered with HTTP {}", response.status());

        let body = response.text().await.map_err(|source| ChewError::Network {
            url: url.clone(),
            source,
        })?;

        let parsed: LookupResponse =
            serde_json::from_str(&body).map_err(|e| ChewError::ResponseFormat {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !parsed.is_ok() {
            debug!("Lookup for {} failed with status {}", package, parsed.status);
            return Err(ChewError::PackageLookup {
                package: package.to_string(),
                message: parsed.content,
            }
            .into());
        }

        debug!("Resolved {} to {}", package, parsed.content);
        Ok(parsed.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fridge_for(server: &mockito::ServerGuard) -> Fridge {
        Fridge::new(Client::new(), Some(format!("{}/fridge/", server.url())))
    }

    fn chew_error(err: &anyhow::Error) -> &ChewError {
        err.downcast_ref::<ChewError>()
            .expect("expected a ChewError")
    }

    #[test]
    fn test_default_fridge_url() {
        let fridge = Fridge::new(Client::new(), None);
        assert_eq!(fridge.fridge_url, DEFAULT_FRIDGE_URL);
        assert_eq!(
            fridge.lookup_url("dac"),
            "https://chew.meanbee.com/fridge/?dac"
        );
    }

    #[test]
    fn test_lookup_url_is_not_encoded() {
        let fridge = Fridge::new(Client::new(), Some("http://h/fridge/".into()));
        assert_eq!(fridge.lookup_url("a&b=c"), "http://h/fridge/?a&b=c");
    }

    #[tokio::test]
    async fn test_resolve_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fridge/?pkg")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"OK","content":"git@host:org/pkg.git"}"#)
            .create_async()
            .await;

        let fridge = fridge_for(&server);
        let url = fridge.resolve("pkg").await.unwrap();

        mock.assert_async().await;
        assert_eq!(url, "git@host:org/pkg.git");
    }

    #[tokio::test]
    async fn test_resolve_not_ok_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fridge/?pkg")
            .with_status(200)
            .with_body(r#"{"status":"ERROR","content":"not found"}"#)
            .create_async()
            .await;

        let fridge = fridge_for(&server);
        let err = fridge.resolve("pkg").await.unwrap_err();

        mock.assert_async().await;
        match chew_error(&err) {
            ChewError::PackageLookup { package, message } => {
                assert_eq!(package, "pkg");
                assert_eq!(message, "not found");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_reads_body_on_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fridge/?gone")
            .with_status(404)
            .with_body(r#"{"status":"ERROR","content":"no such package"}"#)
            .create_async()
            .await;

        let fridge = fridge_for(&server);
        let err = fridge.resolve("gone").await.unwrap_err();
        assert!(matches!(
            chew_error(&err),
            ChewError::PackageLookup { message, .. } if message == "no such package"
        ));
    }

    #[tokio::test]
    async fn test_resolve_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fridge/?pkg")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let fridge = fridge_for(&server);
        let err = fridge.resolve("pkg").await.unwrap_err();
        assert!(matches!(chew_error(&err), ChewError::ResponseFormat { .. }));
    }

    #[tokio::test]
    async fn test_resolve_unreachable() {
        // Nothing listens on port 9 of localhost
        let fridge = Fridge::new(Client::new(), Some("http://127.0.0.1:9/fridge/".into()));
        let err = fridge.resolve("pkg").await.unwrap_err();
        assert!(matches!(chew_error(&err), ChewError::Network { .. }));
    }
}
