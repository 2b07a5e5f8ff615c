use serde::Deserialize;

/// Status value the fridge uses for a successful lookup.
pub const STATUS_OK: &str = "OK";

/// Body returned by the fridge for `GET <fridge-url>?<package>`.
///
/// On success `content` holds the repository URL, otherwise an error message.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LookupResponse {
    pub status: String,
    pub content: String,
}

impl LookupResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}
