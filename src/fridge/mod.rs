//! Client for the fridge, the remote service that maps package names to
//! repository URLs.

mod client;
mod types;

pub use client::{DEFAULT_FRIDGE_URL, Fridge, ResolvePackage};
#[cfg(test)]
pub use client::MockResolvePackage;
pub use types::{LookupResponse, STATUS_OK};
