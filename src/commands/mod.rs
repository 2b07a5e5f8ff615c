pub mod config;
mod install;
mod remove;
mod update;

pub use config::{Config, Settings};
pub use install::install;
pub use remove::remove;
pub use update::update;
