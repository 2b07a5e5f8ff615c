pub mod commands;
pub mod error;
pub mod fridge;
pub mod git;
pub mod report;
pub mod runtime;
pub mod workspace;
