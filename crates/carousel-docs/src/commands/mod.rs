//! CLI command implementations.

pub mod examples;
pub mod files;
pub mod init;
pub mod routes;
pub mod sandbox;
