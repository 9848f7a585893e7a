//! CLI module for the User Directory API
//!
//! `serve` (the default) runs the HTTP server.

pub mod serve;

use clap::{Parser, Subcommand};

/// User Directory API - in-memory user management over HTTP
#[derive(Parser)]
#[command(name = "user-directory-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}

impl Default for Command {
    fn default() -> Self {
        Self::Serve(serve::ServeArgs::default())
    }
}
