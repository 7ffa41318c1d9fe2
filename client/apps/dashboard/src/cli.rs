//! Command line
//!
//! Each subcommand plays one dashboard interaction: the auth forms, the sign
//! out button, or opening a page by path.

use clap::{Parser, Subcommand};

/// Reel links dashboard
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Print view data as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: String,

        /// Name shown in the sidebar
        #[arg(long = "name")]
        display_name: String,
    },

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out of the current session
    Logout,

    /// Show who the session belongs to
    Whoami,

    /// Open a dashboard page by path, e.g. `/dashboard/reels`
    Open { path: String },

    /// Create a ReelID pointing at `url`
    Create { url: String },

    /// Shortcut for `open /dashboard/reels`
    Reels,

    /// Submissions for one reel, or across all of yours when omitted
    Submissions { reel_id: Option<String> },
}

impl Command {
    /// Page this command opens, if it is a page visit
    pub fn path(&self) -> Option<String> {
        match self {
            Command::Open { path } => Some(path.clone()),
            Command::Create { .. } => Some("/dashboard/create".to_string()),
            Command::Reels => Some("/dashboard/reels".to_string()),
            Command::Submissions { reel_id: Some(id) } => Some(format!("/dashboard/submissions/{id}")),
            Command::Submissions { reel_id: None } => Some("/dashboard/create".to_string()),
            Command::Signup { .. } | Command::Login { .. } | Command::Logout | Command::Whoami => None,
        }
    }
}
