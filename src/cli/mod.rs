//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Auth and task subcommands live in their own submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::task::Filter;

mod auth;
mod task;

/// td - Task Dashboard
///
/// A CLI and TUI client for the task-management REST API: register, log in,
/// then list, create, edit, complete, and delete your tasks.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the task backend (overrides config)
    #[arg(long, global = true, env = "TD_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the session file (defaults to the user data dir)
    #[arg(long, global = true, env = "TD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Register {
        /// Full name
        name: String,

        /// Email address
        email: String,

        /// Password (at least 6 characters)
        password: String,
    },

    /// Log in and store the session token
    Login {
        /// Email address
        email: String,

        /// Password
        password: String,
    },

    /// Drop the stored session token
    Logout,

    /// Show session status
    Whoami,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Open the interactive dashboard
    Ui,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks
    Ls {
        /// Filter: all, pending, or completed
        #[arg(long, default_value = "all")]
        filter: Filter,
    },

    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Edit a task's title and/or description
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Flip a task between Pending and Completed
    Toggle {
        /// Task id
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },

    /// Show task counts
    Stats,
}

/// Resolved runtime context shared by all commands
pub(crate) struct Context {
    pub api: ApiClient,
    pub data_dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    pub(crate) fn session(&self) -> Result<Session> {
        Session::load(&self.data_dir)
    }
}

impl Cli {
    fn context(&self) -> Result<Context> {
        let config = Config::load_default();
        let base_url = self
            .api_url
            .clone()
            .unwrap_or_else(|| config.api.base_url.clone());

        let data_dir = match self.data_dir.clone() {
            Some(dir) => dir,
            None => config::default_data_dir().ok_or_else(|| {
                Error::InvalidConfig(
                    "cannot determine the user data directory; pass --data-dir".to_string(),
                )
            })?,
        };

        Ok(Context {
            api: ApiClient::new(base_url),
            data_dir,
            json: self.json,
            quiet: self.quiet,
        })
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = self.context()?;
        match self.command {
            Commands::Register {
                name,
                email,
                password,
            } => auth::run_register(&ctx, &name, &email, &password),
            Commands::Login { email, password } => auth::run_login(&ctx, &email, &password),
            Commands::Logout => auth::run_logout(&ctx),
            Commands::Whoami => auth::run_whoami(&ctx),
            Commands::Task(cmd) => match cmd {
                TaskCommands::Ls { filter } => task::run_ls(&ctx, filter),
                TaskCommands::Add { title, description } => {
                    task::run_add(&ctx, &title, &description)
                }
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                } => task::run_edit(&ctx, &id, title.as_deref(), description.as_deref()),
                TaskCommands::Toggle { id } => task::run_toggle(&ctx, &id),
                TaskCommands::Rm { id } => task::run_rm(&ctx, &id),
                TaskCommands::Stats => task::run_stats(&ctx),
            },
            Commands::Ui => crate::ui::dashboard::run(&ctx.api, &mut ctx.session()?),
        }
    }
}
