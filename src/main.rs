// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Oficina CLI - browse workshops, appointments and group discounts

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use oficina::catalog::SortKey;
use oficina::commands::{self, validate::Field, Session};
use oficina::config;
use oficina::types::AppointmentStatus;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oficina")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "OFICINA_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// JSON dataset to use instead of the bundled one
    #[arg(long, env = "OFICINA_DATASET", global = true)]
    dataset: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search shops by name, address or specialty
    Shops {
        /// Search text (accents and case are ignored)
        query: Option<String>,

        /// Sort order (rating, name)
        #[arg(short, long)]
        sort: Option<SortKey>,
    },

    /// Show one shop with its services
    Shop {
        /// Shop ID
        id: String,
    },

    /// List appointments
    Appointments {
        /// Only show this status (pendente, confirmado, em_andamento, concluido, cancelado)
        #[arg(short, long)]
        status: Option<AppointmentStatus>,
    },

    /// List shared bookings with group pricing
    Groups,

    /// Join a shared booking and see the new price
    Join {
        /// Shared booking ID
        booking: String,

        /// User joining (defaults to the configured user)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// List communities
    Communities {
        /// Only communities this user belongs to
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show a user profile with vehicles and reputation
    Profile {
        /// User (defaults to the configured user)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show a referral code and invitations
    Referral {
        /// User (defaults to the configured user)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Validate an e-mail, phone or plate
    Validate {
        /// Field kind
        #[arg(value_enum)]
        field: Field,

        /// Value to check
        value: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell, &mut Cli::command());
    }

    let config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging; RUST_LOG wins over flags and config
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let session = Session::open(config, cli.dataset, cli.json, !cli.no_color)?;

    // Execute command
    match cli.command {
        Commands::Shops { query, sort } => commands::shops::run(&session, query, sort),
        Commands::Shop { id } => commands::shops::show(&session, &id),
        Commands::Appointments { status } => commands::appointments::run(&session, status),
        Commands::Groups => commands::groups::list(&session),
        Commands::Join { booking, user } => commands::groups::join(&session, &booking, user),
        Commands::Communities { user } => commands::communities::run(&session, user),
        Commands::Profile { user } => commands::profile::run(&session, user),
        Commands::Referral { user } => commands::referral::run(&session, user),
        Commands::Validate { field, value } => commands::validate::run(field, &value),
        Commands::Completions { .. } => Ok(()),
    }
}
