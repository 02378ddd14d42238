//! PMS admin CLI - hierarchy lookup and user deletion.
//!
//! # Usage
//!
//! ```bash
//! # Validate identifiers without touching the backend
//! pms-cli check boss@example.com "+91 98765 43210" bad-email
//!
//! # Show a reporting hierarchy
//! pms-cli hierarchy show boss@example.com
//!
//! # Delete a manager and every reportee (asks twice)
//! pms-cli hierarchy delete boss@example.com
//!
//! # Delete several users at once
//! pms-cli users delete a@example.com 9876543210 --yes
//!
//! # Interactive session; results accumulate across batches
//! pms-cli session
//! ```
//!
//! # Environment Variables
//!
//! See `pms_admin::config` for the full list. `PMS_BASE_URL` and
//! `PMS_API_TOKEN` are required by every command except `check`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use pms_admin::AdminConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "pms-cli")]
#[command(author, version, about = "PMS user administration tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and normalize identifiers offline
    Check {
        /// Emails or mobile numbers
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Look up or delete a reporting hierarchy
    Hierarchy {
        #[command(subcommand)]
        action: HierarchyAction,
    },
    /// Delete users in bulk
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Interactive session
    Session,
}

#[derive(Subcommand)]
enum HierarchyAction {
    /// Fetch and print the hierarchy
    Show {
        /// Email or mobile number of the root user
        identifier: String,

        /// Show only the root's direct reports
        #[arg(long)]
        collapse_all: bool,
    },
    /// Reassign reportees or delete the whole hierarchy
    Delete {
        /// Email or mobile number of the root user
        identifier: String,

        #[command(flatten)]
        choice: DeleteChoice,
    },
}

#[derive(Args)]
#[group(multiple = false)]
struct DeleteChoice {
    /// Print the reassignment location instead of deleting
    #[arg(long)]
    reassign: bool,

    /// Delete without asking
    #[arg(long)]
    yes: bool,
}

#[derive(Subcommand)]
enum UsersAction {
    /// Delete the given users in one request
    Delete {
        /// Emails or mobile numbers
        #[arg(required = true)]
        values: Vec<String>,

        /// Delete without asking
        #[arg(long)]
        yes: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pms_admin=info,pms_admin_cli=info".into());

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `check` works without configuration, so a load failure is only fatal
    // for commands that talk to the backend.
    let config = AdminConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let json = config.as_ref().map_or_else(
        |_| std::env::var_os("PMS_LOG_JSON").is_some(),
        |c| c.log_json,
    );
    init_tracing(json);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(
    cli: Cli,
    config: Result<AdminConfig, pms_admin::ConfigError>,
) -> Result<(), CliError> {
    match cli.command {
        Commands::Check { values } => commands::check::run(&values),
        Commands::Hierarchy { action } => {
            let config = config?;
            match action {
                HierarchyAction::Show {
                    identifier,
                    collapse_all,
                } => commands::hierarchy::show(&config, &identifier, collapse_all).await,
                HierarchyAction::Delete { identifier, choice } => {
                    let mode = if choice.reassign {
                        commands::hierarchy::DeleteMode::Reassign
                    } else if choice.yes {
                        commands::hierarchy::DeleteMode::Delete
                    } else {
                        commands::hierarchy::DeleteMode::Ask
                    };
                    commands::hierarchy::delete(&config, &identifier, mode).await
                }
            }
        }
        Commands::Users { action } => {
            let config = config?;
            match action {
                UsersAction::Delete { values, yes } => {
                    commands::users::delete(&config, &values, yes).await
                }
            }
        }
        Commands::Session => commands::session::run(&config?).await,
    }
}
