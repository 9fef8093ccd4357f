use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use kickoff::bootstrap::{
    Bootstrap, BootstrapEvent, BootstrapOutcome, BootstrapSettings, Reporter, TracingReporter,
};
use kickoff::config::{ConfigOverrides, KickoffConfig};
use kickoff::credential::{ConfiguredCredential, CredentialSource};
use kickoff::forge::GitHubConnector;
use kickoff::git::GitClient;

/// Bootstrap a new project: local scaffold, first commit, GitHub repository and tracking issues
#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Path to config file (defaults to ~/.kickoff/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project locally and on GitHub
    New {
        /// Repository name (prompted for when omitted)
        name: Option<String>,

        #[command(flatten)]
        remote: RemoteArgs,

        /// Repository description
        #[arg(long)]
        description: Option<String>,

        /// Create a private repository
        #[arg(long)]
        private: bool,

        /// Parent directory for the project (defaults to the desktop)
        #[arg(long)]
        workspace: Option<PathBuf>,

        /// Branch to push
        #[arg(long)]
        branch: Option<String>,

        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a repository name is still free
    Check {
        /// Repository name (prompted for when omitted)
        name: Option<String>,

        #[command(flatten)]
        remote: RemoteArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RemoteArgs {
    /// Account owning the repository (defaults to the token's user)
    #[arg(long)]
    owner: Option<String>,

    /// GitHub API base URL
    #[arg(long)]
    api_url: Option<String>,
}

/// Prints one status line per step.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &BootstrapEvent) {
        if event.outcome.succeeded {
            println!("{} {}: {}", "✓".green(), event.step, event.outcome.detail);
        } else {
            println!("{} {}: {}", "✗".red(), event.step, event.outcome.detail.red());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    kickoff::logging::init(cli.verbose, cli.log_file.clone())?;

    match cli.command {
        Commands::New {
            name,
            remote,
            description,
            private,
            workspace,
            branch,
            json,
        } => {
            let overrides = ConfigOverrides {
                owner: remote.owner,
                api_url: remote.api_url,
                workspace,
                description,
                branch,
                private,
            };
            let config = load_config(cli.config.as_deref(), overrides)?;
            let credentials = credential_from_env(&config)?;
            let name = resolve_name(name)?;
            execute_new(&config, &credentials, &name, json)
        }
        Commands::Check { name, remote, json } => {
            let overrides = ConfigOverrides {
                owner: remote.owner,
                api_url: remote.api_url,
                ..Default::default()
            };
            let config = load_config(cli.config.as_deref(), overrides)?;
            let credentials = credential_from_env(&config)?;
            let name = resolve_name(name)?;
            execute_check(&config, &credentials, &name, json)
        }
    }
}

fn execute_new(
    config: &KickoffConfig,
    credentials: &ConfiguredCredential,
    name: &str,
    json: bool,
) -> Result<()> {
    let connector = GitHubConnector::new(config.github.clone());
    let git = GitClient::system();
    let reporter: &dyn Reporter = if json { &TracingReporter } else { &ConsoleReporter };

    let bootstrap = Bootstrap::new(
        BootstrapSettings::from_config(config),
        credentials,
        &connector,
        &git,
        reporter,
    );
    let report = bootstrap.run(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.outcome {
        BootstrapOutcome::AlreadyExists => {
            println!(
                "\n{} Nothing to do: '{}/{}' already exists on GitHub.",
                "⚠️".yellow(),
                report.owner,
                report.name
            );
        }
        BootstrapOutcome::Completed => {
            println!(
                "\n{} {}/{} is ready ({} of {} tickets filed)",
                "✅".green(),
                report.owner,
                report.name,
                report.tickets_filed(),
                report.tickets.len()
            );
            if let Some(scaffold) = &report.scaffold {
                println!("   Local:  {}", scaffold.path.display());
            }
            if let Some(remote) = &report.remote {
                println!("   Remote: {}", remote.clone_url);
            }
        }
    }
    Ok(())
}

fn execute_check(
    config: &KickoffConfig,
    credentials: &ConfiguredCredential,
    name: &str,
    json: bool,
) -> Result<()> {
    let connector = GitHubConnector::new(config.github.clone());
    let git = GitClient::system();

    let bootstrap = Bootstrap::new(
        BootstrapSettings::from_config(config),
        credentials,
        &connector,
        &git,
        &TracingReporter,
    );
    let availability = bootstrap.check(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&availability)?);
    } else if availability.exists {
        println!(
            "{} '{}/{}' already exists",
            "✗".red(),
            availability.owner,
            availability.name
        );
    } else {
        println!(
            "{} '{}/{}' is available",
            "✓".green(),
            availability.owner,
            availability.name
        );
    }
    Ok(())
}

fn load_config(
    path: Option<&std::path::Path>,
    overrides: ConfigOverrides,
) -> Result<KickoffConfig> {
    let mut config = match path {
        Some(path) => KickoffConfig::load(path),
        None => KickoffConfig::load_default(),
    }
    .context("Failed to load kickoff configuration")?;
    config.apply(overrides);
    Ok(config)
}

/// The token is read here, at the process boundary, and handed to the library.
///
/// A missing token fails before the user is prompted for anything.
fn credential_from_env(config: &KickoffConfig) -> Result<ConfiguredCredential> {
    let var = &config.github.token_env;
    let credentials = ConfiguredCredential::new(var.as_str(), std::env::var(var).ok());
    credentials.get()?;
    Ok(credentials)
}

fn resolve_name(name: Option<String>) -> Result<String> {
    if let Some(name) = name {
        return Ok(name.trim().to_string());
    }

    print!("Enter the GitHub repository name: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read repository name")?;
    Ok(input.trim().to_string())
}
