//! `hardened-defaults` management command.
//!
//! ```text
//! hardened-defaults [--config app.toml] show-urls [--format text|json]
//! hardened-defaults [--config app.toml] check [--deploy]
//! hardened-defaults [--config app.toml] fetch <url> [--no-validate-certificate]
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use hardened_defaults::checks;
use hardened_defaults::config::{self, AppConfig};
use hardened_defaults::observability::logging;
use hardened_defaults::routing::{render_json, render_text, RouteReport, RouteTable};
use hardened_defaults::security::{self, FetchRequest};

#[derive(Parser)]
#[command(name = "hardened-defaults")]
#[command(about = "Secure defaults and management commands", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured URL routes with their views and decorators
    ShowUrls {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Run system checks against the configuration
    Check {
        /// Include checks that only matter for deployments
        #[arg(long)]
        deploy: bool,
    },
    /// Fetch a URL using the secure defaults
    Fetch {
        url: String,

        /// Skip server certificate validation for this request
        #[arg(long)]
        no_validate_certificate: bool,

        /// Override the configured deadline
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        deadline_secs: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };
    logging::init(&config.observability);

    let defaults = security::install(&config)?;

    match cli.command {
        Commands::ShowUrls { format } => {
            let table = RouteTable::from_config(&config.routes);
            let rows = RouteReport::new(&table);
            let stdout = io::stdout().lock();
            match format {
                Format::Text => render_text(stdout, rows)?,
                Format::Json => {
                    render_json(stdout, rows, defaults.json())?;
                    println!();
                }
            }
        }
        Commands::Check { deploy } => {
            let messages = checks::run(&config, deploy);
            for message in &messages {
                eprintln!("{}", message);
            }
            println!(
                "System check identified {} issue{}.",
                messages.len(),
                if messages.len() == 1 { "" } else { "s" }
            );
            if messages.iter().any(|m| m.is_error()) {
                std::process::exit(1);
            }
        }
        Commands::Fetch {
            url,
            no_validate_certificate,
            deadline_secs,
        } => {
            let mut request = FetchRequest::get(url);
            if no_validate_certificate {
                request = request.validate_certificate(false);
            }
            if let Some(secs) = deadline_secs {
                request = request.deadline(Duration::from_secs(secs));
            }

            let response = defaults.fetch().fetch(request).await?;
            tracing::info!(status = response.status, url = %response.final_url, "Fetched");
            io::stdout().lock().write_all(&response.content)?;
        }
    }

    Ok(())
}
