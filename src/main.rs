mod commands;
mod fetch;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use invite_core::config::SiteConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "invite")]
#[command(about = "Render event invitation pages from a JSON event document, and build that document")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the invitation page
    Render {
        /// Event document path or URL (defaults to `data` from invite.toml)
        #[arg(short, long)]
        data: Option<String>,

        /// Page template replacing the built-in one
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Where to write the page
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Locale for the event date (e.g. "fr_FR")
        #[arg(long)]
        locale: Option<String>,

        /// Open the page in the browser afterwards
        #[arg(long)]
        open: bool,
    },
    /// Build an event document from form fields
    Build {
        /// TOML or JSON file with the form fields
        #[arg(short, long, conflicts_with = "interactive")]
        form: Option<PathBuf>,

        /// Ask for each field
        #[arg(short, long)]
        interactive: bool,

        /// Where to write the document (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show how the event document is interpreted
    Preview {
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Count down to the event in the terminal
    Countdown {
        #[arg(short, long)]
        data: Option<String>,
    },
    /// List the demo gallery
    Demos {
        /// Gallery JSON url (defaults to `demos_url` from invite.toml)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SiteConfig::load()?;
    tracing::debug!(config = ?config, "Configuration loaded");

    match cli.command {
        Commands::Render {
            data,
            template,
            out,
            locale,
            open,
        } => {
            let options = commands::render::RenderOptions {
                data: data.unwrap_or_else(|| config.data_source()),
                template: template.or_else(|| config.template_path()),
                out: out.unwrap_or_else(|| config.output_path()),
                locale: locale.or(config.locale.clone()),
                open,
            };
            commands::render::run(options).await
        }
        Commands::Build {
            form,
            interactive,
            out,
        } => commands::build::run(form, interactive, out),
        Commands::Preview { data } => {
            let source = data.unwrap_or_else(|| config.data_source());
            commands::preview::run(&source, config.locale.as_deref()).await
        }
        Commands::Countdown { data } => {
            let source = data.unwrap_or_else(|| config.data_source());
            commands::countdown::run(&source).await
        }
        Commands::Demos { url } => {
            let url = url.unwrap_or_else(|| config.demos_url.clone());
            commands::demos::run(&url).await
        }
    }
}

/// `--verbose` forces debug output; otherwise `RUST_LOG`, defaulting to warnings.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
