//! Learn CLI - Command line interface for the Learn plan backend
//!
//! Turn a learning goal into a nested study plan and browse it.

mod commands;

use clap::{Parser, Subcommand};
use learn_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ChatArgs, CreateArgs, GetArgs, RenderArgs};

/// Learn: generate and browse learning plans
#[derive(Parser, Debug)]
#[command(name = "learn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Plan backend origin (overrides config and env)
    #[arg(long, global = true, env = "LEARN_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config and env)
    #[arg(long, global = true, env = "LEARN_TIMEOUT")]
    timeout: Option<u64>,

    /// Model the backend should plan with (overrides config and env)
    #[arg(long, global = true, env = "LEARN_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Generate a plan for a learning goal
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Fetch a previously created plan by id
    Get(GetArgs),

    /// Display a plan saved as JSON
    Render(RenderArgs),

    /// Interactive session: type a goal, then browse the plan
    Chat(ChatArgs),

    /// Show current configuration
    Config {
        /// Create a secrets file template for the OpenAI key
        #[arg(long)]
        init_secrets: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config =
        Config::load_with_overrides(cli.base_url.clone(), cli.timeout, cli.model.clone())?;

    if cli.verbose {
        tracing::info!(
            base_url = %config.api.base_url,
            timeout = ?config.api.timeout,
            model = ?config.api.model,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("learn {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Create(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Get(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Render(args)) => {
            args.execute(cli.verbose, &config)?;
        }
        Some(Commands::Chat(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config { init_secrets }) => {
            if init_secrets {
                let path = Secrets::create_template()?;
                println!("Created {}", path.display());
                println!();
            }
            print_config(&config)?;
        }
        None => {
            println!("Learn - generate and browse learning plans");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config) -> anyhow::Result<()> {
    let secrets = Secrets::load()?;

    println!("Learn Configuration");
    println!("===================");
    println!();
    println!("API Settings:");
    println!("  base_url: {}", config.api.base_url);
    println!("  timeout: {}s", config.api.timeout.as_secs());
    println!("  model: {}", config.api.model.as_deref().unwrap_or("(backend default)"));
    println!(
        "  openai_api_key: {}",
        if secrets.openai_api_key().is_some() { "(set)" } else { "(not set)" }
    );
    println!();
    println!("Render Settings:");
    println!("  indent: {}", config.render.indent);
    println!("  max_depth: {}", config.render.max_depth);
    println!();
    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
    if let Some(path) = Secrets::default_secrets_path() {
        println!("Secrets file: {}", path.display());
    }

    Ok(())
}
