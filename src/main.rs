use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use migstate::commands;
use migstate::config;
use migstate::constants::CONFIG_FILENAME;
use migstate::output::OutputFormat;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every migration with its state
    Info {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,

        #[command(flatten)]
        database_args: config::DatabaseArgs,

        #[command(flatten)]
        directory_args: config::DirectoryArgs,

        #[command(flatten)]
        metadata_args: config::MetadataArgs,
    },

    /// Fail if any migration failed or was ignored
    Validate {
        #[command(flatten)]
        database_args: config::DatabaseArgs,

        #[command(flatten)]
        directory_args: config::DirectoryArgs,

        #[command(flatten)]
        metadata_args: config::MetadataArgs,
    },

    /// Record the version at which this database starts being tracked
    Init {
        /// Version of the INIT marker
        #[arg(long)]
        init_version: Option<String>,

        /// Description of the INIT marker
        #[arg(long)]
        init_description: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        #[command(flatten)]
        database_args: config::DatabaseArgs,

        #[command(flatten)]
        metadata_args: config::MetadataArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    tokio::select! {
        result = run_main(cli) => result,
        _ = wait_for_shutdown_signal() => {
            info!("Received shutdown signal, exiting");
            Ok(())
        }
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

async fn run_main(cli: Cli) -> Result<()> {
    let (file_config, root_dir) = config::load_config(&cli.config_file)?;

    match cli.command {
        Commands::Info {
            format,
            database_args,
            directory_args,
            metadata_args,
        } => {
            let cli_config = config::ConfigInput {
                database: Some(database_args.into()),
                directories: Some(directory_args.into()),
                metadata: Some(metadata_args.into()),
            };

            let config = config::ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_config)
                .resolve()?;

            info!("Aggregating migration info");
            commands::cmd_info(&config, &root_dir, format).await
        }
        Commands::Validate {
            database_args,
            directory_args,
            metadata_args,
        } => {
            let cli_config = config::ConfigInput {
                database: Some(database_args.into()),
                directories: Some(directory_args.into()),
                metadata: Some(metadata_args.into()),
            };

            let config = config::ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_config)
                .resolve()?;

            info!("Validating applied migrations");
            commands::cmd_validate(&config, &root_dir).await
        }
        Commands::Init {
            init_version,
            init_description,
            yes,
            database_args,
            metadata_args,
        } => {
            let mut metadata: config::MetadataInput = metadata_args.into();
            metadata.init_version = init_version;
            metadata.init_description = init_description;

            let cli_config = config::ConfigInput {
                database: Some(database_args.into()),
                directories: None,
                metadata: Some(metadata),
            };

            let config = config::ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_config)
                .resolve()?;

            info!("Initializing metadata table");
            commands::cmd_init(&config, yes).await
        }
    }
}
