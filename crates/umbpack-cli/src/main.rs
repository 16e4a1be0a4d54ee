use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use umbpack::{
    commands::{
        config::{self, ConfigAction},
        init,
    },
    logger, GlobalOpts,
};

#[derive(Parser)]
#[command(name = "umbpack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Umbraco package tooling",
    long_about = "umbpack creates package.xml manifests for Umbraco packages."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a package.xml by answering a few questions
    Init {
        /// Folder (or .xml file path) for the manifest (default: ./package.xml)
        folder: Option<String>,
    },
    /// Show or change umbpack settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing(opts: &GlobalOpts) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("UMBPACK_LOG")
                .unwrap_or_else(|_| opts.tracing_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing(&cli.global);

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let code = match cli.command {
        Commands::Init { folder } => init::handle_init(folder, &cli.global),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    };

    std::process::exit(code);
}
