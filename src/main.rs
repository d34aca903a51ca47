use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use facetone::cli::{load_settings, Cli, Commands};
use facetone::output::Printer;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "facetone=info",
        1 => "facetone=debug",
        _ => "facetone=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let printer = Printer::new();

    match cli.command {
        Commands::Lipstick(args) => {
            let settings = load_settings(cli.config.as_deref())?;
            facetone::cli::lipstick::run(args, &settings, &printer)?
        }
        Commands::Reshape(args) => {
            let settings = load_settings(cli.config.as_deref())?;
            facetone::cli::reshape::run(args, &settings, &printer)?
        }
        Commands::Compare(args) => {
            let settings = load_settings(cli.config.as_deref())?;
            facetone::cli::compare::run(args, &settings, &printer)?
        }
        Commands::Analyze(args) => facetone::cli::analyze::run(args)?,
        Commands::Init(args) => facetone::cli::init::run(args, &printer)?,
        Commands::Completions(args) => facetone::cli::completions::run(args)?,
    }

    Ok(())
}
