use clap::Parser;
use phylostack::{config::PipelineConfig, Error, Metadata, Pipeline};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model source file
    input: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model name in the document
    #[arg(long)]
    model: Option<String>,

    /// Title recorded in the metadata block
    #[arg(long)]
    title: Option<String>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(model) = &cli.model {
        config.export.model = model.clone();
    }
    if let Some(title) = &cli.title {
        config.export.title = Some(title.clone());
    }
    if cli.compact {
        config.export.pretty = false;
    }
    debug!("config: {:?}", config);

    let source = std::fs::read_to_string(&cli.input)?;
    let pretty = config.export.pretty;
    let stamp = config
        .export
        .metadata
        .then(|| Metadata::stamp(config.export.title.clone(), Some(cli.input.display().to_string())));

    let compiled = Pipeline::new(config).compile(&source)?;
    if !compiled.leftover.is_empty() {
        let values: Vec<String> = compiled.leftover.iter().map(|v| v.to_string()).collect();
        warn!("{} value(s) left on the stack: {}", values.len(), values.join(" "));
    }

    let mut document = compiled.document;
    if let Some(metadata) = stamp {
        document.metadata = Some(metadata.to_value()?);
    }
    let json = document.to_json(pretty)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json + "\n")?;
            info!("document written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
