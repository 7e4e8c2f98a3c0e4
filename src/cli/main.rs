use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use exif_brief::config::{self, OutputFormat};
use exif_brief::{pipeline, render};

#[derive(Parser, Debug)]
#[command(
    name = "exif-brief",
    version,
    about = "Focused image metadata extractor: capture time, device, exposure, and GPS"
)]
struct Cli {
    /// Image files to inspect
    #[arg(value_name = "PATH", required_unless_present = "init")]
    paths: Vec<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write JSON output to FILE
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let config = config::Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);

    let batch = pipeline::process_batch(&cli.paths, &config);
    log::info!(
        "Done: {} file(s), {} not found",
        batch.len(),
        batch.missing_count()
    );

    if let Some(ref output) = cli.output {
        if let Err(e) = render::write_json(&batch, output) {
            log::error!("{e}");
            std::process::exit(2);
        }
        println!("JSON saved to: {}", output.display());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", render::render_json(&batch)?),
        OutputFormat::Text => {
            for (path, entry) in batch.iter() {
                match entry.record() {
                    Some(record) => print!("{}", render::render_text(record, path)),
                    None => eprintln!("{path}: {}", entry.error().unwrap_or("error")),
                }
            }
        }
    }

    Ok(())
}
