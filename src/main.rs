use std::path::PathBuf;

use anyhow::Context;
use blobs_sgd::{config::Config, pipeline};
use clap::Parser;
use log::info;

/// Mini-batch SGD logistic regression over two gaussian blobs.
#[derive(Parser, Debug)]
#[command(name = "blobs-sgd", version, about)]
struct Cli {
    /// Number of epochs, fractional values round up
    #[arg(short, long)]
    epochs: Option<f64>,

    /// Learning rate
    #[arg(short, long)]
    alpha: Option<f32>,

    /// Rows per mini-batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// JSON config file, flags given here take precedence over it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the figure, `.svg` or a bitmap extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the weight initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a JSON summary of the run
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(epochs) = self.epochs {
            config.training.epochs = epochs;
        }
        if let Some(alpha) = self.alpha {
            config.training.alpha = alpha;
        }
        if let Some(batch_size) = self.batch_size {
            config.training.batch_size = batch_size;
        }
        if let Some(seed) = self.seed {
            config.training.seed = Some(seed);
        }
        if let Some(output) = self.output {
            config.figure = output;
        }
        if self.summary.is_some() {
            config.summary = self.summary;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config()?;
    info!(
        "epochs={}, alpha={}, batch_size={}",
        config.training.epochs, config.training.alpha, config.training.batch_size
    );

    let outcome = pipeline::run(&config).context("training run failed")?;
    println!("{}", outcome.report);

    Ok(())
}
