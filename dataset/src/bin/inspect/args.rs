use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "Dataset Inspector")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Canonical corpus produced by the extract binary.
    #[arg(long)]
    pub corpus: String,

    /// Maximum number of samples to load.
    #[arg(long, default_value_t = 5_000_000)]
    pub max_samples: usize,

    /// Rows per batch.
    #[arg(long, default_value_t = 256)]
    pub batch_size: usize,

    /// Number of loader worker threads.
    #[arg(long, default_value_t = num_cpus::get())]
    pub workers: usize,

    /// Fraction of samples held out for validation.
    #[arg(long, default_value_t = 0.01)]
    pub val_ratio: f64,

    /// Seed for a reproducible split.
    #[arg(long)]
    pub seed: Option<u64>,
}
