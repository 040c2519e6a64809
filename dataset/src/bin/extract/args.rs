use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "Evaluation Extractor")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Path to the evaluation dump (.jsonl or .jsonl.zst).
    #[arg(long)]
    pub input: String,

    /// Output path for the canonical corpus (.jsonl).
    #[arg(long)]
    pub output: String,

    /// Stop after this many accepted samples.
    #[arg(long, default_value_t = 5_000_000)]
    pub max_samples: u64,
}
