mod args;

use args::Args;
use clap::Parser;
use dataset::loader::{Loader, LoaderConfig};
use dataset::{Dataset, DatasetConfig, Subset};
use log::LevelFilter;
use simplelog::{Config, SimpleLogger};
use std::{error::Error, path::Path, sync::Arc, time::Instant};
use tokenizer::{Tokenizer, Vocab};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let tokenizer = Tokenizer::new(Vocab::chess());
    log::info!("Vocabulary size: {}", tokenizer.vocab().size());

    let config = DatasetConfig {
        max_samples: args.max_samples,
        ..DatasetConfig::default()
    };

    log::info!("Loading corpus from {}", args.corpus);
    let dataset = Dataset::load(Path::new(&args.corpus), &tokenizer, &config)?;
    log::info!("Loaded {} samples", dataset.len());

    let (train_idx, val_idx) = dataset.split_indices(args.val_ratio, args.seed);
    log::info!("Dataset size: Train: {} | Val: {}", train_idx.len(), val_idx.len());

    let dataset = Arc::new(dataset);
    let train = Subset::new(Arc::clone(&dataset), train_idx);
    let val = Subset::new(Arc::clone(&dataset), val_idx);

    // Decode one row back through the tokenizer as a sanity check.
    if let Some(item) = train.get(0) {
        let ids: Vec<u16> = item.src.iter().map(|&id| id as u16).collect();
        log::info!("Train sample 0 decodes to: {}", tokenizer.decode(&ids));
    }

    drain(
        "train",
        train,
        &LoaderConfig {
            batch_size: args.batch_size,
            shuffle: true,
            workers: args.workers,
            pin_memory: false,
        },
    );

    drain(
        "val",
        val,
        &LoaderConfig {
            batch_size: args.batch_size,
            shuffle: false,
            workers: args.workers,
            pin_memory: false,
        },
    );

    Ok(())
}

fn drain(name: &str, subset: Subset, config: &LoaderConfig) {
    log::info!(
        "Draining one {} pass ({} workers, batch size {})",
        name,
        config.workers,
        config.batch_size
    );

    let loader = Loader::new(subset, config);

    let start = Instant::now();
    let mut batches = 0usize;
    let mut rows = 0usize;

    for batch in loader {
        batches += 1;
        rows += batch.rows;
    }

    let elapsed = start.elapsed().as_secs_f64();
    log::info!(
        "{}: {} batches, {} rows in {:.2}s ({:.0} rows/s)",
        name,
        batches,
        rows,
        elapsed,
        rows as f64 / elapsed.max(f64::EPSILON)
    );
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    Ok(args)
}
