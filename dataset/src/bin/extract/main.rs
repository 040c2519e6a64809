mod args;

use args::Args;
use clap::Parser;
use dataset::label::{derive_sample, RawRecord};
use indicatif::{HumanCount, ProgressBar, ProgressStyle};
use log::LevelFilter;
use simplelog::{Config, SimpleLogger};
use std::{
    error::Error,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    // Set up SIGINT handler
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_handler = Arc::clone(&stop_flag);

    ctrlc::set_handler(move || {
        log::info!("Received SIGINT, stopping extraction...");
        stop_flag_handler.store(true, Ordering::Relaxed);
    })?;

    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output);

    // Raw record stream (may be zstd-compressed)
    let raw_reader: Box<dyn io::Read> = Box::new(File::open(&args.input)?);
    let reader: Box<dyn io::Read> = if args.input.ends_with(".zst") {
        Box::new(zstd::Decoder::new(raw_reader)?)
    } else {
        raw_reader
    };
    let reader = BufReader::new(reader);

    let mut writer = BufWriter::new(File::create(&args.output)?);

    let bar = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner()
            .template(
                "{spinner:.green} [Elapsed {elapsed_precise}] [Records {human_pos} @ {per_sec}] {msg}",
            )
            .unwrap(),
    );

    let mut accepted: u64 = 0;
    let mut skipped: u64 = 0;

    for line_res in reader.lines() {
        if stop_flag.load(Ordering::Relaxed) || accepted >= args.max_samples {
            break;
        }

        let line = line_res?;
        bar.inc(1);

        // A record that fails to parse or lacks a usable evaluation is
        // skipped, never aborted on.
        let sample = serde_json::from_str::<RawRecord>(&line)
            .ok()
            .as_ref()
            .and_then(derive_sample);

        match sample {
            Some(sample) => {
                sample.write_jsonl(&mut writer)?;

                accepted += 1;
                if accepted % 100_000 == 0 {
                    bar.set_message(format!(
                        "[Accepted {} Skipped {}]",
                        HumanCount(accepted),
                        HumanCount(skipped)
                    ));
                }
            }
            None => {
                skipped += 1;
                log::debug!("Skipping unusable record");
            }
        }
    }

    writer.flush()?;
    bar.finish();

    log::info!(
        "Extracted {} samples ({} skipped) to {}",
        accepted,
        skipped,
        args.output
    );

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    Ok(args)
}
