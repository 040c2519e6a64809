use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::dataset::Subset;

// Holds x batches in the channel per worker
const CHANNEL_BUFFER_MULTIPLIER: usize = 2;

/// Batch assembly configuration. `pin_memory` is carried through as a
/// hint for whoever uploads batches to a device; assembly itself is
/// host-side only and ignores it.
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    pub batch_size: usize,
    pub shuffle: bool,
    pub workers: usize,
    pub pin_memory: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 256,
            shuffle: false,
            workers: num_cpus::get(),
            pin_memory: false,
        }
    }
}

/// One flattened batch: `rows * max_len_src` source ids and
/// `rows * (max_len_tgt - 1)` ids for each target half.
#[derive(Debug, Default)]
pub struct Batch {
    pub rows: usize,
    pub src: Vec<i64>,
    pub tgt_input: Vec<i64>,
    pub tgt_output: Vec<i64>,
}

/// Multi-threaded batch loader over an immutable subset.
///
/// Workers pull index chunks from a shared queue, assemble batches via
/// read-only `get` calls, and send them through a bounded channel.
/// Every row of the subset appears in exactly one batch per pass;
/// batch order across workers is not deterministic.
pub struct Loader {
    receiver: mpsc::Receiver<Batch>,
    workers: Vec<thread::JoinHandle<()>>,
    num_samples: usize,
    pin_memory: bool,
}

impl Loader {
    pub fn new(subset: Subset, config: &LoaderConfig) -> Self {
        let num_samples = subset.len();
        let num_workers = config.workers.max(1);
        let batch_size = config.batch_size.max(1);

        let mut order: Vec<usize> = (0..subset.len()).collect();
        if config.shuffle {
            order.shuffle(&mut thread_rng());
        }

        let (sender, receiver) = mpsc::sync_channel(num_workers * CHANNEL_BUFFER_MULTIPLIER);
        let (work_sender, work_receiver) =
            mpsc::sync_channel::<Vec<usize>>(num_workers * CHANNEL_BUFFER_MULTIPLIER);
        let work_receiver = Arc::new(Mutex::new(work_receiver));

        let subset = Arc::new(subset);
        let workers = Self::spawn_workers(num_workers, work_receiver, sender, subset);

        // Distribute index chunks to workers
        thread::spawn(move || {
            for chunk in order.chunks(batch_size) {
                if work_sender.send(chunk.to_vec()).is_err() {
                    break;
                }
            }
        });

        Self {
            receiver,
            workers,
            num_samples,
            pin_memory: config.pin_memory,
        }
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn pin_memory(&self) -> bool {
        self.pin_memory
    }

    fn spawn_workers(
        num_workers: usize,
        work_receiver: Arc<Mutex<mpsc::Receiver<Vec<usize>>>>,
        sender: mpsc::SyncSender<Batch>,
        subset: Arc<Subset>,
    ) -> Vec<thread::JoinHandle<()>> {
        (0..num_workers)
            .map(|_| {
                let rx = Arc::clone(&work_receiver);
                let tx = sender.clone();
                let subset = Arc::clone(&subset);

                thread::spawn(move || loop {
                    let chunk: Vec<usize> = {
                        match rx.lock().unwrap().recv() {
                            Ok(c) => c,
                            Err(_) => break,
                        }
                    };

                    let mut batch = Batch::default();
                    for index in chunk {
                        match subset.get(index) {
                            Some(item) => {
                                batch.src.extend_from_slice(&item.src);
                                batch.tgt_input.extend_from_slice(&item.tgt_input);
                                batch.tgt_output.extend_from_slice(&item.tgt_output);
                                batch.rows += 1;
                            }
                            None => log::debug!("Loader index {} out of range", index),
                        }
                    }

                    if tx.send(batch).is_err() {
                        break;
                    }
                })
            })
            .collect()
    }
}

impl Iterator for Loader {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.recv().ok()
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        // Join all workers on drop to ensure clean shutdown
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
