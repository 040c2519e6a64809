use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};
use tokenizer::Tokenizer;

use crate::error::DatasetError;
use crate::samples::Samples;

/// Encoder-stage configuration. The caps mirror the extract stage:
/// 100 ids comfortably hold a FEN plus framing, 10 hold a UCI move.
#[derive(Clone, Debug)]
pub struct DatasetConfig {
    pub max_samples: usize,
    pub max_len_src: usize,
    pub max_len_tgt: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            max_samples: 5_000_000,
            max_len_src: 100,
            max_len_tgt: 10,
        }
    }
}

/// One dataset row with the teacher-forcing shift applied: position i
/// of `tgt_input` predicts position i of `tgt_output`. Ids are
/// widened to i64 for embedding-lookup consumption.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub src: Vec<i64>,
    pub tgt_input: Vec<i64>,
    pub tgt_output: Vec<i64>,
}

/// In-memory collection of encoded samples, built once from the
/// canonical corpus and immutable afterwards. Rows are fixed-length,
/// so `get` is index arithmetic over owned buffers and safe for
/// concurrent read-only use by loader workers.
#[derive(Debug)]
pub struct Dataset {
    src_ids: Vec<Vec<u16>>,
    tgt_ids: Vec<Vec<u16>>,
}

impl Dataset {
    /// Loads and tokenizes the canonical corpus. A missing or
    /// unreadable file is fatal, as is a line that does not parse.
    pub fn load(
        path: &Path,
        tokenizer: &Tokenizer,
        config: &DatasetConfig,
    ) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        let samples = Samples::read(BufReader::new(file), config.max_samples)?;

        Ok(Self::from_samples(&samples, tokenizer, config))
    }

    /// Encodes an in-memory collection of canonical samples.
    pub fn from_samples(samples: &Samples, tokenizer: &Tokenizer, config: &DatasetConfig) -> Self {
        let mut src_ids = Vec::with_capacity(samples.len());
        let mut tgt_ids = Vec::with_capacity(samples.len());

        for sample in &samples.samples {
            src_ids.push(tokenizer.encode(&sample.src, config.max_len_src));
            tgt_ids.push(tokenizer.encode(&sample.tgt, config.max_len_tgt));

            if src_ids.len() % 500_000 == 0 {
                log::info!("Tokenized {} samples...", src_ids.len());
            }
        }

        Self { src_ids, tgt_ids }
    }

    pub fn len(&self) -> usize {
        self.src_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src_ids.is_empty()
    }

    /// Read-only row access. An out-of-range index is a caller bug and
    /// yields `None`.
    pub fn get(&self, index: usize) -> Option<Item> {
        let src = self.src_ids.get(index)?;
        let tgt = self.tgt_ids.get(index)?;
        let n = tgt.len();

        Some(Item {
            src: src.iter().map(|&id| id as i64).collect(),
            tgt_input: tgt[..n - 1].iter().map(|&id| id as i64).collect(),
            tgt_output: tgt[1..].iter().map(|&id| id as i64).collect(),
        })
    }

    /// Partitions the ordinal index set into disjoint train and
    /// validation groups covering every row exactly once. The
    /// validation count is floor(ratio * len). Pass a seed for a
    /// reproducible split.
    pub fn split_indices(&self, val_ratio: f64, seed: Option<u64>) -> (Vec<usize>, Vec<usize>) {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        match seed {
            Some(seed) => indices.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => indices.shuffle(&mut thread_rng()),
        }

        let val_len = (self.len() as f64 * val_ratio) as usize;
        let val = indices.split_off(self.len() - val_len);

        (indices, val)
    }
}

/// Renumbered view over a subset of dataset rows. Exposes the same
/// `len`/`get` contract as the full dataset, with indices remapped to
/// `0..len()` within the subset.
#[derive(Clone)]
pub struct Subset {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl Subset {
    pub fn new(dataset: Arc<Dataset>, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(*self.indices.get(index)?)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}
