use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// One canonical training record: board text, best move, and a value
/// for the side to move in [-1, 1]. Persisted as one JSON object per
/// line and immutable once derived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub src: String,
    pub tgt: String,
    pub val: f32,
}

impl Sample {
    pub fn new(src: &str, tgt: &str, val: f32) -> Self {
        Self {
            src: src.to_string(),
            tgt: tgt.to_string(),
            val,
        }
    }

    /// Appends this sample to a JSONL stream.
    pub fn write_jsonl<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let line = serde_json::to_string(self)?;
        writeln!(writer, "{}", line)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Samples {
    pub samples: Vec<Sample>,
}

impl Samples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn extend(&mut self, other: Samples) {
        self.samples.extend(other.samples);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for sample in &self.samples {
            sample.write_jsonl(writer)?;
        }
        Ok(())
    }

    /// Reads at most `max_samples` canonical records, stopping at the
    /// cap or end of input. Blank lines are tolerated; anything else
    /// that fails to parse aborts the read.
    pub fn read<R: BufRead>(reader: R, max_samples: usize) -> Result<Self, DatasetError> {
        let mut samples = Vec::new();

        for (line_no, line_res) in reader.lines().enumerate() {
            if samples.len() >= max_samples {
                break;
            }

            let line = line_res?;
            if line.trim().is_empty() {
                continue;
            }

            let sample: Sample =
                serde_json::from_str(&line).map_err(|source| DatasetError::Json {
                    line: line_no + 1,
                    source,
                })?;
            samples.push(sample);
        }

        Ok(Self { samples })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn fixture() -> Samples {
        let mut samples = Samples::new();
        samples.push(Sample::new(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2e4",
            0.0749,
        ));
        samples.push(Sample::new("8/8/8/8/8/5k2/8/4K2R w - - 0 1", "h1h8", 1.0));
        samples
    }

    #[test]
    fn write_then_read_round_trips() {
        let samples = fixture();

        let mut buf = Vec::new();
        samples.write(&mut buf).unwrap();

        let parsed = Samples::read(BufReader::new(buf.as_slice()), usize::MAX).unwrap();
        assert_eq!(parsed.samples, samples.samples);
    }

    #[test]
    fn read_honours_the_cap() {
        let samples = fixture();

        let mut buf = Vec::new();
        samples.write(&mut buf).unwrap();

        let parsed = Samples::read(BufReader::new(buf.as_slice()), 1).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.samples[0], samples.samples[0]);
    }

    #[test]
    fn read_skips_blank_lines() {
        let text = "\n{\"src\":\"8/8 w - - 0 1\",\"tgt\":\"a1a2\",\"val\":0.5}\n\n";
        let parsed = Samples::read(BufReader::new(text.as_bytes()), usize::MAX).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn read_reports_malformed_lines() {
        let text = "{\"src\":\"8/8 w - - 0 1\",\"tgt\":\"a1a2\",\"val\":0.5}\nnot json\n";
        let err = Samples::read(BufReader::new(text.as_bytes()), usize::MAX).unwrap_err();
        match err {
            DatasetError::Json { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Json error, got {:?}", other),
        }
    }
}
