use serde::Deserialize;

use crate::samples::Sample;

/// Centipawn scale for the tanh squash. 300cp (a clear pawn up after
/// accounting for activity) maps to ~0.76, keeping typical advantages
/// well inside (-1, 1).
pub const CP_SCALE: f32 = 400.0;

/// One engine line for a position. Carries either a centipawn score or
/// a mate-in-N, never meaningfully both.
#[derive(Debug, Deserialize)]
pub struct Pv {
    pub cp: Option<i32>,
    pub mate: Option<i32>,
    pub line: String,
}

#[derive(Debug, Deserialize)]
pub struct Eval {
    #[serde(default)]
    pub depth: i32,
    pub pvs: Vec<Pv>,
}

/// Raw evaluation record as found in the lichess evaluation dump.
/// Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    pub fen: String,
    pub evals: Vec<Eval>,
}

/// Squashes a side-to-move-relative centipawn score into (-1, 1).
pub fn cp_to_value(cp: i32) -> f32 {
    (cp as f32 / CP_SCALE).tanh()
}

/// Reduces a raw record to one canonical sample, or rejects it.
///
/// Rejection is expected absence, not an error: the extractor skips
/// the record and moves on. A record is rejected when the side to
/// move cannot be read from the FEN, the deepest evaluation has no
/// principal variation, the variation has no moves, or it carries
/// neither a mate nor a centipawn score.
pub fn derive_sample(record: &RawRecord) -> Option<Sample> {
    let white_to_move = record.fen.split_whitespace().nth(1)? == "w";

    // Deepest evaluation wins; the first one wins on equal depth.
    let mut best: Option<&Eval> = None;
    for eval in &record.evals {
        if best.map_or(true, |b| eval.depth > b.depth) {
            best = Some(eval);
        }
    }

    let pv = best?.pvs.first()?;
    let tgt = pv.line.split_whitespace().next()?;

    let val = if let Some(mate) = pv.mate {
        // Forced mate collapses to a saturated value regardless of
        // distance. The source reports mate from white's perspective.
        let side_to_move_mates = (white_to_move && mate > 0) || (!white_to_move && mate < 0);
        if side_to_move_mates {
            1.0
        } else {
            -1.0
        }
    } else {
        // cp is reported from white's perspective; normalize to "how
        // good for the side to move" before squashing.
        let cp = pv.cp?;
        let relative = if white_to_move { cp } else { -cp };
        cp_to_value(relative)
    };

    Some(Sample::new(&record.fen, tgt, val))
}
