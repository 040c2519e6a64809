use crate::vocab::{Vocab, BOS_ID, EOS_ID, PAD_ID, UNK_ID};

/// Character-level codec producing fixed-length id sequences.
///
/// Pure functions over an immutable [`Vocab`]: no state is carried
/// between calls and encoding never fails.
pub struct Tokenizer {
    vocab: Vocab,
}

impl Tokenizer {
    pub fn new(vocab: Vocab) -> Self {
        Self { vocab }
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// Encodes `text` into exactly `max_len` ids.
    ///
    /// The sequence is framed as BOS + characters + EOS, then
    /// right-padded with PAD up to `max_len`, or silently truncated to
    /// the first `max_len` ids. Truncation may cut the EOS marker or
    /// part of the payload. Characters outside the vocabulary map to
    /// UNK. `max_len` is not validated; callers pick a bound that
    /// leaves room for the framing.
    pub fn encode(&self, text: &str, max_len: usize) -> Vec<u16> {
        let mut ids = Vec::with_capacity(max_len.max(text.len() + 2));

        ids.push(BOS_ID);
        for c in text.chars() {
            ids.push(self.vocab.id_of(c).unwrap_or(UNK_ID));
        }
        ids.push(EOS_ID);

        if ids.len() < max_len {
            ids.resize(max_len, PAD_ID);
        } else {
            ids.truncate(max_len);
        }

        ids
    }

    /// Maps ids back to text, dropping all control ids (everything at
    /// or below EOS) and any id with no inverse mapping. Not a strict
    /// inverse of `encode`: padding and framing are gone, and
    /// truncation performed by `encode` is unrecoverable.
    pub fn decode(&self, ids: &[u16]) -> String {
        ids.iter()
            .filter(|&&id| id > EOS_ID)
            .filter_map(|&id| self.vocab.char_of(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(Vocab::chess())
    }

    #[test]
    fn encode_frames_and_pads() {
        let t = tokenizer();
        let ids = t.encode("e2e4", 10);

        assert_eq!(ids.len(), 10);
        assert_eq!(ids[0], BOS_ID);
        assert_eq!(ids[5], EOS_ID);
        assert_eq!(&ids[6..], &[PAD_ID; 4]);
    }

    #[test]
    fn encode_output_length_is_always_max_len() {
        let t = tokenizer();
        for max_len in [2, 5, 10, 100] {
            for text in ["", "e2e4", START_FEN] {
                assert_eq!(t.encode(text, max_len).len(), max_len);
            }
        }
    }

    #[test]
    fn round_trip_within_bound() {
        let t = tokenizer();
        for text in ["", "e2e4", "e7e8q", START_FEN] {
            let ids = t.encode(text, text.len() + 2);
            assert_eq!(t.decode(&ids), *text);
        }
    }

    #[test]
    fn round_trip_with_padding() {
        let t = tokenizer();
        assert_eq!(t.decode(&t.encode(START_FEN, 100)), START_FEN);
    }

    #[test]
    fn truncation_is_silent() {
        let t = tokenizer();
        let ids = t.encode(START_FEN, 10);

        assert_eq!(ids.len(), 10);
        // EOS fell off the end; the remaining payload still decodes.
        assert!(!ids.contains(&EOS_ID));
        assert_eq!(t.decode(&ids), &START_FEN[..9]);
    }

    #[test]
    fn truncation_to_framing_only() {
        let t = tokenizer();
        assert_eq!(t.encode("e2e4", 2), vec![BOS_ID, EOS_ID]);
        assert_eq!(t.encode("e2e4", 1), vec![BOS_ID]);
    }

    #[test]
    fn unknown_characters_degrade_to_unk() {
        let t = tokenizer();
        let ids = t.encode("e2!4", 10);

        assert_eq!(ids[3], UNK_ID);
        // UNK is a control id, so it vanishes on decode.
        assert_eq!(t.decode(&ids), "e24");
    }

    #[test]
    fn decode_skips_unmapped_ids() {
        let t = tokenizer();
        let bogus = u16::MAX;
        let e2 = [t.vocab().id_of('e').unwrap(), t.vocab().id_of('2').unwrap()];
        assert_eq!(t.decode(&[e2[0], bogus, e2[1]]), "e2");
    }

    #[test]
    fn empty_text_encodes_to_framing_and_padding() {
        let t = tokenizer();
        let ids = t.encode("", 4);
        assert_eq!(ids, vec![BOS_ID, EOS_ID, PAD_ID, PAD_ID]);
        assert_eq!(t.decode(&ids), "");
    }
}
