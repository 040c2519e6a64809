use ahash::AHashMap;

/// Reserved control ids. Decode drops every id at or below `EOS_ID`,
/// so these four must stay at the front of the id space.
pub const PAD_ID: u16 = 0;
pub const UNK_ID: u16 = 1;
pub const BOS_ID: u16 = 2;
pub const EOS_ID: u16 = 3;

pub const NUM_RESERVED: usize = 4;

// Domain symbols in canonical order: digits, the rank separator,
// file letters, piece letters (black then white), the side-to-move
// marker, dash and space. Castling rights reuse the piece letters,
// so every character appears once.
const CHESS_SYMBOLS: &str = "0123456789/abcdefghpnbrqkPNBRQK w-";

/// Immutable id <-> character mapping shared by encode and decode.
///
/// Both tables are built from the same pass over the symbol list, so
/// the two directions can never disagree. Once constructed the vocab
/// is never mutated and may be read freely from any thread.
pub struct Vocab {
    char_to_id: AHashMap<char, u16>,
    id_to_char: AHashMap<u16, char>,
}

impl Vocab {
    /// The fixed vocabulary for FEN strings and UCI moves.
    pub fn chess() -> Self {
        Self::from_symbols(CHESS_SYMBOLS)
    }

    fn from_symbols(symbols: &str) -> Self {
        let mut char_to_id = AHashMap::new();
        let mut id_to_char = AHashMap::new();

        let mut next_id = NUM_RESERVED as u16;
        for c in symbols.chars() {
            // First occurrence wins if the symbol list ever repeats.
            if char_to_id.contains_key(&c) {
                continue;
            }
            char_to_id.insert(c, next_id);
            id_to_char.insert(next_id, c);
            next_id += 1;
        }

        // FEN fields are space separated; the separator must be
        // encodable even if it is dropped from the symbol list.
        if !char_to_id.contains_key(&' ') {
            char_to_id.insert(' ', next_id);
            id_to_char.insert(next_id, ' ');
        }

        Self {
            char_to_id,
            id_to_char,
        }
    }

    /// Total number of ids, reserved ids included.
    pub fn size(&self) -> usize {
        self.char_to_id.len() + NUM_RESERVED
    }

    pub fn id_of(&self, c: char) -> Option<u16> {
        self.char_to_id.get(&c).copied()
    }

    pub fn char_of(&self, id: u16) -> Option<char> {
        self.id_to_char.get(&id).copied()
    }
}
