pub mod tokenizer;
pub mod vocab;

pub use tokenizer::Tokenizer;
pub use vocab::{Vocab, BOS_ID, EOS_ID, PAD_ID, UNK_ID};
