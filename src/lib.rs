//! Sango-aware 16-bit token codec.
//!
//! Sango words become one token per syllable, English and French words one
//! token per letter, and everything else one token per codepoint. See
//! [`token`] for the bit layout and [`codec`] for phrase encoding.
pub mod codec;
pub mod lang;
pub mod phoneme;
pub mod pipeline;
pub mod segment;
pub mod stage;
pub mod token;
pub mod wire;

pub use codec::{
    Codec, CodecBuilder, CodecError, DecodedText, Encoded, FailurePolicy, Issue, IssueKind,
    Span, Unit,
};
pub use lang::{AsciiLang, ENG, FRA, Lang, SAG};
pub use phoneme::{Case, PhonemeTables, Tone, VowelQuality};
pub use segment::{MalformedSyllable, Segmenter, Syllable};
pub use token::{Decoded, Token, TokenCodec, TokenKind};
pub use wire::Endianness;

#[cfg(test)]
mod tests {
    include!("tests/unit.rs");
    include!("tests/integration.rs");
    include!("tests/proptest.rs");
}
