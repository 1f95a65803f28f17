//! Byte serialization and a human-readable listing of token streams.
//!
//! A stream is nothing but its tokens, two bytes each, with no header or
//! length prefix. Byte order is a parameter; big-endian is the default.
use crate::{
    codec::{Issue, IssueKind},
    token::Token,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

impl Endianness {
    #[inline(always)]
    fn write(self, t: Token) -> [u8; 2] {
        match self {
            Endianness::Big => t.bits().to_be_bytes(),
            Endianness::Little => t.bits().to_le_bytes(),
        }
    }

    #[inline(always)]
    fn read(self, b: [u8; 2]) -> Token {
        Token::from_bits(match self {
            Endianness::Big => u16::from_be_bytes(b),
            Endianness::Little => u16::from_le_bytes(b),
        })
    }
}

pub fn to_bytes(tokens: &[Token], order: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for &t in tokens {
        out.extend_from_slice(&order.write(t));
    }
    out
}

/// Every byte pair is a valid token. An odd trailing byte is dropped and
/// reported.
pub fn from_bytes(bytes: &[u8], order: Endianness) -> (Vec<Token>, Option<Issue>) {
    let chunks = bytes.chunks_exact(2);
    let trailing = chunks.remainder();
    let tokens: Vec<Token> = chunks.map(|c| order.read([c[0], c[1]])).collect();
    let issue = trailing.first().map(|b| {
        Issue::raise(
            IssueKind::TruncatedStream,
            tokens.len(),
            format!("odd trailing byte 0x{b:02X} dropped"),
        )
    });
    (tokens, issue)
}

const LEGEND: &str = "\
0b_00_UUUUUUUUUUUUUU      codepoint     U = scalar value, U+0000..=U+3FFF
0b_01_L_NNNNN_AAAAAAAA    letter        L = 0 English, 1 French
                                        N = min(31, letters left after this one)
                                        A = Latin-1 value
0b_1_SS_XX_CCCCC_VVVV_PP  syllable      S = min(3, syllables left after this one)
                                        X = 00 lower, 01 Title, 10 -hyphen, 11 UPPER
                                        C = consonant, V = vowel
                                        P = 00 unknown, 01 low, 10 mid, 11 high
";

/// Write a legend followed by one `#NN: <token>` line per token.
pub fn dump<W: io::Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    writeln!(out, "{} tokens", tokens.len())?;
    out.write_all(LEGEND.as_bytes())?;
    writeln!(out)?;
    for (k, t) in tokens.iter().enumerate() {
        writeln!(out, "#{k:02}: {t}")?;
    }
    Ok(())
}
