//! Word-level view of a token stream.
//!
//! Consecutive tokens of the same family (and, for letters, the same
//! language) form one unit; every `Codepoint` token is a unit of its own.
//! Remaining-count fields are not trusted for grouping. They are only used
//! to notice a stream that stops in the middle of a word.
use super::{Issue, IssueKind};
use crate::{
    lang::{AsciiLang, Lang, SAG},
    stage::normalization::compose,
    token::{Decoded, Token, TokenCodec},
};

/// One decoded word or codepoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Decoded text, NFC.
    pub text: String,
    /// `None` for a `Codepoint` token.
    pub lang: Option<Lang>,
    /// Index of the unit's first token.
    pub start: usize,
    /// Number of tokens in the unit.
    pub len: usize,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone)]
pub struct Units<'a> {
    codec: TokenCodec<'a>,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Units<'a> {
    pub fn new(codec: TokenCodec<'a>, tokens: &'a [Token]) -> Self {
        Self {
            codec,
            tokens,
            pos: 0,
        }
    }

    fn letters(&mut self, start: usize, lang: AsciiLang) -> Unit {
        let mut text = String::new();
        let mut left = 0;
        while let Some(&t) = self.tokens.get(self.pos) {
            match t.decode() {
                Decoded::AsciiLetter(a) if a.lang == lang => {
                    text.push(a.char());
                    left = a.left;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let mut issues = Vec::new();
        self.check_end(left, "letters", &mut issues);
        Unit {
            text,
            lang: Some(lang.lang()),
            start,
            len: self.pos - start,
            issues,
        }
    }

    fn syllables(&mut self, start: usize) -> Unit {
        let mut raw = String::new();
        let mut left = 0;
        let mut issues = Vec::new();
        while let Some(&t) = self.tokens.get(self.pos) {
            let Decoded::Syllable(code) = t.decode() else {
                break;
            };
            let spelled = self.codec.spell(&code);
            if spelled.invalid_consonant {
                issues.push(Issue::raise(
                    IssueKind::InvalidPhonemeCode,
                    self.pos,
                    format!("consonant code {} in {t}", code.consonant.raw()),
                ));
            }
            if spelled.invalid_vowel {
                issues.push(Issue::raise(
                    IssueKind::InvalidPhonemeCode,
                    self.pos,
                    format!("vowel code {} in {t}", code.vowel.raw()),
                ));
            }
            raw.push_str(&spelled.text);
            left = code.left;
            self.pos += 1;
        }
        self.check_end(left, "syllables", &mut issues);
        Unit {
            text: compose(&raw).into_owned(),
            lang: Some(SAG),
            start,
            len: self.pos - start,
            issues,
        }
    }

    /// A word cut short by the end of the stream.
    fn check_end(&self, left: u8, what: &str, issues: &mut Vec<Issue>) {
        if left > 0 && self.pos == self.tokens.len() {
            issues.push(Issue::raise(
                IssueKind::TruncatedStream,
                self.pos - 1,
                format!("stream ends with {left} more {what} announced"),
            ));
        }
    }
}

impl Iterator for Units<'_> {
    type Item = Unit;

    fn next(&mut self) -> Option<Unit> {
        let start = self.pos;
        let first = *self.tokens.get(start)?;
        Some(match first.decode() {
            Decoded::Codepoint(c) => {
                self.pos += 1;
                Unit {
                    text: c.to_string(),
                    lang: None,
                    start,
                    len: 1,
                    issues: Vec::new(),
                }
            }
            Decoded::AsciiLetter(a) => self.letters(start, a.lang),
            Decoded::Syllable(_) => self.syllables(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::{Codec, Span},
        lang::{ENG, FRA},
        phoneme::PhonemeTables,
    };

    #[test]
    fn groups_by_family_and_language() {
        let codec = Codec::default();
        let enc = codec
            .encode(&[
                Span::new("Balaô", SAG),
                Span::untagged(" "),
                Span::new("hi", ENG),
                Span::new("oui", FRA),
            ])
            .unwrap();
        let units: Vec<_> = codec.units(&enc.tokens).collect();
        let texts: Vec<_> = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, ["Balaô", " ", "hi", "oui"]);
        assert_eq!(units[0].lang, Some(SAG));
        assert_eq!(units[1].lang, None);
        assert_eq!(units[2].lang, Some(ENG));
        assert_eq!(units[3].lang, Some(FRA));
        assert_eq!((units[3].start, units[3].len), (6, 3));
        assert!(units.iter().all(|u| u.issues.is_empty()));
    }

    #[test]
    fn adjacent_words_are_not_split_by_counts() {
        // two English words with nothing between them read as one unit
        let tokens = [
            Token::ascii_letter(b'a', AsciiLang::English, 0),
            Token::ascii_letter(b'b', AsciiLang::English, 0),
        ];
        let tables = PhonemeTables::new();
        let units: Vec<_> = Units::new(TokenCodec::new(&tables), &tokens).collect();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "ab");
    }

    #[test]
    fn stream_ending_mid_word_is_reported() {
        let tables = PhonemeTables::new();
        let tokens = [Token::ascii_letter(b'h', AsciiLang::English, 4)];
        let units: Vec<_> = Units::new(TokenCodec::new(&tables), &tokens).collect();
        assert_eq!(units[0].text, "h");
        assert_eq!(units[0].issues.len(), 1);
        assert_eq!(units[0].issues[0].kind, IssueKind::TruncatedStream);
        assert_eq!(units[0].issues[0].index, 0);
    }

    #[test]
    fn invalid_codes_are_contained_to_their_token() {
        let tables = PhonemeTables::new();
        // ba, then consonant 16 with vowel 8, then ka
        let tokens = [
            Token::from_bits(0b1_10_00_01101_0100_00),
            Token::from_bits(0b1_01_00_10000_1000_00),
            Token::from_bits(0b1_00_00_00011_0100_00),
        ];
        let units: Vec<_> = Units::new(TokenCodec::new(&tables), &tokens).collect();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "ba\u{25A1}\u{25A1}ka");
        let kinds: Vec<_> = units[0].issues.iter().map(|i| (i.kind, i.index)).collect();
        assert_eq!(
            kinds,
            [
                (IssueKind::InvalidPhonemeCode, 1),
                (IssueKind::InvalidPhonemeCode, 1)
            ]
        );
    }
}
