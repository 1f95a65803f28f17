//! Phrase-level encode/decode.
//!
//! [`Codec::encode`] turns classified spans into one ordered token stream;
//! [`Codec::decode`] turns a stream back into text. Failures are confined to
//! the smallest unit that produced them (one word, one span, one token) and
//! surface as [`Issue`]s next to the result; only [`FailurePolicy::Abort`]
//! turns a failure into an error for the whole phrase.
pub mod units;

pub use units::{Unit, Units};

use crate::{
    lang::{AsciiLang, Lang, from_code},
    phoneme::PhonemeTables,
    pipeline::Pipeline,
    segment::{MalformedSyllable, Segmenter},
    stage::StageError,
    token::{Token, TokenCodec},
};
use std::{borrow::Cow, fmt, sync::Arc};
use thiserror::Error;
use tracing::{debug, debug_span, warn};

/// A run of text with the language assigned by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    /// `None` for text the classifier left untagged.
    pub lang: Option<Lang>,
}

impl<'a> Span<'a> {
    pub const fn new(text: &'a str, lang: Lang) -> Self {
        Self {
            text,
            lang: Some(lang),
        }
    }

    pub const fn untagged(text: &'a str) -> Self {
        Self { text, lang: None }
    }

    /// Tag by classifier code; unrecognized codes leave the span untagged.
    pub fn from_code(text: &'a str, code: &str) -> Self {
        Self {
            text,
            lang: from_code(code),
        }
    }
}

/// What to do with a word that does not segment, or a span whose language
/// has no token family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Encode the offending text codepoint by codepoint and report it.
    #[default]
    Fallback,
    /// Emit nothing for the offending text and report it.
    Skip,
    /// Stop and return the failure as a [`CodecError`].
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    UnclassifiedSpan,
    MalformedSyllable,
    UnrepresentableCodepoint,
    InvalidPhonemeCode,
    TruncatedStream,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IssueKind::UnclassifiedSpan => "unclassified_span",
            IssueKind::MalformedSyllable => "malformed_syllable",
            IssueKind::UnrepresentableCodepoint => "unrepresentable_codepoint",
            IssueKind::InvalidPhonemeCode => "invalid_phoneme_code",
            IssueKind::TruncatedStream => "truncated_stream",
        })
    }
}

/// A recovered, lossy event. `index` is the span index when encoding and
/// the token index when decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub index: usize,
    pub detail: String,
}

impl Issue {
    /// Build the issue and log it.
    pub(crate) fn raise(kind: IssueKind, index: usize, detail: String) -> Self {
        warn!(%kind, index, "{detail}");
        Self {
            kind,
            index,
            detail,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.index, self.detail)
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("span {index}: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: MalformedSyllable,
    },
    #[error("span {index}: no token family for language `{lang}`")]
    UnclassifiedSpan { index: usize, lang: Lang },
    #[error("span {index}: {source}")]
    Stage {
        index: usize,
        #[source]
        source: StageError,
    },
}

/// Result of [`Codec::encode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub tokens: Vec<Token>,
    pub issues: Vec<Issue>,
}

/// Result of [`Codec::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub issues: Vec<Issue>,
}

impl DecodedText {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Codec {
    tables: Arc<PhonemeTables>,
    policy: FailurePolicy,
    syllables: Pipeline,
    runes: Pipeline,
}

impl Default for Codec {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Codec {
    pub fn builder() -> CodecBuilder {
        CodecBuilder::default()
    }

    #[inline]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    #[inline]
    pub fn tables(&self) -> &PhonemeTables {
        &self.tables
    }

    #[inline]
    pub fn segmenter(&self) -> Segmenter<'_> {
        Segmenter::new(&self.tables)
    }

    #[inline]
    pub fn token_codec(&self) -> TokenCodec<'_> {
        TokenCodec::new(&self.tables)
    }

    /// Encode a classified phrase. Token order mirrors span order.
    pub fn encode(&self, spans: &[Span<'_>]) -> Result<Encoded, CodecError> {
        let _span = debug_span!("encode", spans = spans.len()).entered();
        let mut enc = Encoder {
            codec: self,
            out: Encoded::default(),
        };
        for (index, span) in spans.iter().enumerate() {
            enc.span(index, span)?;
        }
        debug!(
            tokens = enc.out.tokens.len(),
            issues = enc.out.issues.len(),
            "encoded"
        );
        Ok(enc.out)
    }

    /// Encode a single word under a classifier code (`"sg"`, `"en"`, `"fr"`;
    /// anything else is carried as raw codepoints).
    pub fn encode_word(&self, word: &str, code: &str) -> Result<Encoded, CodecError> {
        self.encode(&[Span::from_code(word, code)])
    }

    /// Decode a token stream. Never fails; lossy spots are reported.
    pub fn decode(&self, tokens: &[Token]) -> DecodedText {
        let _span = debug_span!("decode", tokens = tokens.len()).entered();
        let mut out = DecodedText {
            text: String::with_capacity(tokens.len()),
            issues: Vec::new(),
        };
        for unit in self.units(tokens) {
            out.text.push_str(&unit.text);
            out.issues.extend(unit.issues);
        }
        debug!(bytes = out.text.len(), issues = out.issues.len(), "decoded");
        out
    }

    /// Decode a token stream word by word.
    pub fn units<'a>(&'a self, tokens: &'a [Token]) -> Units<'a> {
        Units::new(self.token_codec(), tokens)
    }
}

#[derive(Debug, Default)]
pub struct CodecBuilder {
    tables: Option<Arc<PhonemeTables>>,
    policy: FailurePolicy,
}

impl CodecBuilder {
    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn tables(mut self, tables: Arc<PhonemeTables>) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn build(self) -> Codec {
        Codec {
            tables: self.tables.unwrap_or_else(PhonemeTables::shared),
            policy: self.policy,
            syllables: Pipeline::syllables(),
            runes: Pipeline::runes(),
        }
    }
}

enum Failure {
    Malformed(MalformedSyllable),
    Unclassified(Lang),
}

struct Encoder<'c> {
    codec: &'c Codec,
    out: Encoded,
}

impl Encoder<'_> {
    fn span(&mut self, index: usize, span: &Span<'_>) -> Result<(), CodecError> {
        match span.lang {
            None => self.runes(index, span.text, None),
            Some(lang) if lang.is_target() => self.sango(index, span.text),
            Some(lang) => match lang.ascii_lang() {
                Some(ascii) => self.runes(index, span.text, Some(ascii)),
                None => self.fail(index, Failure::Unclassified(lang), span.text),
            },
        }
    }

    /// Sango span: words go through the segmenter, whatever separates them
    /// is carried as codepoints.
    fn sango(&mut self, index: usize, text: &str) -> Result<(), CodecError> {
        let nfd = self
            .codec
            .syllables
            .process(Cow::Borrowed(text))
            .map_err(|source| CodecError::Stage { index, source })?;
        for (is_word, piece) in split_words(&nfd) {
            if !is_word {
                self.runes(index, piece, None)?;
                continue;
            }
            match self.codec.segmenter().segment(piece) {
                Ok(syllables) => {
                    let tc = self.codec.token_codec();
                    self.out
                        .tokens
                        .extend(syllables.iter().map(|s| tc.encode_syllable(s)));
                }
                Err(e) => self.fail(index, Failure::Malformed(e), piece)?,
            }
        }
        Ok(())
    }

    /// Auxiliary or untagged text: letters of an auxiliary language become
    /// `AsciiLetter` tokens counting down within each letter run, everything
    /// else becomes `Codepoint` tokens.
    fn runes(
        &mut self,
        index: usize,
        text: &str,
        lang: Option<AsciiLang>,
    ) -> Result<(), CodecError> {
        let text = self
            .codec
            .runes
            .process(Cow::Borrowed(text))
            .map_err(|source| CodecError::Stage { index, source })?;
        let Some(lang) = lang else {
            for c in text.chars() {
                self.codepoint(index, c);
            }
            return Ok(());
        };
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let run = chars[i..].iter().take_while(|&&c| is_letter(c)).count();
            if run == 0 {
                self.codepoint(index, chars[i]);
                i += 1;
                continue;
            }
            for (k, &c) in chars[i..i + run].iter().enumerate() {
                self.out
                    .tokens
                    .push(Token::ascii_letter(c as u8, lang, run - 1 - k));
            }
            i += run;
        }
        Ok(())
    }

    fn codepoint(&mut self, index: usize, c: char) {
        let (token, issue) = self.codec.token_codec().encode_codepoint(c, index);
        self.out.tokens.push(token);
        self.out.issues.extend(issue);
    }

    fn fail(&mut self, index: usize, failure: Failure, text: &str) -> Result<(), CodecError> {
        let policy = self.codec.policy;
        let (kind, detail) = match failure {
            Failure::Malformed(e) if policy == FailurePolicy::Abort => {
                return Err(CodecError::Malformed { index, source: e });
            }
            Failure::Unclassified(lang) if policy == FailurePolicy::Abort => {
                return Err(CodecError::UnclassifiedSpan { index, lang });
            }
            Failure::Malformed(e) => (IssueKind::MalformedSyllable, e.to_string()),
            Failure::Unclassified(lang) => (
                IssueKind::UnclassifiedSpan,
                format!("no token family for language `{lang}`"),
            ),
        };
        match policy {
            FailurePolicy::Fallback => {
                self.out.issues.push(Issue::raise(
                    kind,
                    index,
                    format!("{detail}; encoded as codepoints"),
                ));
                self.runes(index, text, None)
            }
            FailurePolicy::Skip | FailurePolicy::Abort => {
                self.out
                    .issues
                    .push(Issue::raise(kind, index, format!("{detail}; dropped")));
                Ok(())
            }
        }
    }
}

/// Letters carried by `AsciiLetter` tokens: alphabetic and within Latin-1.
#[inline]
fn is_letter(c: char) -> bool {
    (c as u32) <= 0xFF && c.is_alphabetic()
}

/// Characters that can belong to a Sango word (in NFD). A hyphen belongs to
/// the word only when a letter follows it.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Split NFD text into alternating word / separator pieces.
fn split_words(text: &str) -> Vec<(bool, &str)> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_word = None;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let word = is_word_char(c)
            || (c == '-' && chars.peek().is_some_and(|&(_, n)| n.is_alphabetic()));
        match in_word {
            Some(prev) if prev != word => {
                pieces.push((prev, &text[start..i]));
                start = i;
            }
            _ => {}
        }
        in_word = Some(word);
    }
    if let Some(prev) = in_word {
        pieces.push((prev, &text[start..]));
    }
    pieces
}
