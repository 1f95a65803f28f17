//! The 16-bit token and its three families.
//!
//! ```text
//! 0b_00_UUUUUUUUUUUUUU      Codepoint     U = scalar value (U+0000..=U+3FFF)
//! 0b_01_L_NNNNN_AAAAAAAA    AsciiLetter   L = 0 English / 1 French
//!                                         N = min(31, letters left in the word)
//!                                         A = Latin-1 value
//! 0b_1_SS_XX_CCCCC_VVVV_PP  Syllable      S = min(3, syllables left in the word)
//!                                         X = 00 lower, 01 Title, 10 -hyphen, 11 UPPER
//!                                         C = consonant code, V = vowel code
//!                                         P = 00 unknown, 01 low, 10 mid, 11 high
//! ```
//!
//! The family is read from bits 15 and 14 alone; no table lookup is needed to
//! classify a token.
use crate::{
    codec::{Issue, IssueKind},
    lang::AsciiLang,
    phoneme::{
        Case, ConsonantCode, PLACEHOLDER, PhonemeTables, Tone, VowelCode, lowercase_char,
    },
    segment::Syllable,
};
use std::fmt;

const SYLLABLE_BIT: u16 = 1 << 15;
const LETTER_BIT: u16 = 1 << 14;

const CODEPOINT_MASK: u16 = 0x3FFF;

const ASCII_LANG_SHIFT: u32 = 13;
const ASCII_LEFT_SHIFT: u32 = 8;
const ASCII_LEFT_MASK: u16 = 0x1F;
const ASCII_VALUE_MASK: u16 = 0xFF;

const SYL_TONE_BITS: u32 = 2;
const SYL_TONE_MASK: u16 = 0b11;
const SYL_VOWEL_SHIFT: u32 = SYL_TONE_BITS;
const SYL_CONS_SHIFT: u32 = SYL_VOWEL_SHIFT + VowelCode::BITS;
const SYL_CASE_SHIFT: u32 = SYL_CONS_SHIFT + ConsonantCode::BITS;
const SYL_CASE_MASK: u16 = 0b11;
const SYL_LEFT_SHIFT: u32 = SYL_CASE_SHIFT + 2;
const SYL_LEFT_MASK: u16 = 0b11;

/// Largest scalar a `Codepoint` token can carry.
pub const MAX_CODEPOINT: u32 = CODEPOINT_MASK as u32;
/// Saturation point of the `AsciiLetter` remaining-letters field.
pub const MAX_LETTERS_LEFT: u8 = ASCII_LEFT_MASK as u8;
/// Saturation point of the `Syllable` remaining-syllables field.
pub const MAX_SYLLABLES_LEFT: u8 = SYL_LEFT_MASK as u8;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Token(u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Codepoint,
    AsciiLetter,
    Syllable,
}

/// Token-level case field. The hyphen flag shares the field with case and
/// takes precedence over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMark {
    Lower,
    Title,
    Hyphen,
    Upper,
}

impl CaseMark {
    #[inline(always)]
    pub const fn bits(self) -> u16 {
        match self {
            CaseMark::Lower => 0b00,
            CaseMark::Title => 0b01,
            CaseMark::Hyphen => 0b10,
            CaseMark::Upper => 0b11,
        }
    }

    #[inline(always)]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0b00 => CaseMark::Lower,
            0b01 => CaseMark::Title,
            0b10 => CaseMark::Hyphen,
            _ => CaseMark::Upper,
        }
    }

    #[inline]
    pub const fn from_syllable(hyphen: bool, case: Case) -> Self {
        if hyphen {
            return CaseMark::Hyphen;
        }
        match case {
            Case::Lower => CaseMark::Lower,
            Case::Title => CaseMark::Title,
            Case::Upper => CaseMark::Upper,
        }
    }
}

/// Unpacked `Syllable` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyllableCode {
    pub left: u8,
    pub case: CaseMark,
    pub consonant: ConsonantCode,
    pub vowel: VowelCode,
    pub tone: Tone,
}

/// Unpacked `AsciiLetter` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AsciiLetter {
    pub value: u8,
    pub lang: AsciiLang,
    pub left: u8,
}

impl AsciiLetter {
    #[inline(always)]
    pub const fn char(&self) -> char {
        self.value as char
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoded {
    Codepoint(char),
    AsciiLetter(AsciiLetter),
    Syllable(SyllableCode),
}

impl Token {
    #[inline(always)]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub const fn kind(self) -> TokenKind {
        if self.0 & SYLLABLE_BIT != 0 {
            TokenKind::Syllable
        } else if self.0 & LETTER_BIT != 0 {
            TokenKind::AsciiLetter
        } else {
            TokenKind::Codepoint
        }
    }

    /// `Codepoint` token for `c`, or `None` if `c` is above [`MAX_CODEPOINT`].
    #[inline]
    pub const fn try_codepoint(c: char) -> Option<Self> {
        let v = c as u32;
        if v > MAX_CODEPOINT {
            None
        } else {
            Some(Self(v as u16))
        }
    }

    /// `Codepoint` token for `c`; scalars above [`MAX_CODEPOINT`] are
    /// replaced by [`PLACEHOLDER`] without a report. Use
    /// [`TokenCodec::encode_codepoint`] when the substitution must surface.
    #[inline]
    pub const fn codepoint(c: char) -> Self {
        match Self::try_codepoint(c) {
            Some(t) => t,
            None => Self(PLACEHOLDER as u16),
        }
    }

    /// `AsciiLetter` token. `left` saturates at [`MAX_LETTERS_LEFT`].
    #[inline]
    pub const fn ascii_letter(value: u8, lang: AsciiLang, left: usize) -> Self {
        let left = if left > MAX_LETTERS_LEFT as usize {
            MAX_LETTERS_LEFT as u16
        } else {
            left as u16
        };
        Self(
            LETTER_BIT
                | (lang.bit() << ASCII_LANG_SHIFT)
                | (left << ASCII_LEFT_SHIFT)
                | value as u16,
        )
    }

    #[inline]
    pub const fn pack(code: SyllableCode) -> Self {
        let left = if code.left > MAX_SYLLABLES_LEFT {
            MAX_SYLLABLES_LEFT
        } else {
            code.left
        };
        Self(
            SYLLABLE_BIT
                | ((left as u16) << SYL_LEFT_SHIFT)
                | (code.case.bits() << SYL_CASE_SHIFT)
                | ((code.consonant.raw() as u16) << SYL_CONS_SHIFT)
                | ((code.vowel.raw() as u16) << SYL_VOWEL_SHIFT)
                | code.tone.bits(),
        )
    }

    /// Split a token into its fields. Every `u16` is a valid token.
    pub const fn decode(self) -> Decoded {
        let b = self.0;
        match self.kind() {
            TokenKind::Codepoint => match char::from_u32((b & CODEPOINT_MASK) as u32) {
                Some(c) => Decoded::Codepoint(c),
                None => Decoded::Codepoint(PLACEHOLDER),
            },
            TokenKind::AsciiLetter => Decoded::AsciiLetter(AsciiLetter {
                value: (b & ASCII_VALUE_MASK) as u8,
                lang: AsciiLang::from_bit(b >> ASCII_LANG_SHIFT),
                left: ((b >> ASCII_LEFT_SHIFT) & ASCII_LEFT_MASK) as u8,
            }),
            TokenKind::Syllable => Decoded::Syllable(SyllableCode {
                left: ((b >> SYL_LEFT_SHIFT) & SYL_LEFT_MASK) as u8,
                case: CaseMark::from_bits(b >> SYL_CASE_SHIFT & SYL_CASE_MASK),
                consonant: ConsonantCode::new((b >> SYL_CONS_SHIFT) as u8),
                vowel: VowelCode::new((b >> SYL_VOWEL_SHIFT) as u8),
                tone: Tone::from_bits(b & SYL_TONE_MASK),
            }),
        }
    }
}

impl From<Token> for u16 {
    fn from(t: Token) -> u16 {
        t.0
    }
}

impl From<u16> for Token {
    fn from(bits: u16) -> Token {
        Token(bits)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({self})")
    }
}

/// Binary rendering with the fields of the token's family separated by `_`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        match self.kind() {
            TokenKind::Syllable => write!(
                f,
                "0b_1_{:02b}_{:02b}_{:05b}_{:04b}_{:02b}",
                (b >> SYL_LEFT_SHIFT) & SYL_LEFT_MASK,
                (b >> SYL_CASE_SHIFT) & SYL_CASE_MASK,
                (b >> SYL_CONS_SHIFT) & ConsonantCode::MASK as u16,
                (b >> SYL_VOWEL_SHIFT) & VowelCode::MASK as u16,
                b & SYL_TONE_MASK,
            ),
            TokenKind::AsciiLetter => write!(
                f,
                "0b_01_{:01b}_{:05b}_{:08b}",
                (b >> ASCII_LANG_SHIFT) & 1,
                (b >> ASCII_LEFT_SHIFT) & ASCII_LEFT_MASK,
                b & ASCII_VALUE_MASK,
            ),
            TokenKind::Codepoint => write!(f, "0b_00_{:014b}", b & CODEPOINT_MASK),
        }
    }
}

/// Spelling recovered from a `Syllable` token, in NFD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spelling {
    pub text: String,
    pub invalid_consonant: bool,
    pub invalid_vowel: bool,
}

impl Spelling {
    #[inline]
    pub fn is_lossy(&self) -> bool {
        self.invalid_consonant || self.invalid_vowel
    }
}

/// Single-token codec bound to a set of phoneme tables.
#[derive(Debug, Clone, Copy)]
pub struct TokenCodec<'t> {
    tables: &'t PhonemeTables,
}

impl<'t> TokenCodec<'t> {
    pub fn new(tables: &'t PhonemeTables) -> Self {
        Self { tables }
    }

    /// Syllable fields to codes. Spellings outside the inventory become the
    /// invalid sentinels; this never fails.
    pub fn code(&self, syllable: &Syllable<'_>) -> SyllableCode {
        SyllableCode {
            left: syllable.left,
            case: CaseMark::from_syllable(syllable.hyphen, syllable.case),
            consonant: self.tables.consonant(syllable.onset),
            vowel: self.tables.vowel_of(syllable.vowel, syllable.nasal),
            tone: syllable.tone,
        }
    }

    #[inline]
    pub fn encode_syllable(&self, syllable: &Syllable<'_>) -> Token {
        Token::pack(self.code(syllable))
    }

    #[inline]
    pub fn encode_ascii_letter(&self, value: u8, lang: AsciiLang, left: usize) -> Token {
        Token::ascii_letter(value, lang, left)
    }

    /// `Codepoint` token for `c`. A scalar above [`MAX_CODEPOINT`] becomes
    /// [`PLACEHOLDER`] and comes back with an `UnrepresentableCodepoint`
    /// issue located at `index`.
    pub fn encode_codepoint(&self, c: char, index: usize) -> (Token, Option<Issue>) {
        match Token::try_codepoint(c) {
            Some(t) => (t, None),
            None => {
                let issue = Issue::raise(
                    IssueKind::UnrepresentableCodepoint,
                    index,
                    format!(
                        "U+{:04X} replaced by U+{:04X}",
                        c as u32, PLACEHOLDER as u32
                    ),
                );
                (Token::codepoint(PLACEHOLDER), Some(issue))
            }
        }
    }

    #[inline]
    pub fn decode(&self, token: Token) -> Decoded {
        token.decode()
    }

    /// Rebuild the written form of a syllable: onset, vowel letter, tone
    /// mark, nasal `n`, then case or hyphen. Invalid or unassigned codes are
    /// written as [`PLACEHOLDER`].
    pub fn spell(&self, code: &SyllableCode) -> Spelling {
        let mut raw = String::with_capacity(8);
        let consonant = self.tables.consonant_spelling(code.consonant);
        match consonant {
            Some(onset) => raw.push_str(onset),
            None => raw.push(PLACEHOLDER),
        }
        let vowel = self.tables.vowel_phoneme(code.vowel);
        match vowel {
            Some((quality, _)) => raw.push(quality.letter()),
            None => raw.push(PLACEHOLDER),
        }
        if let Some(mark) = code.tone.mark() {
            raw.push(mark);
        }
        if let Some((_, true)) = vowel {
            raw.push('n');
        }

        let text = match code.case {
            CaseMark::Lower => raw,
            CaseMark::Title => Case::Title.apply(&raw),
            CaseMark::Upper => Case::Upper.apply(&raw),
            CaseMark::Hyphen => {
                let mut s = String::with_capacity(raw.len() + 1);
                s.push('-');
                s.extend(raw.chars().map(lowercase_char));
                s
            }
        };
        Spelling {
            text,
            invalid_consonant: consonant.is_none(),
            invalid_vowel: vowel.is_none(),
        }
    }
}
