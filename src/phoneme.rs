//! Phoneme value types shared by the segmenter and the token codec.
//!
//! Codes are small integers indexing the [`tables::PhonemeTables`]. Both code
//! spaces reserve an `INVALID` sentinel that is carried through tokens like
//! any other value and rendered as [`PLACEHOLDER`] on decode.
pub mod tables;

pub use tables::PhonemeTables;

/// Glyph substituted for anything the token stream cannot represent:
/// codepoints above the 14-bit ceiling and invalid phoneme codes.
pub const PLACEHOLDER: char = '\u{25A1}';

/// Combining dot below (low tone).
pub const LOW_MARK: char = '\u{0323}';
/// Combining diaeresis (mid tone).
pub const MID_MARK: char = '\u{0308}';
/// Combining circumflex (high tone).
pub const HIGH_MARK: char = '\u{0302}';

/// 5-bit consonant cluster code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsonantCode(u8);

impl ConsonantCode {
    pub const BITS: u32 = 5;
    pub const MASK: u8 = 0x1F;
    /// Syllable with no onset (`"a"`, `"ân"`).
    pub const EMPTY: Self = Self(0);
    pub const INVALID: Self = Self(16);

    #[inline(always)]
    pub const fn new(raw: u8) -> Self {
        Self(raw & Self::MASK)
    }
    #[inline(always)]
    pub const fn raw(self) -> u8 {
        self.0
    }
    #[inline(always)]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

/// 4-bit vowel code; quality and nasalization are encoded jointly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VowelCode(u8);

impl VowelCode {
    pub const BITS: u32 = 4;
    pub const MASK: u8 = 0x0F;
    pub const INVALID: Self = Self(8);

    #[inline(always)]
    pub const fn new(raw: u8) -> Self {
        Self(raw & Self::MASK)
    }
    #[inline(always)]
    pub const fn raw(self) -> u8 {
        self.0
    }
    #[inline(always)]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

/// The nine oral vowel qualities of the orthography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VowelQuality {
    A,
    E,
    I,
    O,
    U,
    /// ɛ
    OpenE,
    /// ɔ
    OpenO,
    /// ə
    Schwa,
    /// ø
    OSlash,
}

impl VowelQuality {
    pub const ALL: [VowelQuality; 9] = [
        VowelQuality::A,
        VowelQuality::E,
        VowelQuality::I,
        VowelQuality::O,
        VowelQuality::U,
        VowelQuality::OpenE,
        VowelQuality::OpenO,
        VowelQuality::Schwa,
        VowelQuality::OSlash,
    ];

    /// Lowercase base letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            VowelQuality::A => 'a',
            VowelQuality::E => 'e',
            VowelQuality::I => 'i',
            VowelQuality::O => 'o',
            VowelQuality::U => 'u',
            VowelQuality::OpenE => '\u{025B}',
            VowelQuality::OpenO => '\u{0254}',
            VowelQuality::Schwa => '\u{0259}',
            VowelQuality::OSlash => '\u{00F8}',
        }
    }

    /// Case-insensitive inverse of [`letter`](Self::letter). Precomposed
    /// letters (`â`, `ï`) are not vowels here; callers work on NFD text.
    #[inline]
    pub fn from_letter(c: char) -> Option<Self> {
        match lowercase_char(c) {
            'a' => Some(VowelQuality::A),
            'e' => Some(VowelQuality::E),
            'i' => Some(VowelQuality::I),
            'o' => Some(VowelQuality::O),
            'u' => Some(VowelQuality::U),
            '\u{025B}' => Some(VowelQuality::OpenE),
            '\u{0254}' => Some(VowelQuality::OpenO),
            '\u{0259}' => Some(VowelQuality::Schwa),
            '\u{00F8}' => Some(VowelQuality::OSlash),
            _ => None,
        }
    }
}

/// Lexical tone, plus `Unknown` for unmarked input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Unknown,
    Low,
    Mid,
    High,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Unknown, Tone::Low, Tone::Mid, Tone::High];

    #[inline(always)]
    pub const fn bits(self) -> u16 {
        match self {
            Tone::Unknown => 0b00,
            Tone::Low => 0b01,
            Tone::Mid => 0b10,
            Tone::High => 0b11,
        }
    }

    #[inline(always)]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0b00 => Tone::Unknown,
            0b01 => Tone::Low,
            0b10 => Tone::Mid,
            _ => Tone::High,
        }
    }

    /// Combining mark written after the vowel letter, if any.
    #[inline]
    pub const fn mark(self) -> Option<char> {
        match self {
            Tone::Unknown => None,
            Tone::Low => Some(LOW_MARK),
            Tone::Mid => Some(MID_MARK),
            Tone::High => Some(HIGH_MARK),
        }
    }

    #[inline]
    pub const fn from_mark(c: char) -> Option<Self> {
        match c {
            LOW_MARK => Some(Tone::Low),
            MID_MARK => Some(Tone::Mid),
            HIGH_MARK => Some(Tone::High),
            _ => None,
        }
    }
}

/// Letter case of one syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Case {
    #[default]
    Lower,
    Title,
    Upper,
}

impl Case {
    /// Case of `text`, read from its first cased letter.
    ///
    /// A lowercase first letter gives `Lower`. An uppercase first letter gives
    /// `Upper` when at least one more cased letter follows and all of them
    /// are uppercase, `Title` otherwise.
    pub fn of(text: &str) -> Self {
        let mut cased = text.chars().filter(|c| c.is_lowercase() || c.is_uppercase());
        match cased.next() {
            None => Case::Lower,
            Some(first) if first.is_lowercase() => Case::Lower,
            Some(_) => {
                let mut rest = cased.peekable();
                if rest.peek().is_some() && rest.all(char::is_uppercase) {
                    Case::Upper
                } else {
                    Case::Title
                }
            }
        }
    }

    /// Rewrite `text` in this case.
    pub fn apply(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        match self {
            Case::Lower => out.extend(text.chars().flat_map(char::to_lowercase)),
            Case::Upper => out.extend(text.chars().flat_map(char::to_uppercase)),
            Case::Title => {
                let mut chars = text.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                }
                out.extend(chars.flat_map(char::to_lowercase));
            }
        }
        out
    }
}

/// Single-scalar lowercase; multi-scalar mappings leave `c` untouched.
#[inline]
pub(crate) fn lowercase_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
