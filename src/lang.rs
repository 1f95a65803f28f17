//! Language tags attached to spans by the upstream classifier.
//!
//! The codec only distinguishes three languages: Sango (the target language,
//! encoded syllable by syllable) and the two auxiliary languages English and
//! French (encoded letter by letter). Anything else is carried as raw
//! codepoints.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lang {
    pub code: &'static str,
    pub name: &'static str,
}

impl Lang {
    #[inline(always)]
    pub const fn code(&self) -> &'static str {
        self.code
    }
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// `true` for the language encoded as syllable tokens.
    #[inline(always)]
    pub fn is_target(&self) -> bool {
        *self == SAG
    }

    /// The one-bit language carried by `AsciiLetter` tokens, if this is an
    /// auxiliary language.
    #[inline]
    pub fn ascii_lang(&self) -> Option<AsciiLang> {
        match *self {
            ENG => Some(AsciiLang::English),
            FRA => Some(AsciiLang::French),
            _ => None,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

pub const SAG: Lang = Lang {
    code: "sg",
    name: "Sango",
};
pub const ENG: Lang = Lang {
    code: "en",
    name: "English",
};
pub const FRA: Lang = Lang {
    code: "fr",
    name: "French",
};

/// Resolve a classifier language code. Accepts the two-letter codes used on
/// the wire (`sg`, `en`, `fr`) and the ISO 639-2 forms, case-insensitively.
pub fn from_code(code: &str) -> Option<Lang> {
    let lower = code.to_ascii_lowercase();
    match lower.as_str() {
        "sg" | "sag" => Some(SAG),
        "en" | "eng" => Some(ENG),
        "fr" | "fra" | "fre" => Some(FRA),
        _ => None,
    }
}

/// Language bit of an `AsciiLetter` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsciiLang {
    English,
    French,
}

impl AsciiLang {
    #[inline(always)]
    pub const fn bit(self) -> u16 {
        match self {
            AsciiLang::English => 0,
            AsciiLang::French => 1,
        }
    }

    #[inline(always)]
    pub const fn from_bit(bit: u16) -> Self {
        if bit & 1 == 0 {
            AsciiLang::English
        } else {
            AsciiLang::French
        }
    }

    #[inline]
    pub const fn lang(self) -> Lang {
        match self {
            AsciiLang::English => ENG,
            AsciiLang::French => FRA,
        }
    }
}
