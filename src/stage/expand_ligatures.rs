use crate::stage::{Stage, StageError};
use std::borrow::Cow;

/// Typewriter punctuation and the typographic character it stands for,
/// longest first within each family.
pub const LIGATURES: &[(&str, char)] = &[
    ("...", '\u{2026}'), // …
    ("<<", '\u{00AB}'),  // «
    (">>", '\u{00BB}'),  // »
    ("``", '\u{201C}'),  // “
    ("''", '\u{201D}'),  // ”
    ("---", '\u{2014}'), // —
    ("--", '\u{2013}'),  // –
];

/// Replace ASCII punctuation sequences with their typographic forms.
///
/// | Input | Output |
/// |-------|--------|
/// | `...` | `…` |
/// | `<<` / `>>` | `«` / `»` |
/// | ` `` ` / `''` | `“` / `”` |
/// | `---` / `--` | `—` / `–` |
///
/// Matching is left to right and non-overlapping, so `----` becomes `—-`.
/// Part of the codec's contract for non-Sango text: decode reproduces the
/// expanded form, never the ASCII one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpandLigatures;

impl ExpandLigatures {
    #[inline]
    fn match_at(rest: &str) -> Option<(&'static str, char)> {
        LIGATURES.iter().copied().find(|(from, _)| rest.starts_with(from))
    }
}

impl Stage for ExpandLigatures {
    fn name(&self) -> &'static str {
        "expand_ligatures"
    }

    #[inline]
    fn needs_apply(&self, text: &str) -> Result<bool, StageError> {
        let b = text.as_bytes();
        Ok(b.windows(2).any(|w| {
            matches!(w, [b'<', b'<'] | [b'>', b'>'] | [b'`', b'`'] | [b'\'', b'\''] | [b'-', b'-'])
        }) || text.contains("..."))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text)? {
            return Ok(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut rest: &str = &text;
        while let Some(c) = rest.chars().next() {
            if let Some((from, to)) = Self::match_at(rest) {
                out.push(to);
                rest = &rest[from.len()..];
            } else {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
        Ok(Cow::Owned(out))
    }
}
