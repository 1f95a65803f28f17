//! Closed phoneme inventories and their code assignments.
//!
//! Forward lookups (spelling → code) are compile-time `phf` maps; the
//! reverse direction is built once from the canonical lists below, so an
//! aliased spelling never wins over the canonical one on decode.
//!
//! ```text
//! consonant (5 bits)                       vowel + nasal (4 bits)
//!  0 ""   1 f   2 r   3 k   4 mv  5 v       1 u   2 ɔ   3 ɛ   4 a
//!  6 ng   7 g   8 m   9 p  10 l  11 kp      5 i   6 o   7 e   8 --
//! 12 mb  13 b  14 ngb 15 gb 16 -- 17 s      9 un 10 ø  11 ə  12 an
//! 18 y   19 h  20 nz 21 z  22 ny 23 w      13 in 14 on 15 en
//! 24 n   25 t  26 nd 27 d  28 mp
//! ```
//! `--` marks the invalid sentinels. Consonant codes 29..=31 and vowel code 0
//! are unassigned and decode like the sentinel.
use super::{ConsonantCode, VowelCode, VowelQuality, lowercase_char};
use phf::{Map, phf_map};
use std::sync::{Arc, LazyLock};

static CONSONANTS: Map<&'static str, u8> = phf_map! {
    "" => 0,
    "f" => 1,
    "r" => 2,
    "k" => 3,
    "mv" => 4,
    "v" => 5,
    "ng" => 6,
    "g" => 7,
    "m" => 8,
    "p" => 9,
    "l" => 10,
    "kp" => 11,
    "mb" => 12,
    "b" => 13,
    "ngb" => 14,
    "gb" => 15,
    "s" => 17,
    "y" => 18,
    "h" => 19,
    "nz" => 20,
    "z" => 21,
    "ny" => 22,
    "w" => 23,
    "n" => 24,
    "t" => 25,
    "nd" => 26,
    "d" => 27,
    "mp" => 28,
};

// Oral vowels first, then nasal. `ɔn`/`øn` share the `on` code and
// `ɛn`/`ən` share the `en` code.
static VOWELS: Map<&'static str, u8> = phf_map! {
    "u" => 1,
    "ɔ" => 2,
    "ɛ" => 3,
    "a" => 4,
    "i" => 5,
    "o" => 6,
    "e" => 7,
    "ø" => 10,
    "ə" => 11,
    "un" => 9,
    "an" => 12,
    "in" => 13,
    "on" => 14,
    "en" => 15,
    "ɔn" => 14,
    "øn" => 14,
    "ɛn" => 15,
    "ən" => 15,
};

/// Canonical spelling for each assigned consonant code.
const CONSONANT_SPELLINGS: [(&str, u8); 28] = [
    ("", 0),
    ("f", 1),
    ("r", 2),
    ("k", 3),
    ("mv", 4),
    ("v", 5),
    ("ng", 6),
    ("g", 7),
    ("m", 8),
    ("p", 9),
    ("l", 10),
    ("kp", 11),
    ("mb", 12),
    ("b", 13),
    ("ngb", 14),
    ("gb", 15),
    ("s", 17),
    ("y", 18),
    ("h", 19),
    ("nz", 20),
    ("z", 21),
    ("ny", 22),
    ("w", 23),
    ("n", 24),
    ("t", 25),
    ("nd", 26),
    ("d", 27),
    ("mp", 28),
];

/// Canonical (quality, nasal) for each assigned vowel code.
const VOWEL_PHONEMES: [(VowelQuality, bool, u8); 14] = [
    (VowelQuality::U, false, 1),
    (VowelQuality::OpenO, false, 2),
    (VowelQuality::OpenE, false, 3),
    (VowelQuality::A, false, 4),
    (VowelQuality::I, false, 5),
    (VowelQuality::O, false, 6),
    (VowelQuality::E, false, 7),
    (VowelQuality::U, true, 9),
    (VowelQuality::OSlash, false, 10),
    (VowelQuality::Schwa, false, 11),
    (VowelQuality::A, true, 12),
    (VowelQuality::I, true, 13),
    (VowelQuality::O, true, 14),
    (VowelQuality::E, true, 15),
];

/// Longest consonant spelling, in bytes (and chars: all ASCII).
pub const MAX_CLUSTER_LEN: usize = 3;

static SHARED: LazyLock<Arc<PhonemeTables>> = LazyLock::new(|| Arc::new(PhonemeTables::new()));

/// Immutable bidirectional phoneme tables.
///
/// Built once per process via [`PhonemeTables::shared`] and handed to the
/// segmenter and token codec by reference; never mutated afterwards.
#[derive(Debug)]
pub struct PhonemeTables {
    consonants: &'static Map<&'static str, u8>,
    vowels: &'static Map<&'static str, u8>,
    consonant_spellings: [Option<&'static str>; 32],
    vowel_phonemes: [Option<(VowelQuality, bool)>; 16],
}

impl Default for PhonemeTables {
    fn default() -> Self {
        Self::new()
    }
}

impl PhonemeTables {
    pub fn new() -> Self {
        let mut consonant_spellings = [None; 32];
        for (spelling, code) in CONSONANT_SPELLINGS {
            consonant_spellings[code as usize] = Some(spelling);
        }
        let mut vowel_phonemes = [None; 16];
        for (quality, nasal, code) in VOWEL_PHONEMES {
            vowel_phonemes[code as usize] = Some((quality, nasal));
        }
        Self {
            consonants: &CONSONANTS,
            vowels: &VOWELS,
            consonant_spellings,
            vowel_phonemes,
        }
    }

    /// Process-wide instance.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Code for a consonant cluster spelling, case-insensitive. Unknown
    /// spellings yield [`ConsonantCode::INVALID`].
    pub fn consonant(&self, spelling: &str) -> ConsonantCode {
        if spelling.len() > MAX_CLUSTER_LEN || !spelling.is_ascii() {
            return ConsonantCode::INVALID;
        }
        let mut buf = [0u8; MAX_CLUSTER_LEN];
        let buf = &mut buf[..spelling.len()];
        buf.copy_from_slice(spelling.as_bytes());
        buf.make_ascii_lowercase();
        std::str::from_utf8(buf)
            .ok()
            .and_then(|key| self.consonants.get(key))
            .map_or(ConsonantCode::INVALID, |&c| ConsonantCode::new(c))
    }

    /// `true` if `spelling` is a non-empty onset in the inventory.
    #[inline]
    pub fn is_cluster(&self, spelling: &str) -> bool {
        !spelling.is_empty() && !self.consonant(spelling).is_invalid()
    }

    /// Code for a vowel spelling such as `"ɛ"` or `"on"`, case-insensitive.
    /// Unknown spellings yield [`VowelCode::INVALID`].
    pub fn vowel(&self, spelling: &str) -> VowelCode {
        let mut chars = spelling.chars();
        let Some(letter) = chars.next() else {
            return VowelCode::INVALID;
        };
        let nasal = match (chars.next(), chars.next()) {
            (None, _) => false,
            (Some('n' | 'N'), None) => true,
            _ => return VowelCode::INVALID,
        };
        self.vowel_of(letter, nasal)
    }

    /// Code for a single vowel letter plus nasalization.
    pub fn vowel_of(&self, letter: char, nasal: bool) -> VowelCode {
        let mut buf = [0u8; 5];
        let len = lowercase_char(letter).encode_utf8(&mut buf).len();
        let len = if nasal {
            buf[len] = b'n';
            len + 1
        } else {
            len
        };
        std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|key| self.vowels.get(key))
            .map_or(VowelCode::INVALID, |&c| VowelCode::new(c))
    }

    /// Canonical lowercase spelling of a consonant code; `None` for the
    /// sentinel and unassigned codes.
    #[inline]
    pub fn consonant_spelling(&self, code: ConsonantCode) -> Option<&'static str> {
        self.consonant_spellings[code.raw() as usize]
    }

    /// Canonical (quality, nasal) of a vowel code; `None` for the sentinel
    /// and unassigned codes.
    #[inline]
    pub fn vowel_phoneme(&self, code: VowelCode) -> Option<(VowelQuality, bool)> {
        self.vowel_phonemes[code.raw() as usize]
    }

    /// All assigned consonants in code order.
    pub fn consonants(&self) -> impl Iterator<Item = (&'static str, ConsonantCode)> + '_ {
        CONSONANT_SPELLINGS
            .iter()
            .map(|&(s, c)| (s, ConsonantCode::new(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_matches_closed_set() {
        let t = PhonemeTables::new();
        let mut spellings: Vec<_> = t.consonants().map(|(s, _)| s).collect();
        spellings.sort_unstable();
        assert_eq!(
            spellings,
            [
                "", "b", "d", "f", "g", "gb", "h", "k", "kp", "l", "m", "mb", "mp", "mv", "n",
                "nd", "ng", "ngb", "ny", "nz", "p", "r", "s", "t", "v", "w", "y", "z"
            ]
        );
    }

    #[test]
    fn canonical_lists_agree_with_lookup_maps() {
        let t = PhonemeTables::new();
        for (spelling, code) in CONSONANT_SPELLINGS {
            assert_eq!(t.consonant(spelling).raw(), code, "{spelling:?}");
            assert_eq!(t.consonant_spelling(ConsonantCode::new(code)), Some(spelling));
        }
        for (quality, nasal, code) in VOWEL_PHONEMES {
            assert_eq!(t.vowel_of(quality.letter(), nasal).raw(), code);
            assert_eq!(t.vowel_phoneme(VowelCode::new(code)), Some((quality, nasal)));
        }
        assert_eq!(CONSONANTS.len(), CONSONANT_SPELLINGS.len());
    }

    #[test]
    fn sentinels_have_no_spelling() {
        let t = PhonemeTables::new();
        assert_eq!(t.consonant_spelling(ConsonantCode::INVALID), None);
        assert_eq!(t.vowel_phoneme(VowelCode::INVALID), None);
        assert_eq!(t.vowel_phoneme(VowelCode::new(0)), None);
        for raw in 29..=31 {
            assert_eq!(t.consonant_spelling(ConsonantCode::new(raw)), None);
        }
    }

    #[test]
    fn lookups_fail_closed() {
        let t = PhonemeTables::new();
        assert!(t.consonant("x").is_invalid());
        assert!(t.consonant("ngbx").is_invalid());
        assert!(t.consonant("ɛ").is_invalid());
        assert!(t.vowel("").is_invalid());
        assert!(t.vowel("q").is_invalid());
        assert!(t.vowel("ann").is_invalid());
        assert!(t.vowel("am").is_invalid());
    }

    #[test]
    fn lookups_ignore_case() {
        let t = PhonemeTables::new();
        assert_eq!(t.consonant("NGB"), t.consonant("ngb"));
        assert_eq!(t.consonant("Kp"), t.consonant("kp"));
        assert_eq!(t.vowel("AN"), t.vowel("an"));
        assert_eq!(t.vowel_of('\u{0190}', false), t.vowel("ɛ"));
    }

    #[test]
    fn rare_nasal_mid_vowels_are_aliased() {
        let t = PhonemeTables::new();
        assert_eq!(t.vowel("ɔn"), t.vowel("on"));
        assert_eq!(t.vowel("øn"), t.vowel("on"));
        assert_eq!(t.vowel("ɛn"), t.vowel("en"));
        assert_eq!(t.vowel("ən"), t.vowel("en"));
        assert_eq!(
            t.vowel_phoneme(t.vowel("ən")),
            Some((VowelQuality::E, true))
        );
    }

    #[test]
    fn every_oral_and_nasal_vowel_has_a_valid_code() {
        let t = PhonemeTables::new();
        for q in VowelQuality::ALL {
            for nasal in [false, true] {
                assert!(!t.vowel_of(q.letter(), nasal).is_invalid(), "{q:?} {nasal}");
            }
        }
    }

    #[test]
    fn shared_instance_is_reused() {
        let a = PhonemeTables::shared();
        let b = PhonemeTables::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
