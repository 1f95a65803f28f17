//! Right-anchored greedy syllable segmentation of one Sango word.
//!
//! A syllable is `-? C? V T? n?`: an optional hyphen, an optional consonant
//! cluster from the inventory, exactly one vowel letter, an optional tone
//! mark and an optional nasal `n`. The segmenter repeatedly strips the
//! longest such suffix from the end of the word; when nothing matches and
//! text remains, the word is malformed and no boundary is guessed.
//!
//! Input must be NFD so that tone marks are separate combining characters.
use crate::phoneme::{
    Case, PhonemeTables, Tone, VowelQuality,
    tables::MAX_CLUSTER_LEN,
};
use crate::token::MAX_SYLLABLES_LEFT;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed syllable in `{word}`: no syllable ends `{rest}`")]
pub struct MalformedSyllable {
    /// The whole word being segmented.
    pub word: String,
    /// The unconsumed prefix at the point of failure.
    pub rest: String,
}

/// One syllable as written, borrowed from the (NFD) word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable<'w> {
    /// Matched text, hyphen included.
    pub text: &'w str,
    pub hyphen: bool,
    pub case: Case,
    /// Consonant cluster as written (may be empty or uppercase).
    pub onset: &'w str,
    /// Vowel base letter as written.
    pub vowel: char,
    pub nasal: bool,
    pub tone: Tone,
    /// Syllables after this one in the same word, saturated at 3.
    pub left: u8,
}

pub type Syllables<'w> = SmallVec<[Syllable<'w>; 4]>;

#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'t> {
    tables: &'t PhonemeTables,
}

impl<'t> Segmenter<'t> {
    pub fn new(tables: &'t PhonemeTables) -> Self {
        Self { tables }
    }

    /// Split `word` (NFD) into syllables, left to right.
    pub fn segment<'w>(&self, word: &'w str) -> Result<Syllables<'w>, MalformedSyllable> {
        let mut out = Syllables::new();
        let mut rest = word;
        while !rest.is_empty() {
            let left = out.len().min(MAX_SYLLABLES_LEFT as usize) as u8;
            let Some((start, syllable)) = self.last_syllable(rest, left) else {
                return Err(MalformedSyllable {
                    word: word.to_owned(),
                    rest: rest.to_owned(),
                });
            };
            out.push(syllable);
            rest = &rest[..start];
        }
        out.reverse();
        Ok(out)
    }

    /// Match the final syllable of `prefix`; returns its byte offset.
    fn last_syllable<'w>(&self, prefix: &'w str, left: u8) -> Option<(usize, Syllable<'w>)> {
        let end = prefix.len();
        let (mut cut, mut c) = last_char(prefix)?;

        let nasal = matches!(c, 'n' | 'N');
        if nasal {
            (cut, c) = last_char(&prefix[..cut])?;
        }

        let tone = Tone::from_mark(c).unwrap_or_default();
        if tone != Tone::Unknown {
            (cut, c) = last_char(&prefix[..cut])?;
        }

        VowelQuality::from_letter(c)?;
        let vowel = c;
        let vowel_at = cut;

        // Longest cluster ending right before the vowel. Clusters are ASCII,
        // so a byte window on a char boundary is also a char window.
        let onset_at = (1..=MAX_CLUSTER_LEN.min(vowel_at))
            .rev()
            .map(|len| vowel_at - len)
            .find(|&at| {
                prefix.is_char_boundary(at) && self.tables.is_cluster(&prefix[at..vowel_at])
            })
            .unwrap_or(vowel_at);

        let hyphen = prefix[..onset_at].ends_with('-');
        let start = if hyphen { onset_at - 1 } else { onset_at };

        Some((
            start,
            Syllable {
                text: &prefix[start..end],
                hyphen,
                case: Case::of(&prefix[onset_at..end]),
                onset: &prefix[onset_at..vowel_at],
                vowel,
                nasal,
                tone,
                left,
            },
        ))
    }
}

#[inline]
fn last_char(s: &str) -> Option<(usize, char)> {
    s.char_indices().next_back()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'w>(syllables: &Syllables<'w>) -> Vec<&'w str> {
        syllables.iter().map(|s| s.text).collect()
    }

    #[test]
    fn splits_from_the_right() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        let s = seg.segment("kodoro").unwrap();
        assert_eq!(texts(&s), ["ko", "do", "ro"]);
        assert_eq!(s.iter().map(|s| s.left).collect::<Vec<_>>(), [2, 1, 0]);
    }

    #[test]
    fn prefers_the_longest_cluster() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        assert_eq!(texts(&seg.segment("ngbanga").unwrap()), ["ngba", "nga"]);
        assert_eq!(texts(&seg.segment("kpaka").unwrap()), ["kpa", "ka"]);
        assert_eq!(texts(&seg.segment("anda").unwrap()), ["a", "nda"]);
        let s = seg.segment("kpa").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].onset, "kp");
    }

    #[test]
    fn reads_tone_and_nasal() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        // ahön, NFD
        let s = seg.segment("aho\u{0308}n").unwrap();
        assert_eq!(texts(&s), ["a", "ho\u{0308}n"]);
        assert_eq!(s[1].tone, Tone::Mid);
        assert!(s[1].nasal);
        assert_eq!(s[1].onset, "h");
        assert_eq!(s[0].onset, "");
        assert!(!s[0].nasal);
    }

    #[test]
    fn nasal_n_stays_with_its_vowel_at_word_end_only() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        assert_eq!(texts(&seg.segment("nan").unwrap()), ["nan"]);
        assert_eq!(texts(&seg.segment("bi\u{0308}ne").unwrap()), ["bi\u{0308}", "ne"]);
    }

    #[test]
    fn case_is_per_syllable() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        // Bɛ̂-bïn
        let s = seg
            .segment("B\u{025B}\u{0302}-bi\u{0308}n")
            .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!((s[0].case, s[0].hyphen, s[0].left), (Case::Title, false, 1));
        assert_eq!((s[1].case, s[1].hyphen, s[1].left), (Case::Lower, true, 0));
        assert_eq!(s[1].text, "-bi\u{0308}n");

        let s = seg.segment("MBI\u{0308}").unwrap();
        assert_eq!(s[0].case, Case::Upper);
        assert_eq!(s[0].onset, "MB");
    }

    #[test]
    fn remaining_count_saturates() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        let s = seg.segment("babababababa").unwrap();
        assert_eq!(
            s.iter().map(|s| s.left).collect::<Vec<_>>(),
            [3, 3, 3, 2, 1, 0]
        );
    }

    #[test]
    fn rejects_what_it_cannot_split() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        for word in ["bak", "ng", "-", "a b", "x", "ba-", "a\u{0302}\u{0308}"] {
            let err = seg.segment(word).unwrap_err();
            assert_eq!(err.word, word);
        }
        let err = seg.segment("xba").unwrap_err();
        assert_eq!(err.rest, "x");
    }

    #[test]
    fn empty_word_has_no_syllables() {
        let tables = PhonemeTables::new();
        assert!(Segmenter::new(&tables).segment("").unwrap().is_empty());
    }

    #[test]
    fn precomposed_input_is_rejected() {
        let tables = PhonemeTables::new();
        // "ï" must arrive as i + U+0308
        assert!(Segmenter::new(&tables).segment("b\u{00EF}").is_err());
    }
}
