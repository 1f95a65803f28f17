#[cfg(test)]
mod unit_tests {
    use crate::phoneme::{Case, ConsonantCode, VowelCode};
    use crate::token::{CaseMark, SyllableCode};
    use crate::{
        Codec, Decoded, ENG, PhonemeTables, SAG, Segmenter, Span, Token, TokenCodec, TokenKind,
        Tone,
    };
    use unicode_normalization::UnicodeNormalization;

    const CASES: [CaseMark; 4] = [
        CaseMark::Lower,
        CaseMark::Title,
        CaseMark::Hyphen,
        CaseMark::Upper,
    ];

    fn written(raw: &str, case: CaseMark) -> String {
        match case {
            CaseMark::Lower => raw.to_string(),
            CaseMark::Title => Case::Title.apply(raw),
            CaseMark::Upper => Case::Upper.apply(raw),
            CaseMark::Hyphen => format!("-{raw}"),
        }
    }

    #[test]
    fn every_assigned_syllable_survives_spelling_and_segmenting() {
        let codec = Codec::default();
        let tables = PhonemeTables::new();
        let tc = TokenCodec::new(&tables);
        let seg = Segmenter::new(&tables);
        let vowels: Vec<(VowelCode, bool)> = (0..16)
            .map(VowelCode::new)
            .filter_map(|v| tables.vowel_phoneme(v).map(|(_, nasal)| (v, nasal)))
            .collect();
        assert_eq!(vowels.len(), 14);

        let mut checked = 0;
        for (_, consonant) in tables.consonants() {
            for &(vowel, nasal) in &vowels {
                for tone in Tone::ALL {
                    for case in CASES {
                        // a lone oral vowel has one cased letter: UPPER reads as Title
                        if case == CaseMark::Upper && consonant == ConsonantCode::EMPTY && !nasal {
                            continue;
                        }
                        let code = SyllableCode {
                            left: 0,
                            case,
                            consonant,
                            vowel,
                            tone,
                        };
                        let token = Token::pack(code);
                        let spelled = tc.spell(&code);
                        assert!(!spelled.is_lossy());
                        let syllables = seg.segment(&spelled.text).unwrap();
                        assert_eq!(syllables.len(), 1, "{:?}", spelled.text);
                        assert_eq!(tc.encode_syllable(&syllables[0]), token, "{:?}", spelled.text);

                        let dec = codec.decode(&[token]);
                        assert!(dec.is_clean(), "{token}");
                        assert_eq!(dec.text, spelled.text.nfc().collect::<String>());
                        assert_eq!(codec.encode_word(&dec.text, "sg").unwrap().tokens, [token]);
                        checked += 1;
                    }
                }
            }
        }
        assert_eq!(checked, 28 * 14 * 4 * 4 - 9 * 4);
    }

    #[test]
    fn aliased_nasal_spellings_encode_to_the_canonical_code() {
        let codec = Codec::default();
        let tables = PhonemeTables::new();
        let tc = TokenCodec::new(&tables);
        for (alias, canonical) in [('ɔ', "on"), ('ø', "on"), ('ɛ', "en"), ('ə', "en")] {
            let vowel = tables.vowel(canonical);
            for (onset, consonant) in tables.consonants() {
                for tone in Tone::ALL {
                    for case in CASES {
                        let mut raw = format!("{onset}{alias}");
                        raw.extend(tone.mark());
                        raw.push('n');
                        let word = written(&raw, case);

                        let enc = codec.encode_word(&word, "sg").unwrap();
                        assert!(enc.issues.is_empty(), "{word}");
                        let code = SyllableCode {
                            left: 0,
                            case,
                            consonant,
                            vowel,
                            tone,
                        };
                        assert_eq!(enc.tokens, [Token::pack(code)], "{word}");
                        assert_eq!(
                            codec.decode(&enc.tokens).text,
                            tc.spell(&code).text.nfc().collect::<String>(),
                            "{word}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn every_cluster_is_taken_whole() {
        let tables = PhonemeTables::new();
        let seg = Segmenter::new(&tables);
        for (spelling, code) in tables.consonants() {
            let word = format!("a{spelling}a");
            let syllables = seg.segment(&word).unwrap();
            let last = syllables.last().unwrap();
            assert_eq!(last.onset, spelling, "{word}");
            assert_eq!(tables.consonant(last.onset), code);
        }
    }

    #[test]
    fn codepoints_below_the_ceiling_pass_through() {
        let codec = Codec::default();
        for c in ['\0', '\t', '$', '\u{00FF}', '\u{0410}', '\u{2014}', '\u{3FFF}'] {
            let text = c.to_string();
            let enc = codec.encode(&[Span::untagged(&text)]).unwrap();
            assert_eq!(enc.tokens, [Token::codepoint(c)]);
            assert!(enc.issues.is_empty());
            assert_eq!(codec.decode(&enc.tokens).text, text);
        }
    }

    #[test]
    fn remaining_counts_count_down_per_word() {
        let codec = Codec::default();
        let enc = codec
            .encode(&[Span::new("ko ngbanga", SAG), Span::new(" go on", ENG)])
            .unwrap();
        let left: Vec<(TokenKind, u8)> = enc
            .tokens
            .iter()
            .map(|t| match t.decode() {
                Decoded::Codepoint(_) => (TokenKind::Codepoint, 0),
                Decoded::AsciiLetter(a) => (TokenKind::AsciiLetter, a.left),
                Decoded::Syllable(s) => (TokenKind::Syllable, s.left),
            })
            .collect();
        assert_eq!(
            left,
            [
                (TokenKind::Syllable, 0),
                (TokenKind::Codepoint, 0),
                (TokenKind::Syllable, 1),
                (TokenKind::Syllable, 0),
                (TokenKind::Codepoint, 0),
                (TokenKind::AsciiLetter, 1),
                (TokenKind::AsciiLetter, 0),
                (TokenKind::Codepoint, 0),
                (TokenKind::AsciiLetter, 1),
                (TokenKind::AsciiLetter, 0),
            ]
        );
    }

    #[test]
    fn tone_is_kept_as_written() {
        let codec = Codec::default();
        for (word, tone) in [
            ("ba", Tone::Unknown),
            ("bạ", Tone::Low),
            ("bä", Tone::Mid),
            ("bâ", Tone::High),
        ] {
            let enc = codec.encode_word(word, "sg").unwrap();
            let Decoded::Syllable(code) = enc.tokens[0].decode() else {
                panic!("{word} is not a syllable");
            };
            assert_eq!(code.tone, tone);
            assert_eq!(codec.decode(&enc.tokens).text, word);
        }
    }
}
