use crate::stage::{ExpandLigatures, NFC, NFD, Stage, StageError};
use std::borrow::Cow;
use std::sync::Arc;

/// Ordered list of stages applied to one span.
#[derive(Clone)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Preparation for Sango words: decompose so tone marks stand alone.
    pub fn syllables() -> Self {
        Self::new(vec![Arc::new(NFD)])
    }

    /// Preparation for everything tokenized letter by letter or codepoint
    /// by codepoint.
    pub fn runes() -> Self {
        Self::new(vec![Arc::new(NFC), Arc::new(ExpandLigatures)])
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    pub fn process<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        let mut current = text;

        for stage in &self.stages {
            // Fast path: skip if no mutation needed
            if !stage.needs_apply(&current)? {
                continue;
            }

            current = stage.apply(current)?;
        }

        Ok(current)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runes_pipeline_composes_then_expands() {
        let p = Pipeline::runes();
        assert_eq!(p.names().collect::<Vec<_>>(), ["nfc", "expand_ligatures"]);
        let out = p.process(Cow::Borrowed("cafe\u{0301}...")).unwrap();
        assert_eq!(out, "caf\u{00E9}\u{2026}");
    }

    #[test]
    fn syllables_pipeline_decomposes() {
        let out = Pipeline::syllables()
            .process(Cow::Borrowed("Ta\u{00E2}"))
            .unwrap();
        assert_eq!(out, "Taa\u{0302}");
    }

    #[test]
    fn untouched_text_is_borrowed() {
        let input = "plain words";
        let out = Pipeline::runes().process(Cow::Borrowed(input)).unwrap();
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }
}
