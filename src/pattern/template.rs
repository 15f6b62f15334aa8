use crate::io::error::{ComposeError, Result, invalid_parameter};
use crate::model::{Anchor, PartData};
use crate::pattern::choice::{ChoiceResult, ChoiceSelection};
use std::sync::Arc;

/// Template for generating concrete part trees
///
/// A base part plus an ordered list of independent choice points. Patterns
/// are built once and then only read; sub-patterns are held through `Arc`, so
/// a pattern can only refer to patterns that already existed when it was
/// built.
#[derive(Clone, Debug)]
pub struct Pattern {
    base: PartData,
    choices: Vec<ChoiceSelection>,
}

impl Pattern {
    /// Create a pattern with no choice points
    pub const fn new(base: PartData) -> Self {
        Self {
            base,
            choices: Vec::new(),
        }
    }

    /// Shared pattern that always resolves to `part`
    pub fn leaf(part: PartData) -> Arc<Self> {
        Arc::new(Self::new(part))
    }

    /// The part every resolution starts from
    pub const fn base(&self) -> &PartData {
        &self.base
    }

    /// Choice points in registration order
    pub fn choices(&self) -> &[ChoiceSelection] {
        &self.choices
    }

    /// Number of options at each choice point
    pub fn option_counts(&self) -> Vec<usize> {
        self.choices.iter().map(ChoiceSelection::len).collect()
    }

    /// Copy of this pattern with its base part replaced
    ///
    /// Choice points are shared with `self`.
    #[must_use]
    pub fn with_base(&self, base: PartData) -> Self {
        Self {
            base,
            choices: self.choices.clone(),
        }
    }

    /// Register a new choice point
    ///
    /// `patterns` lists the options; option `k` places `patterns[k][i]` at
    /// `anchors[i]` for every `i`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `patterns` is empty, since a choice point needs at least one option
    /// - Any option's length differs from `anchors.len()` (`ArityMismatch`)
    ///
    /// The pattern is left unchanged on error.
    pub fn add_choice(&mut self, anchors: &[Anchor], patterns: Vec<Vec<Arc<Self>>>) -> Result<()> {
        if patterns.is_empty() {
            return Err(invalid_parameter(
                "patterns",
                &0,
                &"a choice point needs at least one option",
            ));
        }

        if let Some((option, mismatched)) = patterns
            .iter()
            .enumerate()
            .find(|(_, option)| option.len() != anchors.len())
        {
            return Err(ComposeError::ArityMismatch {
                option,
                anchors: anchors.len(),
                patterns: mismatched.len(),
            });
        }

        let options = patterns
            .into_iter()
            .map(|option| ChoiceResult::pair(anchors, option))
            .collect();
        self.choices.push(ChoiceSelection::new(options));

        log::trace!(
            choice = self.choices.len() - 1,
            anchors = anchors.len();
            "Registered choice point"
        );
        Ok(())
    }

    /// Builder form of [`Pattern::add_choice`]
    ///
    /// # Errors
    ///
    /// Same conditions as [`Pattern::add_choice`].
    pub fn with_choice(mut self, anchors: &[Anchor], patterns: Vec<Vec<Arc<Self>>>) -> Result<Self> {
        self.add_choice(anchors, patterns)?;
        Ok(self)
    }
}
