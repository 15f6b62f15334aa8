use crate::model::Anchor;
use crate::pattern::template::Pattern;
use std::sync::Arc;

/// A sub-pattern placed at an anchor of the pattern that chose it
#[derive(Clone, Debug)]
pub struct AnchoredPattern {
    /// Where the resolved sub-pattern is attached
    pub anchor: Anchor,
    /// The sub-pattern, shared with every other place that uses it
    pub pattern: Arc<Pattern>,
}

/// One option at a choice point
///
/// Choosing it places every entry at once.
#[derive(Clone, Debug, Default)]
pub struct ChoiceResult {
    placements: Vec<AnchoredPattern>,
}

impl ChoiceResult {
    /// Pair anchors with patterns positionally
    ///
    /// Callers guarantee equal lengths; `Pattern::add_choice` checks this
    /// before building options.
    pub(crate) fn pair(anchors: &[Anchor], patterns: Vec<Arc<Pattern>>) -> Self {
        let placements = anchors
            .iter()
            .zip(patterns)
            .map(|(&anchor, pattern)| AnchoredPattern { anchor, pattern })
            .collect();
        Self { placements }
    }

    /// Placements made by this option, in attachment order
    pub fn placements(&self) -> &[AnchoredPattern] {
        &self.placements
    }

    /// Number of sub-patterns this option places
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether this option places nothing
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// The mutually exclusive options of one choice point
#[derive(Clone, Debug, Default)]
pub struct ChoiceSelection {
    options: Vec<ChoiceResult>,
}

impl ChoiceSelection {
    pub(crate) const fn new(options: Vec<ChoiceResult>) -> Self {
        Self { options }
    }

    /// All options in registration order
    pub fn options(&self) -> &[ChoiceResult] {
        &self.options
    }

    /// Option at `index`, if any
    pub fn option(&self, index: usize) -> Option<&ChoiceResult> {
        self.options.get(index)
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the choice point has no options
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
