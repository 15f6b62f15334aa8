use crate::pattern::Pattern;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Which option to take at each choice point of a pattern
///
/// `picks[i]` answers choice point `i`. Choice points without a pick take
/// their first option.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Picks in choice-point order
    #[serde(default)]
    pub picks: Vec<Pick>,
}

/// The option taken at one choice point, and selections for what it places
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pick {
    /// Index of the chosen option
    pub option: usize,
    /// Selections for the chosen option's sub-patterns, by placement order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Selection>,
}

impl Pick {
    /// Pick `option` and leave its sub-patterns on their first options
    pub const fn option(option: usize) -> Self {
        Self {
            option,
            nested: Vec::new(),
        }
    }

    /// Selection for the sub-pattern placed at position `slot` of the option
    pub fn nested(&self, slot: usize) -> Option<&Selection> {
        self.nested.get(slot)
    }
}

impl Selection {
    /// Selection taking the first option everywhere
    pub const fn new() -> Self {
        Self { picks: Vec::new() }
    }

    /// Top-level option indices, one per choice point
    pub fn from_options(options: &[usize]) -> Self {
        Self {
            picks: options.iter().copied().map(Pick::option).collect(),
        }
    }

    /// Top-level picks from a choice-point-index to option-index mapping
    ///
    /// `choices` is the number of choice points of the pattern the selection
    /// is for. Choice points missing from the mapping take their first
    /// option; entries at or past `choices` are ignored.
    pub fn from_mapping(mapping: &BTreeMap<usize, usize>, choices: usize) -> Self {
        let in_range = mapping.range(..choices);
        let len = in_range.clone().next_back().map_or(0, |(&last, _)| last + 1);

        let ignored = mapping.len() - in_range.clone().count();
        if ignored > 0 {
            log::debug!(
                ignored = ignored,
                choices = choices;
                "Ignoring picks beyond the pattern's choice points"
            );
        }

        let mut picks = vec![Pick::default(); len];
        for (&choice, &option) in in_range {
            if let Some(pick) = picks.get_mut(choice) {
                pick.option = option;
            }
        }
        Self { picks }
    }

    /// Append a pick for the next choice point
    #[must_use]
    pub fn with_pick(mut self, option: usize, nested: Vec<Self>) -> Self {
        self.picks.push(Pick { option, nested });
        self
    }

    /// Pick for choice point `choice`, if one was given
    pub fn pick(&self, choice: usize) -> Option<&Pick> {
        self.picks.get(choice)
    }
}

/// Derive a selection seed from a name
///
/// The first eight bytes of the name's SHA-256 digest, so the same name always
/// yields the same variant.
pub fn seed_from_name(name: &str) -> u64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    for (byte, digest_byte) in bytes.iter_mut().zip(digest.iter()) {
        *byte = *digest_byte;
    }
    u64::from_le_bytes(bytes)
}

/// Seeded random selector for reproducible variant choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from a name
    pub fn from_name(name: &str) -> Self {
        Self::new(seed_from_name(name))
    }

    /// Choose an option uniformly at every choice point, recursively
    ///
    /// Sub-patterns are only visited when the option placing them is chosen,
    /// so the draw sequence depends on earlier picks.
    pub fn select(&mut self, pattern: &Pattern) -> Selection {
        let mut picks = Vec::with_capacity(pattern.choices().len());

        for choice in pattern.choices() {
            let option = if choice.is_empty() {
                0
            } else {
                self.rng.random_range(0..choice.len())
            };

            let nested = choice
                .option(option)
                .map(|chosen| {
                    chosen
                        .placements()
                        .iter()
                        .map(|placement| self.select(&placement.pattern))
                        .collect()
                })
                .unwrap_or_default();

            picks.push(Pick { option, nested });
        }

        Selection { picks }
    }
}
