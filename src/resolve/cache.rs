use crate::io::error::{ComposeError, Result};
use crate::pattern::{ChoiceResult, ChoiceSelection, Pattern};
use std::collections::HashMap;

/// Identity of a pattern by address
///
/// Shared sub-patterns are reached through many `Arc` handles that all point
/// at the same allocation, so the address identifies them. Keys are only
/// meaningful while the patterns they were taken from are alive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PatternKey(usize);

impl PatternKey {
    /// Key for `pattern`
    pub fn of(pattern: &Pattern) -> Self {
        Self(std::ptr::from_ref(pattern) as usize)
    }
}

/// Memoization cache for variant counts
///
/// A sub-pattern shared by many options is counted once. Borrowers must not
/// keep the cache past the lifetime of the pattern graph it was filled from.
#[derive(Default)]
pub struct VariantCountCache {
    /// Pattern to number of distinct resolutions
    counts: HashMap<PatternKey, u64>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl VariantCountCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct selections of `pattern`
    ///
    /// The product over choice points of the sum over options of the product
    /// of the option's sub-pattern counts. A pattern with no choice points
    /// has exactly one variant.
    ///
    /// # Errors
    ///
    /// Returns `VariantCountOverflow` if the count exceeds `u64::MAX`
    pub fn count(&mut self, pattern: &Pattern) -> Result<u64> {
        let key = PatternKey::of(pattern);
        if let Some(&count) = self.counts.get(&key) {
            self.stats.hits += 1;
            return Ok(count);
        }
        self.stats.misses += 1;

        let mut total: u64 = 1;
        for (choice_index, choice) in pattern.choices().iter().enumerate() {
            let radix = self.choice_count(choice, choice_index)?;
            total = total
                .checked_mul(radix)
                .ok_or(ComposeError::VariantCountOverflow {
                    choice: choice_index,
                })?;
        }

        self.counts.insert(key, total);
        Ok(total)
    }

    /// Number of distinct selections at one choice point, summed over options
    ///
    /// # Errors
    ///
    /// Returns `VariantCountOverflow` if the count exceeds `u64::MAX`
    pub fn choice_count(&mut self, choice: &ChoiceSelection, choice_index: usize) -> Result<u64> {
        let mut sum: u64 = 0;
        for option in choice.options() {
            let span = self.option_count(option, choice_index)?;
            sum = sum
                .checked_add(span)
                .ok_or(ComposeError::VariantCountOverflow {
                    choice: choice_index,
                })?;
        }
        Ok(sum)
    }

    /// Number of distinct selections of one option's sub-patterns together
    ///
    /// # Errors
    ///
    /// Returns `VariantCountOverflow` if the count exceeds `u64::MAX`
    pub fn option_count(&mut self, option: &ChoiceResult, choice_index: usize) -> Result<u64> {
        let mut product: u64 = 1;
        for placement in option.placements() {
            let count = self.count(&placement.pattern)?;
            product = product
                .checked_mul(count)
                .ok_or(ComposeError::VariantCountOverflow {
                    choice: choice_index,
                })?;
        }
        Ok(product)
    }

    /// Number of patterns counted so far
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been counted yet
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
