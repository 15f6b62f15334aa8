use crate::io::error::{Result, invalid_parameter};
use crate::model::PartData;
use crate::pattern::Pattern;
use crate::resolve::{
    cache::VariantCountCache,
    resolver::resolve,
    selection::{Pick, Selection},
};

/// One enumerated variant of a pattern
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    /// Position in the enumeration
    pub index: u64,
    /// Selection that produces `part`
    pub selection: Selection,
    /// The resolved tree
    pub part: PartData,
}

/// Lazy enumeration of every variant of a pattern
///
/// Variant `i` is the selection whose mixed-radix digits spell `i`: the
/// first choice point is the least significant digit, and within a choice
/// point the options are laid out one after another, each spanning as many
/// values as its sub-patterns have variants together. Every index below
/// [`Variants::total`] maps to a distinct selection, so the sequence has no
/// duplicates and no gaps. Nothing is resolved until it is requested.
pub struct Variants<'a> {
    pattern: &'a Pattern,
    cache: VariantCountCache,
    total: u64,
    next: u64,
}

impl<'a> Variants<'a> {
    /// Prepare the enumeration of `pattern`
    ///
    /// # Errors
    ///
    /// Returns `VariantCountOverflow` if the number of variants exceeds `u64::MAX`
    pub fn new(pattern: &'a Pattern) -> Result<Self> {
        let mut cache = VariantCountCache::new();
        let total = cache.count(pattern)?;

        log::debug!(
            total = total,
            choices = pattern.choices().len();
            "Prepared variant enumeration"
        );

        Ok(Self {
            pattern,
            cache,
            total,
            next: 0,
        })
    }

    /// Number of variants in the full sequence
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Index of the variant the iterator yields next
    pub const fn position(&self) -> u64 {
        self.next
    }

    /// Variants not yet yielded
    pub const fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.next)
    }

    /// Rewind to the first variant
    pub const fn restart(&mut self) {
        self.next = 0;
    }

    /// Selection for variant `index`
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not below [`Variants::total`]
    pub fn selection_at(&mut self, index: u64) -> Result<Selection> {
        if index >= self.total {
            return Err(invalid_parameter(
                "index",
                &index,
                &format!("enumeration has {} variant(s)", self.total),
            ));
        }
        self.decode(self.pattern, index)
    }

    /// Resolve variant `index`
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not below [`Variants::total`]
    pub fn get(&mut self, index: u64) -> Result<Variant> {
        let selection = self.selection_at(index)?;
        let part = resolve(self.pattern, &selection)?;
        Ok(Variant {
            index,
            selection,
            part,
        })
    }

    fn decode(&mut self, pattern: &Pattern, mut index: u64) -> Result<Selection> {
        let mut picks = Vec::with_capacity(pattern.choices().len());

        for (choice_index, choice) in pattern.choices().iter().enumerate() {
            let radix = self.cache.choice_count(choice, choice_index)?;
            let mut digit = index
                .checked_rem(radix)
                .ok_or_else(|| invalid_parameter("choice", &choice_index, &"has no options"))?;
            index /= radix;

            let mut chosen = None;
            for (option_index, option) in choice.options().iter().enumerate() {
                let span = self.cache.option_count(option, choice_index)?;
                if digit < span {
                    chosen = Some((option_index, option));
                    break;
                }
                digit -= span;
            }
            let (option_index, option) = chosen
                .ok_or_else(|| invalid_parameter("choice", &choice_index, &"has no options"))?;

            let mut remainder = digit;
            let mut nested = Vec::with_capacity(option.len());
            for placement in option.placements() {
                let sub_total = self.cache.count(&placement.pattern)?;
                let sub_index = remainder.checked_rem(sub_total).ok_or_else(|| {
                    invalid_parameter("choice", &choice_index, &"places a pattern with no variants")
                })?;
                remainder /= sub_total;
                nested.push(self.decode(&placement.pattern, sub_index)?);
            }

            picks.push(Pick {
                option: option_index,
                nested,
            });
        }

        Ok(Selection { picks })
    }
}

impl Iterator for Variants<'_> {
    type Item = Result<Variant>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.get(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n as u64).min(self.total);
        self.next()
    }
}

/// Enumerate every variant of `pattern`
///
/// # Errors
///
/// Returns `VariantCountOverflow` if the number of variants exceeds `u64::MAX`
pub fn variants(pattern: &Pattern) -> Result<Variants<'_>> {
    Variants::new(pattern)
}
