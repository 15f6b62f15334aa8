use crate::io::document::{PatternDef, PatternDocument};
use crate::io::error::{ComposeError, Result};
use crate::model::PartData;
use crate::pattern::template::Pattern;
use crate::resolve::{resolver::resolve, selection::Selection};
use bitvec::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Named, fully built patterns
///
/// Compiled from a [`PatternDocument`], where patterns refer to each other by
/// name. Each definition is built once and shared by every pattern that
/// refers to it.
#[derive(Clone, Debug, Default)]
pub struct PatternLibrary {
    patterns: BTreeMap<String, Arc<Pattern>>,
}

impl PatternLibrary {
    /// Create an empty library
    pub const fn new() -> Self {
        Self {
            patterns: BTreeMap::new(),
        }
    }

    /// Build every pattern defined in `document`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A definition refers to a name with no definition (`UnknownPattern`)
    /// - Definitions refer to each other in a cycle (`CyclicPatternReference`)
    /// - A choice point has mismatched anchors and options (`ArityMismatch`)
    pub fn from_document(document: &PatternDocument) -> Result<Self> {
        let mut compiler = Compiler::new(document);
        for index in 0..compiler.names.len() {
            compiler.compile(index)?;
        }

        let patterns: BTreeMap<String, Arc<Pattern>> = compiler
            .names
            .iter()
            .zip(compiler.built)
            .filter_map(|(name, built)| built.map(|pattern| ((*name).to_string(), pattern)))
            .collect();

        log::debug!(patterns = patterns.len(); "Compiled pattern library");
        Ok(Self { patterns })
    }

    /// Register an already built pattern under `name`
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePattern` if `name` is taken
    pub fn insert(&mut self, name: impl Into<String>, pattern: Arc<Pattern>) -> Result<()> {
        let name = name.into();
        if self.patterns.contains_key(&name) {
            return Err(ComposeError::DuplicatePattern { name });
        }
        self.patterns.insert(name, pattern);
        Ok(())
    }

    /// Look up a pattern by name
    ///
    /// # Errors
    ///
    /// Returns `UnknownPattern` if no pattern has that name
    pub fn get(&self, name: &str) -> Result<&Arc<Pattern>> {
        self.patterns
            .get(name)
            .ok_or_else(|| ComposeError::UnknownPattern {
                name: name.to_string(),
            })
    }

    /// Pattern names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the library holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolve the named pattern with `selection`
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the selection is out of range
    pub fn resolve(&self, name: &str, selection: &Selection) -> Result<PartData> {
        resolve(self.get(name)?, selection)
    }
}

// Depth-first builder; `visiting` marks definitions on the current path so a
// reference back into the path is reported instead of recursing forever.
struct Compiler<'a> {
    names: Vec<&'a str>,
    definitions: Vec<&'a PatternDef>,
    indices: HashMap<&'a str, usize>,
    built: Vec<Option<Arc<Pattern>>>,
    visiting: BitVec,
    path: Vec<usize>,
}

impl<'a> Compiler<'a> {
    fn new(document: &'a PatternDocument) -> Self {
        let names: Vec<&str> = document.patterns.keys().map(String::as_str).collect();
        let definitions = document.patterns.values().collect();
        let indices = names
            .iter()
            .enumerate()
            .map(|(index, &name)| (name, index))
            .collect();
        let count = names.len();

        Self {
            names,
            definitions,
            indices,
            built: vec![None; count],
            visiting: bitvec![0; count],
            path: Vec::new(),
        }
    }

    fn compile_named(&mut self, name: &str) -> Result<Arc<Pattern>> {
        let index = self
            .indices
            .get(name)
            .copied()
            .ok_or_else(|| ComposeError::UnknownPattern {
                name: name.to_string(),
            })?;
        self.compile(index)
    }

    fn compile(&mut self, index: usize) -> Result<Arc<Pattern>> {
        if let Some(Some(pattern)) = self.built.get(index) {
            return Ok(Arc::clone(pattern));
        }
        if self.visiting.get(index).as_deref() == Some(&true) {
            return Err(self.cycle_through(index));
        }

        let definition = self
            .definitions
            .get(index)
            .copied()
            .ok_or_else(|| ComposeError::UnknownPattern {
                name: format!("#{index}"),
            })?;

        self.visiting.set(index, true);
        self.path.push(index);

        let pattern = match definition {
            PatternDef::Mirror(mirror) => {
                let source = self.compile_named(&mirror.of)?;
                Arc::new(source.with_base(mirror.axis.apply(source.base())))
            }
            PatternDef::Composed(composed) => {
                let mut pattern = Pattern::new(composed.part.build());
                for choice in &composed.choices {
                    let mut options = Vec::with_capacity(choice.options.len());
                    for option in &choice.options {
                        let mut patterns = Vec::with_capacity(option.len());
                        for name in option {
                            patterns.push(self.compile_named(name)?);
                        }
                        options.push(patterns);
                    }
                    pattern.add_choice(&choice.anchors, options)?;
                }
                Arc::new(pattern)
            }
        };

        self.path.pop();
        self.visiting.set(index, false);
        if let Some(slot) = self.built.get_mut(index) {
            *slot = Some(Arc::clone(&pattern));
        }

        log::trace!(
            pattern = self.names.get(index).copied().unwrap_or_default(),
            choices = pattern.choices().len();
            "Compiled pattern"
        );
        Ok(pattern)
    }

    fn cycle_through(&self, index: usize) -> ComposeError {
        let start = self
            .path
            .iter()
            .position(|&entry| entry == index)
            .unwrap_or(0);

        let cycle = self
            .path
            .get(start..)
            .unwrap_or_default()
            .iter()
            .chain(std::iter::once(&index))
            .filter_map(|&entry| self.names.get(entry))
            .map(|name| (*name).to_string())
            .collect();

        ComposeError::CyclicPatternReference { cycle }
    }
}
