//! Command-line interface for resolving and enumerating pattern variants

use crate::io::configuration::{
    DEFAULT_ENUMERATION_LIMIT, DEFAULT_PATTERN, DEFAULT_SEED, PREVIEW_SCALE, VARIANT_EXTENSION,
    VARIANT_PREFIX,
};
use crate::io::document::PatternDocument;
use crate::io::error::{ComposeError, Result, file_system_error, invalid_parameter};
use crate::io::image::export_preview_png;
use crate::io::progress::ProgressManager;
use crate::layout::{WireNode, WireResponse, layout};
use crate::model::PartData;
use crate::pattern::{Pattern, PatternLibrary};
use crate::resolve::cache::VariantCountCache;
use crate::resolve::selection::seed_from_name;
use crate::resolve::{RandomSelector, Selection, Variant, resolve, variants};
use clap::Parser;
use log::LevelFilter;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "partcompose")]
#[command(
    author,
    version,
    about = "Assemble sprite variants from anchored parts and choice points"
)]
/// Command-line arguments for the composition tool
pub struct Cli {
    /// Pattern library document (JSON)
    #[arg(value_name = "LIBRARY")]
    pub library: PathBuf,

    /// Name of the pattern to resolve
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Explicit option for a top-level choice point, as CHOICE=OPTION
    #[arg(long = "pick", value_name = "CHOICE=OPTION", value_parser = parse_pick)]
    pub picks: Vec<(usize, usize)>,

    /// Random seed for reproducible selection
    #[arg(short, long, conflicts_with_all = ["picks", "name"])]
    pub seed: Option<u64>,

    /// Derive the random seed from a name
    #[arg(short, long, conflicts_with = "picks")]
    pub name: Option<String>,

    /// Enumerate every variant instead of resolving one
    #[arg(short, long, conflicts_with_all = ["picks", "seed", "name"])]
    pub all: bool,

    /// Maximum number of variants written by --all
    #[arg(long, default_value_t = DEFAULT_ENUMERATION_LIMIT)]
    pub limit: u64,

    /// Directory receiving one file per variant with --all
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output file; standard output when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write a PNG preview of the resolved layout
    #[arg(long, value_name = "FILE")]
    pub preview: Option<PathBuf>,

    /// Pixels per part unit
    #[arg(long, default_value_t = PREVIEW_SCALE)]
    pub scale: u32,

    /// List patterns with their variant counts and exit
    #[arg(short, long)]
    pub list: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parse a `CHOICE=OPTION` pair
///
/// # Errors
///
/// Returns a message if the value is not two unsigned integers joined by `=`
pub fn parse_pick(value: &str) -> std::result::Result<(usize, usize), String> {
    let (choice, option) = value
        .split_once('=')
        .ok_or_else(|| format!("expected CHOICE=OPTION, got '{value}'"))?;
    let choice = choice
        .trim()
        .parse()
        .map_err(|e| format!("invalid choice index '{choice}': {e}"))?;
    let option = option
        .trim()
        .parse()
        .map_err(|e| format!("invalid option index '{option}': {e}"))?;
    Ok((choice, option))
}

/// Selection policy derived from the command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// Explicit top-level picks
    Explicit(Selection),
    /// Uniform random choices from a seed
    Random(u64),
}

/// Runs the command described by [`Cli`] against a loaded library
pub struct Generator {
    cli: Cli,
    library: PatternLibrary,
}

impl Generator {
    /// Load and compile the library named on the command line
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read, parsed or compiled
    pub fn new(cli: Cli) -> Result<Self> {
        let document = PatternDocument::load(&cli.library)?;
        let library = PatternLibrary::from_document(&document)?;
        log::info!(
            library:? = cli.library,
            patterns = library.len();
            "Loaded pattern library"
        );
        Ok(Self { cli, library })
    }

    /// Use an already compiled library
    pub const fn with_library(cli: Cli, library: PatternLibrary) -> Self {
        Self { cli, library }
    }

    /// The compiled library
    pub const fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Selection policy requested on the command line for `pattern`
    ///
    /// Explicit picks win, then a name-derived seed, then `--seed`, then the
    /// default seed. Picks for choice points `pattern` does not have are
    /// dropped.
    pub fn selection_mode(&self, pattern: &Pattern) -> SelectionMode {
        if !self.cli.picks.is_empty() {
            let mapping: BTreeMap<usize, usize> = self.cli.picks.iter().copied().collect();
            return SelectionMode::Explicit(Selection::from_mapping(
                &mapping,
                pattern.choices().len(),
            ));
        }
        let seed = self
            .cli
            .name
            .as_deref()
            .map_or(self.cli.seed.unwrap_or(DEFAULT_SEED), seed_from_name);
        SelectionMode::Random(seed)
    }

    /// Run the requested command
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails or any output cannot be written
    pub fn run(&self) -> Result<()> {
        if self.cli.scale == 0 {
            return Err(invalid_parameter("scale", &0, &"must be positive"));
        }

        if self.cli.list {
            let listing = self.list()?;
            return self.write_output(|out| {
                for (name, count) in &listing {
                    writeln!(out, "{name}\t{count}")?;
                }
                Ok(())
            });
        }

        if self.cli.all {
            return self.enumerate();
        }

        let (response, part) = self.resolve_one()?;

        if let Some(ref preview_path) = self.cli.preview {
            let placements = layout(&part, [0, 0], self.cli.scale);
            export_preview_png(&placements, preview_path)?;
        }

        self.write_json(&response)
    }

    /// Resolve a single variant according to the selection policy
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is unknown or a pick is out of range
    pub fn generate(&self) -> Result<WireResponse> {
        self.resolve_one().map(|(response, _)| response)
    }

    fn resolve_one(&self) -> Result<(WireResponse, PartData)> {
        let pattern = self.library.get(&self.cli.pattern)?;

        let (selection, seed) = match self.selection_mode(pattern) {
            SelectionMode::Explicit(selection) => (selection, None),
            SelectionMode::Random(seed) => (RandomSelector::new(seed).select(pattern), Some(seed)),
        };

        let part = resolve(pattern, &selection)?;
        log::info!(pattern = self.cli.pattern.as_str(), nodes = part.node_count(); "Generated variant");

        let response = WireResponse {
            pattern: self.cli.pattern.clone(),
            index: None,
            seed,
            scale: self.cli.scale,
            selection,
            tree: WireNode::from_part(&part, self.cli.scale),
        };
        Ok((response, part))
    }

    /// Variant counts of every pattern in the library, in name order
    ///
    /// # Errors
    ///
    /// Returns `VariantCountOverflow` if a pattern has more than `u64::MAX` variants
    pub fn list(&self) -> Result<Vec<(String, u64)>> {
        let mut cache = VariantCountCache::new();
        let mut listing = Vec::with_capacity(self.library.len());
        for name in self.library.names() {
            let count = cache.count(self.library.get(name)?)?;
            listing.push((name.to_string(), count));
        }
        log::debug!(hits = cache.stats.hits, misses = cache.stats.misses; "Counted variants");
        Ok(listing)
    }

    fn enumerate(&self) -> Result<()> {
        let pattern: &Pattern = self.library.get(&self.cli.pattern)?;
        let mut all = variants(pattern)?;
        let total = all.total();
        let count = total.min(self.cli.limit);

        if count < total {
            log::warn!(total = total, limit = self.cli.limit; "Enumeration truncated by --limit");
        }
        if self.cli.preview.is_some() {
            log::warn!("--preview is ignored with --all");
        }

        let progress = if self.cli.should_show_progress() && self.cli.out_dir.is_some() {
            ProgressManager::new(&self.cli.pattern, count)
        } else {
            ProgressManager::hidden(count)
        };

        match self.cli.out_dir {
            Some(ref dir) => {
                std::fs::create_dir_all(dir)
                    .map_err(|e| file_system_error(dir, "create directory", e))?;
                let digits = count.saturating_sub(1).max(1).to_string().len();
                for variant in all.by_ref().take(count as usize) {
                    let variant = variant?;
                    let path = dir.join(format!(
                        "{VARIANT_PREFIX}{:0digits$}.{VARIANT_EXTENSION}",
                        variant.index
                    ));
                    let response = self.variant_response(variant);
                    write_json_file(&path, &response)?;
                    progress.advance();
                }
            }
            None => {
                let responses = all.by_ref().take(count as usize);
                let mut failure = None;
                self.write_output(|out| {
                    for variant in responses {
                        let variant = match variant {
                            Ok(variant) => variant,
                            Err(error) => {
                                failure = Some(error);
                                break;
                            }
                        };
                        let response = self.variant_response(variant);
                        serde_json::to_writer(&mut *out, &response)?;
                        writeln!(out)?;
                        progress.advance();
                    }
                    Ok(())
                })?;
                if let Some(error) = failure {
                    return Err(error);
                }
            }
        }

        progress.finish();
        log::info!(written = progress.position(), total = total; "Enumeration complete");
        Ok(())
    }

    fn variant_response(&self, variant: Variant) -> WireResponse {
        WireResponse {
            pattern: self.cli.pattern.clone(),
            index: Some(variant.index),
            seed: None,
            scale: self.cli.scale,
            tree: WireNode::from_part(&variant.part, self.cli.scale),
            selection: variant.selection,
        }
    }

    fn write_json(&self, value: &impl Serialize) -> Result<()> {
        match self.cli.output {
            Some(ref path) => write_json_file(path, value),
            None => self.write_output(|out| {
                serde_json::to_writer_pretty(&mut *out, value)?;
                writeln!(out)
            }),
        }
    }

    fn write_output<F>(&self, body: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        match self.cli.output {
            Some(ref path) => {
                let file = File::create(path).map_err(|e| file_system_error(path, "create", e))?;
                let mut out = BufWriter::new(file);
                body(&mut out)
                    .and_then(|()| out.flush())
                    .map_err(|e| file_system_error(path, "write", e))
            }
            None => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                body(&mut out)
                    .and_then(|()| out.flush())
                    .map_err(|e| file_system_error("<stdout>", "write", e))
            }
        }
    }
}

fn write_json_file(path: &Path, value: &impl Serialize) -> Result<()> {
    let encoded =
        serde_json::to_vec_pretty(value).map_err(|source| ComposeError::Encode { source })?;
    std::fs::write(path, encoded).map_err(|e| file_system_error(path, "write", e))
}
