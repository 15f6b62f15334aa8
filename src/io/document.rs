//! JSON pattern documents describing a library of named patterns

use crate::io::error::{ComposeError, Result, file_system_error};
use crate::model::{Anchor, FlipAxis, PartData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Top-level document: pattern definitions keyed by name
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternDocument {
    /// Named pattern definitions
    pub patterns: BTreeMap<String, PatternDef>,
}

/// Definition of one named pattern, tagged by its `type` field
///
/// Each kind accepts only its own fields, so a definition mixing `mirror`
/// fields with `part` is rejected rather than read as either.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PatternDef {
    /// Another pattern with its base part mirrored
    Mirror(MirrorDef),
    /// A base part with choice points
    Composed(ComposedDef),
}

/// Reference to a pattern to mirror
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MirrorDef {
    /// Name of the source pattern
    pub of: String,
    /// Axis to mirror across
    pub axis: FlipAxis,
}

/// A base part and the choice points registered on it
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposedDef {
    /// Base part
    pub part: PartDef,
    /// Choice points in registration order
    #[serde(default)]
    pub choices: Vec<ChoiceDef>,
}

/// A part and its statically attached children
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartDef {
    /// Image path; omitted for grouping nodes
    #[serde(default)]
    pub image: String,
    /// Width in part units
    pub width: u32,
    /// Height in part units
    pub height: u32,
    /// Attachment socket, top-left when omitted
    #[serde(default)]
    pub socket: Anchor,
    /// Children attached to every resolution of this part
    #[serde(default)]
    pub subparts: Vec<SubpartDef>,
}

impl PartDef {
    /// Build the part tree this definition describes
    pub fn build(&self) -> PartData {
        let mut part = PartData::new(self.image.clone(), self.width, self.height)
            .with_socket(self.socket);

        for subpart in &self.subparts {
            let child = subpart.part.build();
            let child = match subpart.flip {
                Some(axis) => axis.apply(&child),
                None => child,
            };
            part.add_subpart(subpart.anchor, Arc::new(child));
        }

        part
    }
}

/// A child attached at a fixed anchor
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubpartDef {
    /// Position on the parent
    pub anchor: Anchor,
    /// The attached part
    pub part: PartDef,
    /// Optional mirroring applied to the child before attaching
    #[serde(default)]
    pub flip: Option<FlipAxis>,
}

/// A choice point: shared anchors and one pattern name per anchor per option
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceDef {
    /// Anchors filled by every option
    pub anchors: Vec<Anchor>,
    /// Options, each listing one pattern name per anchor
    pub options: Vec<Vec<String>>,
}

impl PatternDocument {
    /// Parse a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid pattern document
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| ComposeError::DocumentParse {
            path: "<inline>".into(),
            source,
        })
    }

    /// Load a document from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The contents are not a valid pattern document
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read", e))?;

        let document: Self =
            serde_json::from_str(&text).map_err(|source| ComposeError::DocumentParse {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!(
            path:? = path,
            patterns = document.patterns.len();
            "Loaded pattern document"
        );
        Ok(document)
    }
}
