use crate::io::error::{ComposeError, Result};
use crate::model::PartData;
use crate::pattern::Pattern;
use crate::resolve::selection::Selection;
use std::sync::Arc;

static FIRST_OPTIONS: Selection = Selection::new();

/// Compose one concrete part tree from `pattern`
///
/// Starts from a shallow clone of the base part, then for each choice point
/// in registration order resolves every sub-pattern of the selected option
/// and attaches it at its anchor. Nested picks apply to the sub-pattern in
/// the same placement position.
///
/// # Errors
///
/// Returns `SelectionOutOfRange` if any pick, at any depth, names an option
/// its choice point does not have. No tree is returned in that case.
pub fn resolve(pattern: &Pattern, selection: &Selection) -> Result<PartData> {
    let part = resolve_node(pattern, selection)?;
    log::debug!(
        nodes = part.node_count(),
        depth = part.depth();
        "Resolved pattern"
    );
    Ok(part)
}

fn resolve_node(pattern: &Pattern, selection: &Selection) -> Result<PartData> {
    let mut working = pattern.base().clone();

    if selection.picks.len() > pattern.choices().len() {
        log::debug!(
            picks = selection.picks.len(),
            choices = pattern.choices().len();
            "Ignoring picks beyond the pattern's choice points"
        );
    }

    for (choice_index, choice) in pattern.choices().iter().enumerate() {
        let pick = selection.pick(choice_index);
        let option_index = pick.map_or(0, |pick| pick.option);

        let option = choice
            .option(option_index)
            .ok_or(ComposeError::SelectionOutOfRange {
                choice: choice_index,
                option: option_index,
                available: choice.len(),
            })?;

        for (slot, placement) in option.placements().iter().enumerate() {
            let nested = pick
                .and_then(|pick| pick.nested(slot))
                .unwrap_or(&FIRST_OPTIONS);
            let child = resolve_node(&placement.pattern, nested)?;
            working.add_subpart(placement.anchor, Arc::new(child));
        }
    }

    Ok(working)
}
