use crate::schema::Structure;
use anyhow::{bail, Result};

/// Does `name` select this structure? Matches the struct name, the normalized
/// name or the table name, ignoring case.
fn matches(structure: &Structure, name: &str) -> bool {
    structure.name.eq_ignore_ascii_case(name)
        || structure.normalized_name.eq_ignore_ascii_case(name)
        || structure.table_name().eq_ignore_ascii_case(name)
}

/// Resolves which structures to generate based on include/exclude filters.
///
/// Locale structures follow the decision made for their base structure.
pub fn resolve_structures(
    structures: Vec<Structure>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
) -> Result<Vec<Structure>> {
    let (names, keep_matching) = match (include, exclude) {
        (Some(_), Some(_)) => {
            bail!("Cannot use both --include and --exclude at the same time");
        }
        (Some(include_list), None) => (include_list, true),
        (None, Some(exclude_list)) => (exclude_list, false),
        (None, None) => return Ok(structures),
    };

    for name in &names {
        if !structures.iter().any(|s| !s.is_locale && matches(s, name)) {
            bail!("Unknown structure: {}", name);
        }
    }

    let mut keep_current = false;
    let selected: Vec<Structure> = structures
        .into_iter()
        .filter(|structure| {
            if !structure.is_locale {
                let listed = names.iter().any(|n| matches(structure, n));
                keep_current = listed == keep_matching;
            }
            keep_current
        })
        .collect();

    Ok(selected)
}
