use std::collections::BTreeSet;

use super::model::Table;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Allow-list: the closed set of neighborhoods eligible for display
// ---------------------------------------------------------------------------

/// The neighborhoods shown in the slides, kept in configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowList {
    names: Vec<String>,
    lookup: BTreeSet<String>,
}

impl AllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut lookup = BTreeSet::new();
        for name in names {
            let name = name.into();
            if lookup.insert(name.clone()) {
                ordered.push(name);
            }
        }
        AllowList {
            names: ordered,
            lookup,
        }
    }

    /// Exact membership test; callers trim first when the source is padded.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Return `(row index, neighborhood)` of rows whose name column is allow-listed.
///
/// Rows keep their table order. Allow-listed names that never occur are
/// logged so an incomplete source file is visible without failing the view.
pub fn allowed_rows<'t>(
    table: &'t Table,
    name_column: &str,
    allow: &AllowList,
) -> Result<Vec<(usize, &'t str)>, DataError> {
    let col = table.column_index(name_column)?;
    let rows: Vec<(usize, &str)> = (0..table.len())
        .filter_map(|i| table.text(i, col).map(|name| (i, name)))
        .filter(|(_, name)| allow.contains(name))
        .collect();

    for name in allow.names() {
        if !rows.iter().any(|(_, n)| n == name) {
            log::warn!("neighborhood '{name}' not present in table '{}'", table.name);
        }
    }
    Ok(rows)
}
