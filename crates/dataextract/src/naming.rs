//! Payload-group matching and column name normalization
//!
//! Column names come in two conventions: `var@Group` (v1) and `Group/var`
//! (v2). The payload column of group `G` is the one column whose name ends
//! with `@G` or begins with `G/`. Downstream keys always use the v2 form.

use crate::error::PayloadSelectionReason;

/// Matches column names belonging to one payload group
#[derive(Debug, Clone)]
pub struct PayloadGroup {
    prefix: String,
    suffix: String,
}

impl PayloadGroup {
    pub fn new(group: &str) -> Self {
        Self {
            prefix: format!("{}/", group),
            suffix: format!("@{}", group),
        }
    }

    /// Whether `name` belongs to this group
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.prefix) || name.ends_with(&self.suffix)
    }

    /// Find the index of the single matching column
    pub fn find_in<S: AsRef<str>>(&self, names: &[S]) -> Result<usize, PayloadSelectionReason> {
        let matching: Vec<usize> = names
            .iter()
            .enumerate()
            .filter(|(_, name)| self.matches(name.as_ref()))
            .map(|(i, _)| i)
            .collect();

        match matching.as_slice() {
            [] => Err(PayloadSelectionReason::NotFound),
            [index] => Ok(*index),
            _ => Err(PayloadSelectionReason::Ambiguous(
                matching
                    .iter()
                    .map(|&i| names[i].as_ref().to_string())
                    .collect(),
            )),
        }
    }
}

/// Rewrite `var@Group` as `Group/var`; other names are returned unchanged.
///
/// The split happens at the first `@`.
pub fn to_group_path(name: &str) -> String {
    match name.split_once('@') {
        Some((var, group)) => format!("{}/{}", group, var),
        None => name.to_string(),
    }
}
