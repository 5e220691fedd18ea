use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::{classify_io, Result};

/// List the visible subdirectories of `path`: directories only, skipping
/// empty names and anything starting with a dot (VCS metadata, editor
/// droppings). Sorted ascending so repeated runs list in the same order.
pub fn list_visible_dirs(path: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(path).map_err(|e| classify_io(path, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| classify_io(path, e))?;
        let file_type = entry.file_type().map_err(|e| classify_io(&entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.is_empty() || name.starts_with('.') {
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

/// Enumerate every subdirectory below `path` as a relative path, by
/// fixed-point expansion: list the immediate children, then keep expanding
/// any discovered path that has not been expanded yet until a full pass
/// adds nothing. Each path appears exactly once; insertion order follows
/// pass order, so callers wanting a strict ordering sort downstream.
///
/// Assumes an acyclic tree; a cyclic symlink would never reach the fixed
/// point.
pub fn walk_recursive(path: &Path) -> Result<Vec<PathBuf>> {
    let mut discovered: Vec<PathBuf> = list_visible_dirs(path)?
        .into_iter()
        .map(PathBuf::from)
        .collect();
    let mut seen: HashSet<PathBuf> = discovered.iter().cloned().collect();
    let mut expanded: HashSet<PathBuf> = HashSet::new();

    loop {
        let pending: Vec<PathBuf> = discovered
            .iter()
            .filter(|p| !expanded.contains(*p))
            .cloned()
            .collect();
        if pending.is_empty() {
            break;
        }

        for rel in pending {
            log::trace!("expanding {}", rel.display());
            for child in list_visible_dirs(&path.join(&rel))? {
                let child_rel = rel.join(child);
                if seen.insert(child_rel.clone()) {
                    discovered.push(child_rel);
                }
            }
            expanded.insert(rel);
        }
    }

    Ok(discovered)
}
