use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{NfcError, Result};

/// What to do when two distinct original names normalize to the same
/// composed form. The upstream behavior here was to silently drop one
/// entry, which loses data; both policies below are explicit instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Insert " (n)" before the extension until the name is unique,
    /// the way desktop file managers resolve duplicate copies.
    #[default]
    Suffix,
    /// Refuse the export on the first coinciding name.
    Error,
}

/// Resolve `path` against the set of names already emitted.
pub fn resolve(path: &str, taken: &HashSet<String>, policy: CollisionPolicy) -> Result<String> {
    if !taken.contains(path) {
        return Ok(path.to_owned());
    }
    match policy {
        CollisionPolicy::Error => Err(NfcError::NameCollision(path.to_owned())),
        CollisionPolicy::Suffix => Ok(suffixed(path, taken)),
    }
}

fn suffixed(path: &str, taken: &HashSet<String>) -> String {
    let (dir, leaf) = match path.rsplit_once('/') {
        Some((d, l)) => (Some(d), l),
        None => (None, path),
    };
    // "a.tar.gz" splits as ("a.tar", "gz"); a dotfile keeps its whole name
    let (stem, ext) = match leaf.rsplit_once('.') {
        Some((s, e)) if !s.is_empty() => (s, Some(e)),
        _ => (leaf, None),
    };
    for n in 1u32.. {
        let leaf = match ext {
            Some(e) => format!("{stem} ({n}).{e}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = match dir {
            Some(d) => format!("{d}/{leaf}"),
            None => leaf,
        };
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
    unreachable!("u32 suffix space exhausted")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unique_name_passes_through() {
        let out = resolve("a.txt", &taken(&["b.txt"]), CollisionPolicy::Suffix).unwrap();
        assert_eq!(out, "a.txt");
    }

    #[test]
    fn suffix_lands_before_the_extension() {
        let out = resolve("a.txt", &taken(&["a.txt"]), CollisionPolicy::Suffix).unwrap();
        assert_eq!(out, "a (1).txt");
    }

    #[test]
    fn suffix_counts_past_existing_suffixes() {
        let out = resolve(
            "a.txt",
            &taken(&["a.txt", "a (1).txt"]),
            CollisionPolicy::Suffix,
        )
        .unwrap();
        assert_eq!(out, "a (2).txt");
    }

    #[test]
    fn directory_part_is_untouched() {
        let out = resolve(
            "dir/a.txt",
            &taken(&["dir/a.txt"]),
            CollisionPolicy::Suffix,
        )
        .unwrap();
        assert_eq!(out, "dir/a (1).txt");
    }

    #[test]
    fn dotfile_gets_plain_suffix() {
        let out = resolve(".bashrc", &taken(&[".bashrc"]), CollisionPolicy::Suffix).unwrap();
        assert_eq!(out, ".bashrc (1)");
    }

    #[test]
    fn error_policy_refuses() {
        let err = resolve("a.txt", &taken(&["a.txt"]), CollisionPolicy::Error);
        assert!(matches!(err, Err(NfcError::NameCollision(_))));
    }
}
