use super::segment::normalize;

/// Result of normalizing one relative path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedPath {
    pub path: String,
    /// True iff any segment differs from its input form.
    pub changed: bool,
}

/// Normalize every `/`-delimited segment of `path` independently and
/// rejoin. Separators are never normalized, and empty segments (leading
/// or trailing `/`) keep their position, so the path's structure is
/// preserved exactly. A flat filename is the single-segment case.
pub fn normalize_path(path: &str) -> NormalizedPath {
    let rejoined: String = path
        .split('/')
        .map(normalize)
        .collect::<Vec<_>>()
        .join("/");
    let changed = rejoined != path;
    NormalizedPath {
        path: rejoined,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_name_degenerates_to_segment_normalization() {
        let out = normalize_path("cafe\u{0301}.txt");
        assert_eq!(out.path, "caf\u{e9}.txt");
        assert!(out.changed);
    }

    #[test]
    fn unchanged_path_reports_no_change() {
        let out = normalize_path("docs/readme.md");
        assert_eq!(out.path, "docs/readme.md");
        assert!(!out.changed);
    }

    #[test]
    fn each_segment_normalized_independently() {
        // decomposed Ñ folder over nested files
        let out = normalize_path("N\u{303}/sub/cafe\u{0301}.txt");
        assert_eq!(out.path, "\u{d1}/sub/caf\u{e9}.txt");
        assert!(out.changed);
    }

    #[test]
    fn segment_count_is_preserved() {
        for p in [
            "a/b/c",
            "/leading",
            "trailing/",
            "//double",
            "N\u{303}/sub/cafe\u{0301}.txt",
            "flat.txt",
            "",
        ] {
            let out = normalize_path(p);
            assert_eq!(
                out.path.split('/').count(),
                p.split('/').count(),
                "structure changed for {p:?}"
            );
        }
    }

    #[test]
    fn leading_slash_is_kept() {
        let out = normalize_path("/N\u{303}/a.txt");
        assert_eq!(out.path, "/\u{d1}/a.txt");
    }

    #[test]
    fn idempotent_over_paths() {
        let once = normalize_path("N\u{303}/sub/cafe\u{0301}.txt");
        let twice = normalize_path(&once.path);
        assert_eq!(twice.path, once.path);
        assert!(!twice.changed);
    }
}
