//! Lexical pathname helpers, none of these functions touch the file system.

use std::path::is_separator;

const RESERVED_CHARS: &str = "<>:\"/\\|?*";

/// Final component of `pathname`, everything after the last separator.
pub fn get_basename(pathname: &str) -> &str {
    match pathname.rfind(is_separator) {
        Some(index) => &pathname[index + 1..],
        None => pathname,
    }
}

/// Splits a base name into its stem and its extension (including the leading dot).
///
/// Leading dots never start an extension: `.bashrc` has none.
fn split_ext(basename: &str) -> (&str, &str) {
    match basename.rfind('.') {
        Some(index) if !basename[..index].trim_start_matches('.').is_empty() => {
            basename.split_at(index)
        }
        _ => (basename, ""),
    }
}

/// Returns the filename of a pathname without the extension.
///
/// ```
/// assert_eq!(cinante::naming::get_filename("/workspace/cinante/__init__.py"), "__init__");
/// ```
pub fn get_filename(pathname: &str) -> &str {
    split_ext(get_basename(pathname)).0
}

/// Returns the extension of a pathname, leading dot included, or an empty string.
///
/// ```
/// assert_eq!(cinante::naming::get_ext("/workspace/cinante/__init__.py"), ".py");
/// ```
pub fn get_ext(pathname: &str) -> &str {
    split_ext(get_basename(pathname)).1
}

pub fn is_reserved_char(c: char) -> bool {
    RESERVED_CHARS.contains(c) || c.is_ascii_control()
}

/// Replaces every character that is invalid in a file name with `rep`.
///
/// Invalid characters are `< > : " / \ | ? *` and the ascii control codes.
///
/// Beware that different names may collide once normalized, with an empty `rep` both `a:b` and
/// `a/b` become `ab`.
pub fn normalize_path(pathname: &str, rep: &str) -> String {
    let mut normalized = String::with_capacity(pathname.len());
    for c in pathname.chars() {
        if is_reserved_char(c) {
            normalized.push_str(rep);
        } else {
            normalized.push(c);
        }
    }
    normalized
}

/// [`normalize_path`] dropping the invalid characters.
pub fn normalize_path_default(pathname: &str) -> String {
    normalize_path(pathname, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_filename_and_ext() {
        assert_eq!(get_filename("/a/b/c.py"), "c");
        assert_eq!(get_ext("/a/b/c.py"), ".py");
        assert_eq!(get_filename("archive.tar.gz"), "archive.tar");
        assert_eq!(get_ext("archive.tar.gz"), ".gz");
        assert_eq!(get_filename("/a/b.d/README"), "README");
        assert_eq!(get_ext("/a/b.d/README"), "");
        assert_eq!(get_filename("file."), "file");
        assert_eq!(get_ext("file."), ".");
        assert_eq!(get_filename("/a/b/"), "");
        assert_eq!(get_ext("/a/b/"), "");
        assert_eq!(get_filename(""), "");
    }

    #[test]
    fn test_hidden_files() {
        assert_eq!(get_filename("/home/user/.bashrc"), ".bashrc");
        assert_eq!(get_ext("/home/user/.bashrc"), "");
        assert_eq!(get_filename("..."), "...");
        assert_eq!(get_ext("..."), "");
        assert_eq!(get_filename(".config.yml"), ".config");
        assert_eq!(get_ext(".config.yml"), ".yml");
        assert_eq!(get_filename("..a.b"), "..a");
        assert_eq!(get_ext("..a.b"), ".b");
    }

    #[test]
    fn test_filename_and_ext_rebuild_basename() {
        for pathname in [
            "/a/b/c.py",
            "c",
            ".hidden",
            "x/.y.z",
            "dir.with.dots/file",
            "trailing.",
            "/",
            "a/b/",
            "some/where/archive.tar.gz",
        ] {
            assert_eq!(
                format!("{}{}", get_filename(pathname), get_ext(pathname)),
                get_basename(pathname),
                "{}",
                pathname
            );
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path_default("A survey: Code is cheap, show me the code.pdf"),
            "A survey Code is cheap, show me the code.pdf"
        );
        assert_eq!(normalize_path("a<b>c", "_"), "a_b_c");
        assert_eq!(normalize_path("tab\there\u{7f}", "-"), "tab-here-");
        assert_eq!(normalize_path("é ü 漢字", ""), "é ü 漢字");
    }

    #[test]
    fn test_normalize_path_removes_every_reserved_char() {
        let mut all = String::new();
        for b in 0u8..=0x7f {
            all.push(b as char);
        }
        all.push_str("plain é");
        for rep in ["", "_", "--"] {
            let normalized = normalize_path(&all, rep);
            assert!(!normalized.chars().any(is_reserved_char), "{:?}", normalized);
            assert!(normalized.ends_with("plain é"));
        }
    }

    #[test]
    fn test_normalize_path_collisions() {
        // known limitation with an empty replacement
        assert_eq!(
            normalize_path_default("a:b"),
            normalize_path_default("a/b")
        );
    }
}
