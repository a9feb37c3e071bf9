// this_file: fontscan/src/utils.rs
//
// Utility functions and helpers

use crate::{FontscanError, Result};
use std::{
    cmp::Ordering,
    fs,
    io::Read,
    path::{Path, PathBuf},
};

/// Get the size of a file in bytes
pub fn get_file_size(path: &Path) -> Result<u64> {
    let metadata = fs::metadata(path)?;
    Ok(metadata.len())
}

/// Absolute, symlink-free form of a font path
pub fn canonical_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path)
        .map_err(|e| FontscanError::Io(format!("Failed to canonicalize {}: {}", path.display(), e)))
}

/// Derive a family name from a font's file name: the part after the last
/// `/` and before the last `.`
pub fn family_from_path(path: &str) -> &str {
    let start = path.rsplit_once('/').map_or(path, |(_, name)| name);
    start.rsplit_once('.').map_or(start, |(stem, _)| stem)
}

/// First four bytes of a file, fewer if the file is shorter
pub fn read_header(path: &Path) -> Result<Vec<u8>> {
    let mut header = Vec::with_capacity(4);
    fs::File::open(path)?.take(4).read_to_end(&mut header)?;
    Ok(header)
}

/// Container format of sfnt data, judged from its first bytes
pub fn sniff_wrapper(bytes: &[u8]) -> &'static str {
    match bytes.get(..4) {
        Some(b"wOFF") => "WOFF",
        Some(b"wOF2") => "WOFF2",
        _ => "SFNT",
    }
}

fn folded_nonblank(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().filter(|c| *c != ' ').flat_map(char::to_lowercase)
}

/// Compare two strings ignoring spaces and case
pub fn cmp_ignore_blanks_and_case(a: &str, b: &str) -> Ordering {
    folded_nonblank(a).cmp(folded_nonblank(b))
}

pub fn eq_ignore_blanks_and_case(a: &str, b: &str) -> bool {
    cmp_ignore_blanks_and_case(a, b) == Ordering::Equal
}

/// Substring test ignoring spaces and case
pub fn contains_ignore_blanks_and_case(haystack: &str, needle: &str) -> bool {
    let haystack: Vec<char> = folded_nonblank(haystack).collect();
    let needle: Vec<char> = folded_nonblank(needle).collect();
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// ASCII punctuation in the word-splitting sense: anything that is not a
/// letter or digit, including the string end
fn is_word_boundary(c: Option<u8>) -> bool {
    match c {
        None => true,
        Some(c) => {
            c < b'0'
                || (b'9' < c && c < b'A')
                || (b'Z' < c && c < b'a')
                || (b'z' < c && c <= b'~')
        }
    }
}

/// Case-insensitive search for `word` standing alone in `haystack`
pub fn contains_word(haystack: &str, word: &str) -> bool {
    let hay = haystack.as_bytes();
    let word = word.as_bytes();
    if word.is_empty() || hay.len() < word.len() {
        return false;
    }
    let mut word_start = true;
    for start in 0..=hay.len() - word.len() {
        if word_start
            && hay[start..start + word.len()].eq_ignore_ascii_case(word)
            && is_word_boundary(hay.get(start + word.len()).copied())
        {
            return true;
        }
        word_start = is_word_boundary(Some(hay[start]));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_get_file_size() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.ttf");

        {
            let mut file = File::create(&file_path).unwrap();
            file.write_all(b"Hello, World!").unwrap();
        }

        let size = get_file_size(&file_path).unwrap();
        assert_eq!(size, 13);
        assert_eq!(read_header(&file_path).unwrap(), b"Hell");
    }

    #[test]
    fn test_canonical_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("a.otf");
        File::create(&file_path).unwrap();

        let dotted = dir.path().join(".").join("a.otf");
        let canonical = canonical_path(&dotted).unwrap();
        assert!(canonical.is_absolute());
        assert!(canonical.ends_with("a.otf"));
        assert_eq!(canonical, canonical_path(&file_path).unwrap());

        assert!(canonical_path(&dir.path().join("missing.otf")).is_err());
    }

    #[test]
    fn test_family_from_path() {
        assert_eq!(family_from_path("/fonts/Example-Bold.ttf"), "Example-Bold");
        assert_eq!(family_from_path("Example.v2.otf"), "Example.v2");
        assert_eq!(family_from_path("/fonts/NoExtension"), "NoExtension");
        assert_eq!(family_from_path("/fonts.d/Plain"), "Plain");
    }

    #[test]
    fn test_sniff_wrapper() {
        assert_eq!(sniff_wrapper(b"wOFF\0\x01\0\0"), "WOFF");
        assert_eq!(sniff_wrapper(b"wOF2\0\x01\0\0"), "WOFF2");
        assert_eq!(sniff_wrapper(b"\0\x01\0\0"), "SFNT");
        assert_eq!(sniff_wrapper(b"wO"), "SFNT");
    }

    #[test]
    fn test_blank_and_case_insensitive_compare() {
        assert!(eq_ignore_blanks_and_case("Semi Bold", "semibold"));
        assert!(eq_ignore_blanks_and_case("  ", ""));
        assert!(!eq_ignore_blanks_and_case("Bold", "Bolder"));
        assert_eq!(cmp_ignore_blanks_and_case("a", "B"), Ordering::Less);
    }

    #[test]
    fn test_contains_ignore_blanks_and_case() {
        assert!(contains_ignore_blanks_and_case("Semi Condensed Italic", "semicondensed"));
        assert!(contains_ignore_blanks_and_case("BoldItalic", "italic"));
        assert!(!contains_ignore_blanks_and_case("Bold", "italic"));
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("Ultra", "ultra"));
        assert!(contains_word("Ultra Bold", "ultra"));
        assert!(contains_word("Heavy-ULTRA", "ultra"));
        assert!(!contains_word("Superultra", "ultra"));
        assert!(!contains_word("Ultralight", "ultra"));
        assert!(!contains_word("ult", "ultra"));
    }
}
