//! Path tokenization and name-in-path matching.

use std::sync::LazyLock;

use log::warn;
use regex::{Regex, RegexBuilder};

/// Characters treated as interchangeable word separators inside a name.
const SEPARATOR_CHARS: &str = r".\-_ ";

static WORD_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:_|[^\w\d])+").expect("word break pattern is valid"));

/// Splits a path into loose lookup words.
///
/// The extension is dropped, the path is broken on underscores and
/// non-word characters, one-character words are discarded and each
/// remaining word is cut down to its first two characters. The result is
/// only meant to narrow a catalog query; [`name_matches_path`] does the
/// precise check afterwards, so that a path containing `janedoe` can still
/// find "Jane Doe".
///
/// # Examples
///
/// ```
/// use autotag::autotagger::get_path_words;
///
/// let words = get_path_words("/media/Jane_Doe - Beach.mp4");
/// assert_eq!(words, vec!["me", "Ja", "Do", "Be"]);
/// ```
pub fn get_path_words(path: &str) -> Vec<String> {
    let stem = strip_extension(path);
    let spaced = WORD_BREAK.replace_all(stem, " ");

    let mut words: Vec<String> = Vec::new();
    for word in spaced.split(' ') {
        if word.len() <= 1 {
            continue;
        }
        let prefix: String = word.chars().take(2).collect();
        if !words.contains(&prefix) {
            words.push(prefix);
        }
    }
    words
}

/// A name compiled into a case-insensitive, word-boundary path pattern.
///
/// Spaces in the name match any run of `.`, `-`, `_` or space in the path
/// (including none), so "Jane Doe" matches `jane.doe`, `jane_doe` and
/// `janedoe` but not `janedoex`.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    /// Compiles the pattern for `name`.
    ///
    /// Returns `None` for a blank name, which must never match.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.trim().is_empty() {
            return None;
        }

        let separator = format!("[{SEPARATOR_CHARS}]*");
        let body = regex::escape(&name).replace(' ', &separator);
        let pattern = format!(r"(?:^|_|[^\w\d]){body}(?:$|_|[^\w\d])");

        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => Some(Self { regex }),
            Err(e) => {
                warn!("Could not build path pattern for name '{name}': {e}");
                None
            }
        }
    }

    /// Returns whether the name appears in `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Returns whether `name` appears in `path` on word boundaries.
///
/// Compiles a fresh [`NamePattern`]; callers checking many paths should
/// build the pattern once instead. An empty name never matches.
pub fn name_matches_path(name: &str, path: &str) -> bool {
    NamePattern::new(name).is_some_and(|pattern| pattern.is_match(path))
}

/// Removes the extension of the final path component, if any.
fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) => &path[..file_start + dot],
        None => path,
    }
}
