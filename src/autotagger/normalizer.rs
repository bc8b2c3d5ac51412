use serde::{Deserialize, Serialize};

use crate::models::Entity;

/// Characters stripped from both ends of a name before classification.
pub const NAME_TRIM_CHARS: &[char] = &['(', ')', '-', '[', ']', '<', '>', '+'];

/// A name or alias together with its qualification assessment.
///
/// A qualified name is judged specific enough to match against file paths
/// without producing a flood of false positives: it has at least two words
/// and the first two words are each longer than one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedName {
    text: String,
    qualified: bool,
}

impl ClassifiedName {
    /// Returns the trimmed, punctuation-stripped name.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the name is reliable enough for path matching.
    pub fn is_qualified(&self) -> bool {
        self.qualified
    }

    /// Returns whether the name may be used under the given gate.
    pub fn passes_gate(&self, only_qualified: bool) -> bool {
        self.qualified || !only_qualified
    }
}

/// Normalizes and classifies performer names and aliases.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    trim_chars: Vec<char>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::with_trim_chars(NAME_TRIM_CHARS)
    }
}

impl NameNormalizer {
    /// Creates a normalizer stripping [`NAME_TRIM_CHARS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer stripping a custom character set.
    pub fn with_trim_chars(chars: &[char]) -> Self {
        Self {
            trim_chars: chars.to_vec(),
        }
    }

    /// Normalizes a single name and classifies it.
    ///
    /// Surrounding whitespace is trimmed first, then the trim character set
    /// is stripped repeatedly from both ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotag::autotagger::NameNormalizer;
    ///
    /// let normalizer = NameNormalizer::new();
    ///
    /// let name = normalizer.normalize(" (Jane Doe) ");
    /// assert_eq!(name.text(), "Jane Doe");
    /// assert!(name.is_qualified());
    ///
    /// assert!(!normalizer.normalize("Cher").is_qualified());
    /// assert!(!normalizer.normalize("J Li").is_qualified());
    /// ```
    #[must_use]
    pub fn normalize(&self, raw: &str) -> ClassifiedName {
        let text = raw
            .trim()
            .trim_matches(|c: char| self.trim_chars.contains(&c));

        let mut words = text.split_whitespace();
        let qualified = match (words.next(), words.next()) {
            (Some(first), Some(second)) => first.len() > 1 && second.len() > 1,
            _ => false,
        };

        ClassifiedName {
            text: text.to_string(),
            qualified,
        }
    }

    /// Splits a comma-separated alias field and normalizes each alias.
    ///
    /// Blank aliases are dropped; the remaining ones keep their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotag::autotagger::NameNormalizer;
    ///
    /// let normalizer = NameNormalizer::new();
    /// let aliases = normalizer.expand_aliases("Alias One, , Alias Two ,");
    ///
    /// let texts: Vec<&str> = aliases.iter().map(|a| a.text()).collect();
    /// assert_eq!(texts, vec!["Alias One", "Alias Two"]);
    /// ```
    #[must_use]
    pub fn expand_aliases(&self, field: &str) -> Vec<ClassifiedName> {
        field
            .trim()
            .split(',')
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(|alias| self.normalize(alias))
            .collect()
    }

    /// Builds the ordered candidate names for an entity.
    ///
    /// The primary name always comes first, followed by the aliases in
    /// stored order.
    #[must_use]
    pub fn candidate_names<E: Entity>(&self, entity: &E) -> Vec<ClassifiedName> {
        let mut names = vec![self.normalize(entity.name().unwrap_or_default())];
        names.extend(self.expand_aliases(entity.aliases().unwrap_or_default()));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Performer, PerformerId};

    fn normalize(raw: &str) -> ClassifiedName {
        NameNormalizer::new().normalize(raw)
    }

    #[test]
    fn strips_whitespace_and_brackets() {
        let name = normalize(" (Jane Doe) ");
        assert_eq!(name.text(), "Jane Doe");
        assert!(name.is_qualified());
    }

    #[test]
    fn strips_trim_set_repeatedly_from_both_ends() {
        assert_eq!(normalize("[-<Jane Doe>+]").text(), "Jane Doe");
        assert_eq!(normalize("++--Jane Doe").text(), "Jane Doe");
    }

    #[test]
    fn inner_punctuation_is_kept() {
        assert_eq!(normalize("Jane (JD) Doe").text(), "Jane (JD) Doe");
        assert_eq!(normalize("Mary-Jane Doe").text(), "Mary-Jane Doe");
    }

    #[test]
    fn single_word_is_unqualified() {
        assert!(!normalize("Cher").is_qualified());
        assert!(!normalize("  [Cher]  ").is_qualified());
    }

    #[test]
    fn short_leading_words_are_unqualified() {
        assert!(!normalize("J Li").is_qualified());
        assert!(!normalize("Li J").is_qualified());
        assert!(!normalize("J L Smith").is_qualified());
        assert!(normalize("Jo Li").is_qualified());
    }

    #[test]
    fn only_first_two_words_are_inspected() {
        assert!(normalize("Jane Doe X").is_qualified());
    }

    #[test]
    fn empty_and_punctuation_only_inputs_are_unqualified() {
        for raw in ["", "   ", "()", "-+-", "[ ]"] {
            let name = normalize(raw);
            assert!(!name.is_qualified(), "{raw:?} should be unqualified");
        }
        assert_eq!(normalize("()").text(), "");
    }

    #[test]
    fn custom_trim_set_is_honoured() {
        let normalizer = NameNormalizer::with_trim_chars(&['*']);
        assert_eq!(normalizer.normalize("*Jane Doe*").text(), "Jane Doe");
        assert_eq!(normalizer.normalize("(Jane Doe)").text(), "(Jane Doe)");
    }

    #[test]
    fn gate_respects_only_qualified_flag() {
        let qualified = normalize("Jane Doe");
        let unqualified = normalize("Jane");

        assert!(qualified.passes_gate(true));
        assert!(qualified.passes_gate(false));
        assert!(!unqualified.passes_gate(true));
        assert!(unqualified.passes_gate(false));
    }

    #[test]
    fn expand_aliases_drops_blanks_and_keeps_order() {
        let normalizer = NameNormalizer::new();
        let aliases = normalizer.expand_aliases("Alias One, , Alias Two ,");

        assert_eq!(
            aliases,
            vec![normalize("Alias One"), normalize("Alias Two")]
        );
    }

    #[test]
    fn expand_aliases_of_empty_field_is_empty() {
        let normalizer = NameNormalizer::new();
        assert!(normalizer.expand_aliases("").is_empty());
        assert!(normalizer.expand_aliases(" , ,, ").is_empty());
    }

    #[test]
    fn candidate_names_put_primary_name_first() {
        let performer =
            Performer::with_aliases(PerformerId::new(1), "Jane Doe", "Janie, (JD Smith)");
        let names = NameNormalizer::new().candidate_names(&performer);

        let texts: Vec<&str> = names.iter().map(ClassifiedName::text).collect();
        assert_eq!(texts, vec!["Jane Doe", "Janie", "JD Smith"]);
        assert!(names[0].is_qualified());
        assert!(!names[1].is_qualified());
        assert!(names[2].is_qualified());
    }

    #[test]
    fn candidate_names_with_missing_fields() {
        let performer = Performer::from_parts(PerformerId::new(1), None, None);
        let names = NameNormalizer::new().candidate_names(&performer);

        assert_eq!(names.len(), 1);
        assert_eq!(names[0].text(), "");
        assert!(!names[0].is_qualified());
    }
}
