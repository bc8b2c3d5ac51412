//! Finding entities whose names appear in a file path.

use anyhow::Result;
use log::debug;

use crate::models::{Entity, Performer};

use super::error::AutotagError;
use super::normalizer::{ClassifiedName, NameNormalizer};
use super::path_words::{NamePattern, get_path_words};

/// Catalog lookup for performers that might be mentioned in a path.
pub trait PerformerReader {
    /// Returns performers whose name or aliases plausibly overlap the words.
    ///
    /// The result may contain false positives; callers post-match it.
    fn query_for_auto_tag(&self, words: &[String]) -> Result<Vec<Performer>>;
}

/// Classified names with their path patterns compiled once.
///
/// Blank names have no pattern and are left out.
#[derive(Debug, Clone, Default)]
pub struct CompiledNames {
    patterns: Vec<(bool, NamePattern)>,
}

impl CompiledNames {
    /// Compiles a pattern for every non-blank name.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a ClassifiedName>) -> Self {
        let patterns = names
            .into_iter()
            .filter_map(|name| {
                NamePattern::new(name.text()).map(|pattern| (name.is_qualified(), pattern))
            })
            .collect();
        Self { patterns }
    }

    /// Returns whether any name passing the gate appears in `path`.
    pub fn matches(&self, path: &str, only_qualified: bool) -> bool {
        self.patterns
            .iter()
            .filter(|(qualified, _)| *qualified || !only_qualified)
            .any(|(_, pattern)| pattern.is_match(path))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Returns whether any of the entity's names passes the gate and appears in `path`.
///
/// Only names passing the gate are compiled.
pub fn entity_matches_path<E: Entity>(
    normalizer: &NameNormalizer,
    entity: &E,
    path: &str,
    only_qualified: bool,
) -> bool {
    let names = normalizer.candidate_names(entity);
    CompiledNames::new(names.iter().filter(|name| name.passes_gate(only_qualified)))
        .matches(path, only_qualified)
}

/// Filters `entities` down to those mentioned in `path`.
///
/// Each entity appears at most once in the result, however many of its
/// names match. Input order is preserved.
pub fn find_matching_entities<E: Entity>(
    path: &str,
    entities: Vec<E>,
    only_qualified: bool,
) -> Vec<E> {
    let normalizer = NameNormalizer::new();
    entities
        .into_iter()
        .filter(|entity| {
            let matched = entity_matches_path(&normalizer, entity, path, only_qualified);
            if matched {
                debug!("{} {} matches path '{}'", E::KIND, entity.id(), path);
            }
            matched
        })
        .collect()
}

/// Looks up the performers mentioned in `path`.
///
/// # Errors
///
/// Returns [`AutotagError::Lookup`] if the catalog query fails. No partial
/// result is returned in that case.
pub fn get_matching_performers<R>(
    path: &str,
    reader: &R,
    only_qualified: bool,
) -> Result<Vec<Performer>, AutotagError>
where
    R: PerformerReader + ?Sized,
{
    let words = get_path_words(path);
    let candidates = reader
        .query_for_auto_tag(&words)
        .map_err(AutotagError::Lookup)?;

    Ok(find_matching_entities(path, candidates, only_qualified))
}
