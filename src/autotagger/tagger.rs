//! Applying a performer to the media records whose paths mention it.

use std::collections::HashSet;

use anyhow::Result;
use log::{debug, info, warn};

use crate::models::{Entity, MediaRecord};

use super::error::{AutotagError, RelationFailure};
use super::matcher::CompiledNames;
use super::normalizer::{ClassifiedName, NameNormalizer};

/// Catalog lookup for media records stored under a path prefix.
pub trait MediaReader<R: MediaRecord> {
    /// Returns every record whose path starts with `prefix`.
    ///
    /// An empty prefix returns the whole library.
    fn find_by_path_prefix(&self, prefix: &str) -> Result<Vec<R>>;
}

/// Outcome of a successful tagging pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSummary {
    /// Records whose path mentioned the entity.
    pub matched: usize,
    /// Relations newly written; the rest already existed.
    pub added: usize,
}

/// An entity's classified names, bundled for one tagging request.
///
/// Built from the entity's current name and alias strings and discarded
/// when the request completes. Path patterns are compiled once here and
/// reused for every record.
#[derive(Debug, Clone)]
pub struct Tagger<I> {
    id: I,
    kind: &'static str,
    name: ClassifiedName,
    aliases: Vec<ClassifiedName>,
    patterns: CompiledNames,
}

impl<I: Copy + std::fmt::Display> Tagger<I> {
    /// Creates a tagger for the entity using the default name normalizer.
    pub fn new<E: Entity<Id = I>>(entity: &E) -> Self {
        Self::with_normalizer(entity, &NameNormalizer::new())
    }

    /// Creates a tagger for the entity using a custom name normalizer.
    pub fn with_normalizer<E: Entity<Id = I>>(entity: &E, normalizer: &NameNormalizer) -> Self {
        let name = normalizer.normalize(entity.name().unwrap_or_default());
        let aliases = normalizer.expand_aliases(entity.aliases().unwrap_or_default());
        let patterns = CompiledNames::new(std::iter::once(&name).chain(&aliases));

        Self {
            id: entity.id(),
            kind: E::KIND,
            name,
            aliases,
            patterns,
        }
    }

    pub fn id(&self) -> I {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn name(&self) -> &ClassifiedName {
        &self.name
    }

    pub fn aliases(&self) -> &[ClassifiedName] {
        &self.aliases
    }

    /// Returns whether any gated name of the entity appears in `path`.
    pub fn matches(&self, path: &str, only_qualified: bool) -> bool {
        self.patterns.matches(path, only_qualified)
    }

    /// Tags every record under `paths` whose path mentions the entity.
    ///
    /// Each path is resolved to records through `reader`; an empty `paths`
    /// slice covers the whole library. `add_relation` is called exactly
    /// once per matched record and returns `Ok(false)` when the relation
    /// already existed. A failed write does not stop the batch.
    ///
    /// # Errors
    ///
    /// Returns [`AutotagError::Lookup`] as soon as a record lookup fails, and
    /// [`AutotagError::Relations`] after the batch if any write failed.
    /// Relations written before either error remain in place.
    pub fn tag_media<R, M, F>(
        &self,
        paths: &[String],
        reader: &M,
        only_qualified: bool,
        mut add_relation: F,
    ) -> Result<TagSummary, AutotagError>
    where
        R: MediaRecord,
        M: MediaReader<R> + ?Sized,
        F: FnMut(I, R::Id) -> Result<bool>,
    {
        let whole_library = [String::new()];
        let prefixes = if paths.is_empty() {
            &whole_library[..]
        } else {
            paths
        };

        let mut seen = HashSet::new();
        let mut summary = TagSummary::default();
        let mut failures = Vec::new();

        for prefix in prefixes {
            let records = reader
                .find_by_path_prefix(prefix)
                .map_err(AutotagError::Lookup)?;

            for record in records {
                if !seen.insert(record.id()) {
                    continue;
                }
                if !self.matches(record.path(), only_qualified) {
                    continue;
                }
                summary.matched += 1;

                match add_relation(self.id, record.id()) {
                    Ok(true) => {
                        summary.added += 1;
                        info!(
                            "Added {} '{}' to {} '{}'",
                            R::KIND,
                            record.display_name(),
                            self.kind,
                            self.name.text()
                        );
                    }
                    Ok(false) => {
                        debug!(
                            "{} '{}' already linked to {} '{}'",
                            R::KIND,
                            record.display_name(),
                            self.kind,
                            self.name.text()
                        );
                    }
                    Err(source) => {
                        let failure = RelationFailure {
                            target_kind: R::KIND,
                            target_name: record.display_name().to_string(),
                            entity_kind: self.kind,
                            entity_name: self.name.text().to_string(),
                            source,
                        };
                        warn!("{failure}");
                        failures.push(failure);
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(summary)
        } else {
            Err(AutotagError::Relations(failures))
        }
    }
}
