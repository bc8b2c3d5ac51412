use std::fmt;

use serde::{Deserialize, Serialize};

use super::PerformerId;

/// A catalog entity that can be auto-tagged onto media records.
///
/// Implementors expose a primary name and a raw, comma-separated alias
/// field. Both are read fresh on every tagging pass.
pub trait Entity {
    /// Identifier type handed to relation writers.
    type Id: Copy + fmt::Display;

    /// Human-readable kind label used in log lines and errors.
    const KIND: &'static str;

    /// Returns the entity's identifier.
    fn id(&self) -> Self::Id;

    /// Returns the primary name, if one is stored.
    fn name(&self) -> Option<&str>;

    /// Returns the raw alias field, if one is stored.
    fn aliases(&self) -> Option<&str>;
}

/// A performer as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    id: PerformerId,
    name: Option<String>,
    aliases: Option<String>,
}

impl Performer {
    /// Creates a performer with no aliases.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotag::{Performer, PerformerId};
    ///
    /// let performer = Performer::new(PerformerId::new(1), "Jane Doe");
    /// assert_eq!(performer.name(), Some("Jane Doe"));
    /// assert_eq!(performer.aliases(), None);
    /// ```
    pub fn new(id: PerformerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            aliases: None,
        }
    }

    /// Creates a performer with a raw, comma-separated alias field.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotag::{Performer, PerformerId};
    ///
    /// let performer = Performer::with_aliases(PerformerId::new(1), "Jane Doe", "JD, Janie D");
    /// assert_eq!(performer.aliases(), Some("JD, Janie D"));
    /// ```
    pub fn with_aliases(id: PerformerId, name: impl Into<String>, aliases: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            aliases: Some(aliases.into()),
        }
    }

    /// Rebuilds a performer from stored columns, either of which may be NULL.
    pub fn from_parts(id: PerformerId, name: Option<String>, aliases: Option<String>) -> Self {
        Self { id, name, aliases }
    }

    /// Returns the performer's unique identifier.
    pub fn id(&self) -> PerformerId {
        self.id
    }

    /// Returns the performer's primary name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the raw alias field.
    pub fn aliases(&self) -> Option<&str> {
        self.aliases.as_deref()
    }
}

impl Entity for Performer {
    type Id = PerformerId;

    const KIND: &'static str = "performer";

    fn id(&self) -> PerformerId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn aliases(&self) -> Option<&str> {
        self.aliases.as_deref()
    }
}

impl fmt::Display for Performer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("<unnamed>"))?;
        if let Some(aliases) = self.aliases.as_deref().filter(|a| !a.trim().is_empty()) {
            write!(f, " (aka {})", aliases.trim())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_performer_without_aliases() {
        let performer = Performer::new(PerformerId::new(3), "Jane Doe");

        assert_eq!(performer.id(), PerformerId::new(3));
        assert_eq!(performer.name(), Some("Jane Doe"));
        assert!(performer.aliases().is_none());
    }

    #[test]
    fn from_parts_allows_missing_name() {
        let performer = Performer::from_parts(PerformerId::new(1), None, Some("JD".to_string()));

        assert_eq!(Entity::name(&performer), None);
        assert_eq!(Entity::aliases(&performer), Some("JD"));
        assert_eq!(Performer::KIND, "performer");
    }

    #[test]
    fn display_includes_aliases_when_present() {
        let performer = Performer::with_aliases(PerformerId::new(1), "Jane Doe", " JD ");
        assert_eq!(performer.to_string(), "Jane Doe (aka JD)");

        let bare = Performer::from_parts(PerformerId::new(2), None, Some("  ".to_string()));
        assert_eq!(bare.to_string(), "<unnamed>");
    }

    #[test]
    fn serialization_roundtrip() {
        let performer = Performer::with_aliases(PerformerId::new(9), "Jane Doe", "JD");

        let json = serde_json::to_string(&performer).unwrap();
        let deserialized: Performer = serde_json::from_str(&json).unwrap();

        assert_eq!(performer, deserialized);
    }
}
