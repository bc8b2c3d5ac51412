use anyhow::{Context, Result, bail};
use rusqlite::OptionalExtension;
use time::OffsetDateTime;

use crate::{
    Database, Gallery, GalleryId, Image, ImageId, Performer, PerformerId, Scene, SceneId,
    autotagger::{MediaReader, PerformerReader, PerformerRelationWriter},
};

/// Service layer providing catalog operations.
///
/// CatalogService owns a Database instance and exposes the performer and
/// media records the auto-tagger works on, together with the idempotent
/// relation writes it applies.
///
/// # Examples
///
/// ```
/// use autotag::{CatalogService, Database};
///
/// # fn main() -> anyhow::Result<()> {
/// let db = Database::in_memory()?;
/// let service = CatalogService::new(db);
/// # Ok(())
/// # }
/// ```
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    /// Creates a new CatalogService with the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Creates a performer with an optional comma-separated alias field.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotag::{CatalogService, Database};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let service = CatalogService::new(Database::in_memory()?);
    ///
    /// let performer = service.create_performer("Jane Doe", Some("JD, Janie"))?;
    /// assert!(performer.id().get() > 0);
    /// assert_eq!(performer.aliases(), Some("JD, Janie"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_performer(&self, name: &str, aliases: Option<&str>) -> Result<Performer> {
        if name.trim().is_empty() {
            bail!("Performer name cannot be empty");
        }

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO performers (name, aliases) VALUES (?1, ?2)",
            (name, aliases),
        )
        .context("Failed to insert performer")?;

        Ok(Performer::from_parts(
            PerformerId::new(conn.last_insert_rowid()),
            Some(name.to_string()),
            aliases.map(str::to_string),
        ))
    }

    /// Retrieves a performer by id.
    ///
    /// Returns `None` if no performer exists with the given id.
    pub fn get_performer(&self, id: PerformerId) -> Result<Option<Performer>> {
        self.db
            .connection()
            .query_row(
                "SELECT id, name, aliases FROM performers WHERE id = ?1",
                [id.get()],
                performer_from_row,
            )
            .optional()
            .context("Failed to query performer")
    }

    /// Lists all performers ordered by id.
    pub fn list_performers(&self) -> Result<Vec<Performer>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT id, name, aliases FROM performers ORDER BY id")?;
        let rows = stmt.query_map([], performer_from_row)?;

        let mut performers = Vec::new();
        for row in rows {
            performers.push(row.context("Failed to read performer")?);
        }
        Ok(performers)
    }

    /// Registers a scene file.
    pub fn create_scene(&self, path: &str, title: Option<&str>) -> Result<Scene> {
        let id = self.insert_media("scenes", path, title)?;
        Ok(Scene::new(SceneId::new(id), path, title.map(str::to_string)))
    }

    /// Registers an image file.
    pub fn create_image(&self, path: &str, title: Option<&str>) -> Result<Image> {
        let id = self.insert_media("images", path, title)?;
        Ok(Image::new(ImageId::new(id), path, title.map(str::to_string)))
    }

    /// Registers a gallery folder or archive.
    pub fn create_gallery(&self, path: &str, title: Option<&str>) -> Result<Gallery> {
        let id = self.insert_media("galleries", path, title)?;
        Ok(Gallery::new(GalleryId::new(id), path, title.map(str::to_string)))
    }

    /// Returns the performers linked to a scene.
    pub fn scene_performers(&self, scene: SceneId) -> Result<Vec<PerformerId>> {
        self.linked_performers("performers_scenes", "scene_id", scene.get())
    }

    /// Returns the performers linked to an image.
    pub fn image_performers(&self, image: ImageId) -> Result<Vec<PerformerId>> {
        self.linked_performers("performers_images", "image_id", image.get())
    }

    /// Returns the performers linked to a gallery.
    pub fn gallery_performers(&self, gallery: GalleryId) -> Result<Vec<PerformerId>> {
        self.linked_performers("performers_galleries", "gallery_id", gallery.get())
    }

    fn insert_media(&self, table: &str, path: &str, title: Option<&str>) -> Result<i64> {
        if path.trim().is_empty() {
            bail!("Media path cannot be empty");
        }

        let conn = self.db.connection();
        conn.execute(
            &format!("INSERT INTO {table} (path, title) VALUES (?1, ?2)"),
            (path, title),
        )
        .with_context(|| format!("Failed to insert into {table}: {path}"))?;
        Ok(conn.last_insert_rowid())
    }

    fn find_media<R>(
        &self,
        table: &str,
        prefix: &str,
        build: fn(i64, String, Option<String>) -> R,
    ) -> Result<Vec<R>> {
        let conn = self.db.connection();
        // substr comparison keeps the prefix literal and case-sensitive, unlike LIKE
        let mut stmt = conn.prepare(&format!(
            "SELECT id, path, title FROM {table}
             WHERE substr(path, 1, length(?1)) = ?1
             ORDER BY id"
        ))?;
        let rows = stmt.query_map([prefix], |row| {
            Ok(build(row.get(0)?, row.get(1)?, row.get(2)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.with_context(|| format!("Failed to read row from {table}"))?);
        }
        Ok(records)
    }

    fn link_performer(
        &self,
        table: &str,
        column: &str,
        target: i64,
        performer: PerformerId,
    ) -> Result<bool> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let changed = self
            .db
            .connection()
            .execute(
                &format!(
                    "INSERT OR IGNORE INTO {table} (performer_id, {column}, created_at)
                     VALUES (?1, ?2, ?3)"
                ),
                (performer.get(), target, now),
            )
            .with_context(|| format!("Failed to insert into {table}"))?;
        Ok(changed > 0)
    }

    fn linked_performers(&self, table: &str, column: &str, target: i64) -> Result<Vec<PerformerId>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT performer_id FROM {table} WHERE {column} = ?1 ORDER BY performer_id"
        ))?;
        let rows = stmt.query_map([target], |row| row.get::<_, i64>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(PerformerId::new(row?));
        }
        Ok(ids)
    }
}

fn performer_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Performer> {
    Ok(Performer::from_parts(
        PerformerId::new(row.get(0)?),
        row.get(1)?,
        row.get(2)?,
    ))
}

impl PerformerReader for CatalogService {
    /// Finds performers whose name starts with, or whose aliases contain,
    /// any of the given words, ignoring case for all letters.
    fn query_for_auto_tag(&self, words: &[String]) -> Result<Vec<Performer>> {
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let mut clauses = Vec::with_capacity(words.len() * 2);
        let mut args = Vec::with_capacity(words.len() * 2);
        // Both sides are folded with the same Unicode lower-casing
        for word in words {
            let word = word.to_lowercase();
            clauses.push("unicode_lower(name) LIKE ?");
            args.push(format!("{word}%"));
            clauses.push("unicode_lower(aliases) LIKE ?");
            args.push(format!("%{word}%"));
        }

        let query = format!(
            "SELECT id, name, aliases FROM performers WHERE {} ORDER BY id",
            clauses.join(" OR ")
        );

        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&query)
            .context("Failed to prepare performer query")?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter()), performer_from_row)
            .context("Failed to query performers")?;

        let mut performers = Vec::new();
        for row in rows {
            performers.push(row.context("Failed to read performer")?);
        }
        Ok(performers)
    }
}

impl MediaReader<Scene> for CatalogService {
    fn find_by_path_prefix(&self, prefix: &str) -> Result<Vec<Scene>> {
        self.find_media("scenes", prefix, |id, path, title| {
            Scene::new(SceneId::new(id), path, title)
        })
    }
}

impl MediaReader<Image> for CatalogService {
    fn find_by_path_prefix(&self, prefix: &str) -> Result<Vec<Image>> {
        self.find_media("images", prefix, |id, path, title| {
            Image::new(ImageId::new(id), path, title)
        })
    }
}

impl MediaReader<Gallery> for CatalogService {
    fn find_by_path_prefix(&self, prefix: &str) -> Result<Vec<Gallery>> {
        self.find_media("galleries", prefix, |id, path, title| {
            Gallery::new(GalleryId::new(id), path, title)
        })
    }
}

impl PerformerRelationWriter for CatalogService {
    fn add_scene_performer(&self, scene: SceneId, performer: PerformerId) -> Result<bool> {
        self.link_performer("performers_scenes", "scene_id", scene.get(), performer)
    }

    fn add_image_performer(&self, image: ImageId, performer: PerformerId) -> Result<bool> {
        self.link_performer("performers_images", "image_id", image.get(), performer)
    }

    fn add_gallery_performer(&self, gallery: GalleryId, performer: PerformerId) -> Result<bool> {
        self.link_performer("performers_galleries", "gallery_id", gallery.get(), performer)
    }
}
