/// Complete database schema for the media catalog.
///
/// Uses CREATE TABLE/INDEX IF NOT EXISTS for idempotent execution.
pub const INITIAL_SCHEMA: &str = r#"
-- Performers: primary name plus a raw comma-separated alias field
CREATE TABLE IF NOT EXISTS performers (
    id INTEGER PRIMARY KEY,
    name TEXT,
    aliases TEXT
);

-- Media records addressed by filesystem path
CREATE TABLE IF NOT EXISTS scenes (
    id INTEGER PRIMARY KEY,
    path TEXT NOT NULL UNIQUE,
    title TEXT
);

CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY,
    path TEXT NOT NULL UNIQUE,
    title TEXT
);

CREATE TABLE IF NOT EXISTS galleries (
    id INTEGER PRIMARY KEY,
    path TEXT NOT NULL UNIQUE,
    title TEXT
);

-- Junction tables: performer links (many-to-many)
CREATE TABLE IF NOT EXISTS performers_scenes (
    performer_id INTEGER NOT NULL,
    scene_id INTEGER NOT NULL,
    created_at INTEGER,
    PRIMARY KEY (performer_id, scene_id),
    FOREIGN KEY (performer_id) REFERENCES performers(id) ON DELETE CASCADE,
    FOREIGN KEY (scene_id) REFERENCES scenes(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS performers_images (
    performer_id INTEGER NOT NULL,
    image_id INTEGER NOT NULL,
    created_at INTEGER,
    PRIMARY KEY (performer_id, image_id),
    FOREIGN KEY (performer_id) REFERENCES performers(id) ON DELETE CASCADE,
    FOREIGN KEY (image_id) REFERENCES images(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS performers_galleries (
    performer_id INTEGER NOT NULL,
    gallery_id INTEGER NOT NULL,
    created_at INTEGER,
    PRIMARY KEY (performer_id, gallery_id),
    FOREIGN KEY (performer_id) REFERENCES performers(id) ON DELETE CASCADE,
    FOREIGN KEY (gallery_id) REFERENCES galleries(id) ON DELETE CASCADE
);

-- Index for the auto-tag name prefix lookup
CREATE INDEX IF NOT EXISTS idx_performers_name ON performers(name COLLATE NOCASE);

-- Indexes for reverse junction lookups
CREATE INDEX IF NOT EXISTS idx_performers_scenes_scene ON performers_scenes(scene_id);
CREATE INDEX IF NOT EXISTS idx_performers_images_image ON performers_images(image_id);
CREATE INDEX IF NOT EXISTS idx_performers_galleries_gallery ON performers_galleries(gallery_id);
"#;
