//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored as fixed-width RFC 3339
//! strings so that text ordering matches time ordering.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS images (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    slug TEXT NOT NULL,
    url TEXT NOT NULL,
    description TEXT,
    created TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS image_likes (
    image_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    PRIMARY KEY (image_id, user_id),
    FOREIGN KEY (image_id) REFERENCES images(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS actions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    verb TEXT NOT NULL,
    target_id TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_images_created_at ON images(created_at);
CREATE INDEX IF NOT EXISTS idx_images_user_id ON images(user_id);
CREATE INDEX IF NOT EXISTS idx_image_likes_user_id ON image_likes(user_id);
CREATE INDEX IF NOT EXISTS idx_actions_user_created ON actions(user_id, created_at);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, username, created_at)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, created_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_USERNAME: &str = r#"
SELECT id, username, created_at
FROM users
WHERE username = ?1
"#;

// Image queries
pub const INSERT_IMAGE: &str = r#"
INSERT INTO images (id, user_id, title, slug, url, description, created, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_IMAGE_BY_ID: &str = r#"
SELECT id, user_id, title, slug, url, description, created, created_at
FROM images
WHERE id = ?1
"#;

pub const SELECT_IMAGE_BY_ID_AND_SLUG: &str = r#"
SELECT id, user_id, title, slug, url, description, created, created_at
FROM images
WHERE id = ?1 AND slug = ?2
"#;

pub const COUNT_IMAGES: &str = "SELECT COUNT(*) FROM images";

pub const SELECT_IMAGES_PAGE: &str = r#"
SELECT id, user_id, title, slug, url, description, created, created_at
FROM images
ORDER BY created_at DESC, id DESC
LIMIT ?1 OFFSET ?2
"#;

/// Prefix of the `IN (...)` lookup; placeholders are appended per call.
pub const SELECT_IMAGES_BY_IDS_PREFIX: &str = r#"
SELECT id, user_id, title, slug, url, description, created, created_at
FROM images
WHERE id IN "#;

// Like queries
pub const INSERT_LIKE: &str = r#"
INSERT OR IGNORE INTO image_likes (image_id, user_id)
VALUES (?1, ?2)
"#;

pub const DELETE_LIKE: &str = r#"
DELETE FROM image_likes
WHERE image_id = ?1 AND user_id = ?2
"#;

pub const SELECT_LIKERS: &str = r#"
SELECT u.id, u.username, u.created_at
FROM users u
INNER JOIN image_likes l ON u.id = l.user_id
WHERE l.image_id = ?1
ORDER BY u.username ASC
"#;

pub const SELECT_LIKE_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM image_likes WHERE image_id = ?1 AND user_id = ?2)
"#;

// Action queries
pub const INSERT_ACTION: &str = r#"
INSERT INTO actions (id, user_id, verb, target_id, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_RECENT_ACTIONS: &str = r#"
SELECT id, user_id, verb, target_id, created_at
FROM actions
WHERE user_id = ?1 AND created_at >= ?2
ORDER BY created_at DESC
"#;

/// Builds `SELECT ... WHERE id IN (?1, ?2, ...)` for `count` ids.
pub fn select_images_by_ids(count: usize) -> String {
    let placeholders: Vec<String> = (1..=count).map(|i| format!("?{i}")).collect();
    format!("{}({})", SELECT_IMAGES_BY_IDS_PREFIX, placeholders.join(", "))
}
