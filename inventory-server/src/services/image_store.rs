//! Uploaded image storage
//!
//! Images are written under the upload directory with a sanitized name
//! suffixed by the upload time (`pen_20240131_093000.png`). Files with an
//! unsupported extension are ignored rather than rejected.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;

use crate::utils::{AppError, AppResult};

/// Accepted image extensions (lowercase)
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Save an upload, returning the stored filename.
    ///
    /// `None` when the extension is not supported or nothing usable is left
    /// of the name after sanitizing.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> AppResult<Option<String>> {
        let Some(base_name) = stored_name(original_name, Local::now()) else {
            tracing::warn!(original_name, "Ignoring upload with unsupported file name");
            return Ok(None);
        };

        self.ensure_dir()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {}", e)))?;

        let filename = self.write_new(&base_name, data).await?;

        tracing::info!(
            original_name,
            filename = %filename,
            size = data.len(),
            "Image uploaded"
        );
        Ok(Some(filename))
    }

    /// Delete a stored image. Missing files are fine.
    pub async fn remove(&self, filename: &str) {
        let Some(path) = self.resolve(filename) else {
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(filename, "Image removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(filename, error = %e, "Failed to remove image"),
        }
    }

    /// Read a stored image, `None` if absent or the name escapes the directory
    pub async fn read(&self, filename: &str) -> AppResult<Option<Vec<u8>>> {
        let Some(path) = self.resolve(filename) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::internal(format!("Failed to read image: {}", e))),
        }
    }

    /// Path of `filename` inside the upload directory.
    ///
    /// Only names that sanitize to themselves are accepted.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty() || secure_filename(filename) != filename {
            return None;
        }
        Some(self.dir.join(filename))
    }

    /// Create `base_name` (or `<stem>_<n>.<ext>` if taken) and write `data`.
    ///
    /// `create_new` makes the existence check and the create one step.
    async fn write_new(&self, base_name: &str, data: &[u8]) -> AppResult<String> {
        let (stem, ext) = split_extension(base_name);
        let mut candidate = base_name.to_string();
        let mut n = 1;
        let mut file = loop {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&candidate))
                .await
            {
                Ok(file) => break file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    candidate = format!("{}_{}.{}", stem, n, ext);
                    n += 1;
                }
                Err(e) => {
                    return Err(AppError::internal(format!("Failed to save file: {}", e)));
                }
            }
        };

        let written = async {
            file.write_all(data).await?;
            file.flush().await
        }
        .await;
        if let Err(e) = written {
            drop(file);
            self.remove(&candidate).await;
            return Err(AppError::internal(format!("Failed to save file: {}", e)));
        }
        Ok(candidate)
    }
}

/// Whether `filename` has a supported image extension
pub fn is_supported(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| SUPPORTED_FORMATS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduce a client-supplied name to `[A-Za-z0-9._-]`.
///
/// Directory parts are dropped, whitespace becomes `_`, other characters are
/// removed, and leading/trailing dots and underscores are stripped.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    cleaned.trim_matches(['.', '_']).to_string()
}

/// `<stem>_<YYYYmmdd_HHMMSS>.<ext>` for a supported upload name
pub fn stored_name(original_name: &str, now: DateTime<Local>) -> Option<String> {
    if !is_supported(original_name) {
        return None;
    }
    let secure = secure_filename(original_name);
    let (stem, ext) = split_extension(&secure);
    if stem.is_empty() || !is_supported(&secure) {
        return None;
    }
    Some(format!(
        "{}_{}.{}",
        stem,
        now.format("%Y%m%d_%H%M%S"),
        ext
    ))
}

fn split_extension(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or((name, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at_nine() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 31, 9, 30, 5).unwrap()
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("pen.png"));
        assert!(is_supported("PEN.JPEG"));
        assert!(is_supported("a.b.webp"));
        assert!(!is_supported("pen.svg"));
        assert!(!is_supported("png"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My Pen.png"), "My_Pen.png");
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\photos\\pen.jpg"), "pen.jpg");
        assert_eq!(secure_filename(".hidden.gif"), "hidden.gif");
        assert_eq!(secure_filename("bút bi.png"), "bt_bi.png");
    }

    #[test]
    fn test_stored_name() {
        assert_eq!(
            stored_name("My Pen.PNG", at_nine()).as_deref(),
            Some("My_Pen_20240131_093005.PNG")
        );
        assert_eq!(stored_name("notes.txt", at_nine()), None);
        // nothing left of the stem
        assert_eq!(stored_name("日本.png", at_nine()), None);
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let store = ImageStore::new("/srv/uploads");
        assert_eq!(
            store.resolve("pen.png"),
            Some(PathBuf::from("/srv/uploads/pen.png"))
        );
        assert_eq!(store.resolve("../products.json"), None);
        assert_eq!(store.resolve("a/b.png"), None);
        assert_eq!(store.resolve(""), None);
    }

    #[tokio::test]
    async fn test_save_read_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(temp_dir.path().join("uploads"));

        let first = store.save("pen.png", b"first").await.unwrap().unwrap();
        let second = store.save("pen.png", b"second").await.unwrap().unwrap();
        assert!(first.starts_with("pen_") && first.ends_with(".png"));
        // same name within the same second does not overwrite
        assert_ne!(first, second);

        assert_eq!(store.read(&first).await.unwrap().as_deref(), Some(&b"first"[..]));
        store.remove(&first).await;
        assert_eq!(store.read(&first).await.unwrap(), None);
        // removing twice is harmless
        store.remove(&first).await;

        assert_eq!(store.save("notes.txt", b"text").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_distinct_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(temp_dir.path().join("uploads"));

        let (a, b, c) = tokio::join!(
            store.save("pen.png", b"aaa"),
            store.save("pen.png", b"bbb"),
            store.save("pen.png", b"ccc"),
        );
        let names = [a.unwrap().unwrap(), b.unwrap().unwrap(), c.unwrap().unwrap()];
        assert_ne!(names[0], names[1]);
        assert_ne!(names[1], names[2]);
        assert_ne!(names[0], names[2]);

        for (name, expected) in names.iter().zip([b"aaa", b"bbb", b"ccc"]) {
            assert_eq!(store.read(name).await.unwrap().as_deref(), Some(&expected[..]));
        }
    }
}
