use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::model::file::StoredFile;

pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Flat directory of uploaded blobs addressed by generated file names.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    allowed: &'static [&'static str],
}

/// The two stores the service keeps: uploaded spreadsheets and rendered report images.
#[derive(Debug, Clone)]
pub struct Storage {
    pub spreadsheets: FileStore,
    pub media: FileStore,
}

impl Storage {
    pub fn new(upload_dir: &Path, media_dir: &Path) -> io::Result<Self> {
        Ok(Self {
            spreadsheets: FileStore::new(upload_dir, SPREADSHEET_EXTENSIONS)?,
            media: FileStore::new(media_dir, IMAGE_EXTENSIONS)?,
        })
    }
}

/// Generated ids are `<uuid>.<ext>`; anything that could escape the root is rejected.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains("..")
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, allowed: &'static [&'static str]) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, allowed })
    }

    fn extension_of(&self, original_name: &str) -> Result<String, AppError> {
        let ext = Path::new(original_name.trim())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if self.allowed.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(AppError::UnsupportedFileType(format!(
                "'{original_name}' (allowed: {})",
                self.allowed.join(", ")
            )))
        }
    }

    pub fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, AppError> {
        if bytes.is_empty() {
            return Err(AppError::MissingParameter("file".into()));
        }
        let ext = self.extension_of(original_name)?;
        let id = format!("{}.{ext}", Uuid::new_v4());
        let path = self.root.join(&id);

        fs::write(&path, bytes).map_err(|e| {
            AppError::Internal(format!("failed to store {}: {e}", path.display()))
        })?;

        info!(id = %id, original = original_name, size = bytes.len(), "File stored");
        self.describe(&id, &path)
    }

    /// Path of a stored file; unknown or malformed ids are `FileNotFound`.
    pub fn path(&self, id: &str) -> Result<PathBuf, AppError> {
        if !is_valid_id(id) {
            return Err(AppError::FileNotFound(id.to_string()));
        }
        let path = self.root.join(id);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AppError::FileNotFound(id.to_string()))
        }
    }

    /// Stored files, newest first.
    pub fn list(&self) -> Result<Vec<StoredFile>, AppError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            AppError::Internal(format!("failed to list {}: {e}", self.root.display()))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_valid_id(&id) {
                continue;
            }
            // The file may be deleted between read_dir and stat.
            let meta = match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => meta,
                Ok(_) => continue,
                Err(e) => {
                    warn!(id = %id, error = %e, "Skipping file that could not be read");
                    continue;
                }
            };
            files.push(stored_file(&id, &meta));
        }

        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then_with(|| a.id.cmp(&b.id)));
        Ok(files)
    }

    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        let path = self.path(id)?;
        fs::remove_file(&path)
            .map_err(|e| AppError::Internal(format!("failed to delete {id}: {e}")))?;
        info!(id, "File deleted");
        Ok(())
    }

    fn describe(&self, id: &str, path: &Path) -> Result<StoredFile, AppError> {
        let meta = fs::metadata(path)
            .map_err(|e| AppError::Internal(format!("failed to stat {id}: {e}")))?;
        Ok(stored_file(id, &meta))
    }
}

fn stored_file(id: &str, meta: &fs::Metadata) -> StoredFile {
    let uploaded_at: DateTime<Utc> = meta
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    StoredFile {
        id: id.to_string(),
        size: meta.len(),
        uploaded_at: uploaded_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_root;

    fn store() -> FileStore {
        FileStore::new(temp_root("file-store"), SPREADSHEET_EXTENSIONS).unwrap()
    }

    #[test]
    fn save_generates_id_with_lowercased_extension() {
        let store = store();
        let saved = store.save("January Report.XLSX", b"payload").unwrap();

        assert!(saved.id.ends_with(".xlsx"));
        assert_eq!(saved.size, 7);
        assert_eq!(fs::read(store.path(&saved.id).unwrap()).unwrap(), b"payload");
    }

    #[test]
    fn save_rejects_disallowed_or_empty_uploads() {
        let store = store();
        assert!(matches!(
            store.save("notes.txt", b"x"),
            Err(AppError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            store.save("noext", b"x"),
            Err(AppError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            store.save("a.xlsx", b""),
            Err(AppError::MissingParameter(_))
        ));
    }

    #[test]
    fn path_rejects_unknown_and_traversal_ids() {
        let store = store();
        for id in ["missing.xlsx", "../secret.xlsx", "a/b.xlsx", ""] {
            assert!(matches!(store.path(id), Err(AppError::FileNotFound(_))), "id {id:?}");
        }
    }

    #[test]
    fn list_and_delete() {
        let store = store();
        let a = store.save("a.xlsx", b"one").unwrap();
        let b = store.save("b.ods", b"two!").unwrap();

        let mut ids: Vec<_> = store.list().unwrap().into_iter().map(|f| f.id).collect();
        ids.sort();
        let mut expected = vec![a.id.clone(), b.id.clone()];
        expected.sort();
        assert_eq!(ids, expected);

        store.delete(&a.id).unwrap();
        assert!(matches!(store.path(&a.id), Err(AppError::FileNotFound(_))));
        assert!(matches!(store.delete(&a.id), Err(AppError::FileNotFound(_))));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn list_skips_entries_that_cannot_be_read() {
        let store = store();
        let kept = store.save("kept.xlsx", b"one").unwrap();
        // A dangling link stats like a file deleted after read_dir saw it.
        std::os::unix::fs::symlink(
            store.root.join("gone.xlsx"),
            store.root.join(format!("{}.xlsx", Uuid::new_v4())),
        )
        .unwrap();

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![kept.id]);
    }

    #[test]
    fn list_ignores_directories() {
        let store = store();
        fs::create_dir(store.root.join("nested.xlsx")).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
