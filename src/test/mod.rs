use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    api::error,
    modules::file::{
        model::NewFile,
        repository::FileRepository,
        schema::{FileContent, FileSummary},
    },
};

struct StoredFile {
    file: NewFile,
    uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// `FileRepository` backed by a Vec, with switches to simulate an unreachable
/// or misbehaving database.
#[derive(Default)]
pub struct InMemoryFileRepository {
    files: Mutex<Vec<StoredFile>>,
    unavailable: AtomicBool,
    broken: AtomicBool,
    forced_delete_count: Mutex<Option<u64>>,
}

impl InMemoryFileRepository {
    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes every query fail with a raw database error.
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    pub fn force_delete_count(&self, count: u64) {
        *self.forced_delete_count.lock().unwrap() = Some(count);
    }

    fn check(&self) -> Result<(), error::SystemError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        if self.broken.load(Ordering::SeqCst) {
            return Err(error::SystemError::DatabaseError(
                "column \"content\" does not exist".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, file: &NewFile) -> Result<(), error::SystemError> {
        self.check()?;
        let mut files = self.files.lock().unwrap();
        if files.iter().any(|f| f.file.filename == file.filename) {
            return Err(error::SystemError::conflict("Duplicate value"));
        }
        files.push(StoredFile { file: file.clone(), uploaded_at: chrono::Utc::now() });
        Ok(())
    }

    async fn find_content(
        &self,
        filename: &str,
    ) -> Result<Option<FileContent>, error::SystemError> {
        self.check()?;
        let files = self.files.lock().unwrap();
        Ok(files.iter().find(|f| f.file.filename == filename).map(|f| FileContent {
            content: f.file.content.clone(),
            mime_type: f.file.mime_type.clone(),
        }))
    }

    async fn list(&self) -> Result<Vec<FileSummary>, error::SystemError> {
        self.check()?;
        let files = self.files.lock().unwrap();
        // insertion order is upload order
        Ok(files
            .iter()
            .rev()
            .map(|f| FileSummary {
                filename: f.file.filename.clone(),
                size: f.file.content.len() as i64,
                uploaded_at: f.uploaded_at,
            })
            .collect())
    }

    async fn delete(&self, filename: &str) -> Result<u64, error::SystemError> {
        self.check()?;
        if let Some(count) = *self.forced_delete_count.lock().unwrap() {
            return Ok(count);
        }
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|f| f.file.filename != filename);
        Ok((before - files.len()) as u64)
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        self.check()
    }
}
