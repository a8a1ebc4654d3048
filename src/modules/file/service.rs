use std::sync::Arc;

use crate::api::error;
use crate::modules::file::{
    model::{NewFile, UploadConfig},
    repository::FileRepository,
    schema::{FileContent, FileSummary, UploadResponse},
};

#[derive(Clone)]
pub struct FileService {
    file_repo: Arc<dyn FileRepository + Send + Sync>,
    config: UploadConfig,
}

impl FileService {
    pub fn with_dependencies(
        file_repo: Arc<dyn FileRepository + Send + Sync>,
        config: UploadConfig,
    ) -> Self {
        log::info!("FileService initialized (upload cap {} bytes)", config.max_file_size);
        FileService { file_repo, config }
    }

    pub fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    /// Store a new file. Never overwrites: a taken name is a conflict.
    pub async fn upload_file(
        &self,
        filename: String,
        mime_type: Option<String>,
        content: Vec<u8>,
    ) -> Result<UploadResponse, error::SystemError> {
        let size = content.len();
        if size > self.config.max_file_size {
            return Err(error::SystemError::payload_too_large("file too big"));
        }

        let new_file = NewFile { filename, mime_type, content };

        self.file_repo.create(&new_file).await.map_err(|e| match e {
            error::SystemError::Conflict(_) => {
                error::SystemError::conflict("File already exists")
            }
            e => e,
        })?;

        log::info!("Stored {:?} ({} bytes)", new_file.filename, size);
        Ok(UploadResponse { filename: new_file.filename, size })
    }

    pub async fn get_file(&self, filename: &str) -> Result<FileContent, error::SystemError> {
        self.file_repo
            .find_content(filename)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Not found"))
    }

    pub async fn list_files(&self) -> Result<Vec<FileSummary>, error::SystemError> {
        self.file_repo.list().await
    }

    pub async fn delete_file(&self, filename: &str) -> Result<(), error::SystemError> {
        match self.file_repo.delete(filename).await? {
            0 => Err(error::SystemError::not_found("Not found")),
            1 => {
                log::info!("Deleted {:?}", filename);
                Ok(())
            }
            // filename is UNIQUE, so this means the store misbehaved
            n => Err(error::SystemError::internal(format!(
                "Unexpected response from database: {n} rows deleted for {filename:?}"
            ))),
        }
    }

    pub async fn check_health(&self) -> Result<(), error::SystemError> {
        self.file_repo.ping().await
    }
}

/// Content type recorded for an upload: the one the client sent, otherwise a
/// guess from the extension, otherwise none.
pub fn resolve_mime_type(filename: &str, supplied: Option<String>) -> Option<String> {
    supplied
        .filter(|m| !m.is_empty())
        .or_else(|| mime_guess::from_path(filename).first().map(|m| m.to_string()))
}
