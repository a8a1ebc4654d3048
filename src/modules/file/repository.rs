use crate::{
    api::error,
    modules::file::{
        model::NewFile,
        schema::{FileContent, FileSummary},
    },
};

#[async_trait::async_trait]
pub trait FileRepository {
    /// Inserts one row; a duplicate filename surfaces as `SystemError::Conflict`.
    async fn create(&self, file: &NewFile) -> Result<(), error::SystemError>;

    async fn find_content(
        &self,
        filename: &str,
    ) -> Result<Option<FileContent>, error::SystemError>;

    /// Every stored file, newest upload first.
    async fn list(&self) -> Result<Vec<FileSummary>, error::SystemError>;

    /// Returns the number of rows removed.
    async fn delete(&self, filename: &str) -> Result<u64, error::SystemError>;

    async fn ping(&self) -> Result<(), error::SystemError>;
}
