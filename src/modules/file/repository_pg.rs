use crate::{
    api::error,
    modules::file::{
        model::NewFile,
        repository::FileRepository,
        schema::{FileContent, FileSummary},
    },
};

#[derive(Clone)]
pub struct FilePgRepository {
    pool: sqlx::PgPool,
}

impl FilePgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FileRepository for FilePgRepository {
    async fn create(&self, file: &NewFile) -> Result<(), error::SystemError> {
        sqlx::query(
            r#"
            INSERT INTO files (filename, mime_type, content)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&file.filename)
        .bind(&file.mime_type)
        .bind(&file.content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_content(
        &self,
        filename: &str,
    ) -> Result<Option<FileContent>, error::SystemError> {
        let file = sqlx::query_as::<_, FileContent>(
            "SELECT content, mime_type FROM files WHERE filename = $1",
        )
        .bind(filename)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    async fn list(&self) -> Result<Vec<FileSummary>, error::SystemError> {
        let files = sqlx::query_as::<_, FileSummary>(
            r#"
            SELECT filename, octet_length(content)::BIGINT AS size, uploaded_at
            FROM files
            ORDER BY uploaded_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn delete(&self, filename: &str) -> Result<u64, error::SystemError> {
        let result = sqlx::query("DELETE FROM files WHERE filename = $1")
            .bind(filename)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), error::SystemError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
