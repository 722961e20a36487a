use async_trait::async_trait;
use sqlx::query_as;
use uuid::Uuid;

use crate::{
    application::{
        dto::file_record_dto::FileRecordDTO, error::ApplicationError,
        repositories::FileRecordRepository,
    },
    domain::models::file_record::FileRecord,
};

pub struct PgFileRecordRepository {
    pool: sqlx::PgPool,
}

impl PgFileRecordRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRecordRepository for PgFileRecordRepository {
    async fn create(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
        let query = r#"
            INSERT INTO file_records (
                id, original_file_name, stored_name, content_type,
                size_bytes, is_safe, access_token, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        "#;

        let created: FileRecordDTO = query_as::<_, FileRecordDTO>(query)
            .bind(record.id)
            .bind(&record.original_file_name)
            .bind(&record.stored_name)
            .bind(&record.content_type)
            .bind(record.size_bytes)
            .bind(record.is_safe)
            .bind(&record.access_token)
            .bind(record.uploaded_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, ApplicationError> {
        let query = "SELECT * FROM file_records WHERE id = $1";

        let fetched: Option<FileRecordDTO> = query_as::<_, FileRecordDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(fetched.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        let query = "SELECT * FROM file_records ORDER BY uploaded_at DESC";

        let rows: Vec<FileRecordDTO> = query_as::<_, FileRecordDTO>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
