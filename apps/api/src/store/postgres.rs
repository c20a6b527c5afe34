use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::models::metadata::Metadata;
use crate::models::product::{NewProduct, Product};
use crate::models::resume::{NewResume, Resume};
use crate::store::{product_not_found, resume_not_found, ProductStore, ResumeStore};

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        Ok(sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (seller_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(product.seller_id)
        .bind(&product.title)
        .bind(&product.description)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get(&self, id: i64) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET seller_id = $2, title = $3, description = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(product.seller_id)
        .bind(&product.title)
        .bind(&product.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| product_not_found(product.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(product_not_found(id));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?,
        )
    }
}

/// Row shape of `resumes`; `metadata` is JSONB and may be NULL.
#[derive(Debug, FromRow)]
struct ResumeRow {
    id: i64,
    user_id: String,
    raw_text: String,
    metadata: Option<Json<Metadata>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: row.id,
            user_id: row.user_id,
            raw_text: row.raw_text,
            metadata: row.metadata.map(|Json(m)| m),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, resume: NewResume) -> Result<Resume, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (user_id, raw_text, metadata)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&resume.user_id)
        .bind(&resume.raw_text)
        .bind(resume.metadata.as_ref().map(Json))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Resume, AppError> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Resume::from)
            .ok_or_else(|| resume_not_found(id))
    }

    async fn update(&self, resume: &Resume) -> Result<Resume, AppError> {
        sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET user_id = $2, raw_text = $3, metadata = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(resume.id)
        .bind(&resume.user_id)
        .bind(&resume.raw_text)
        .bind(resume.metadata.as_ref().map(Json))
        .fetch_optional(&self.pool)
        .await?
        .map(Resume::from)
        .ok_or_else(|| resume_not_found(resume.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(resume_not_found(id));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Resume>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn latest(&self) -> Result<Resume, AppError> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY id DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?
            .map(Resume::from)
            .ok_or_else(|| AppError::NotFound("No resumes stored yet".to_string()))
    }
}
