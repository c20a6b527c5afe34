//! In-memory record store used by handler and ingestion tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::product::{NewProduct, Product};
use crate::models::resume::{NewResume, Resume};
use crate::store::{product_not_found, resume_not_found, ProductStore, ResumeStore};

#[derive(Default)]
pub struct MemoryStore {
    products: Mutex<Table<Product>>,
    resumes: Mutex<Table<Resume>>,
    /// When set, every resume write fails as a database outage would.
    pub fail_resume_writes: bool,
}

struct Table<T> {
    next_id: i64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MemoryStore {
    pub fn failing_resume_writes() -> Self {
        Self {
            fail_resume_writes: true,
            ..Self::default()
        }
    }

    pub fn resume_count(&self) -> usize {
        self.resumes.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut table = self.products.lock().unwrap();
        let now = Utc::now();
        let stored = Product {
            id: table.allocate_id(),
            seller_id: product.seller_id,
            title: product.title,
            description: product.description,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<Product, AppError> {
        let table = self.products.lock().unwrap();
        table
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| product_not_found(id))
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        let mut table = self.products.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| product_not_found(product.id))?;
        row.seller_id = product.seller_id;
        row.title = product.title.clone();
        row.description = product.description.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut table = self.products.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        if table.rows.len() == before {
            return Err(product_not_found(id));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.lock().unwrap().rows.clone())
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn create(&self, resume: NewResume) -> Result<Resume, AppError> {
        if self.fail_resume_writes {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut table = self.resumes.lock().unwrap();
        let now = Utc::now();
        let stored = Resume {
            id: table.allocate_id(),
            user_id: resume.user_id,
            raw_text: resume.raw_text,
            metadata: resume.metadata,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<Resume, AppError> {
        let table = self.resumes.lock().unwrap();
        table
            .rows
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| resume_not_found(id))
    }

    async fn update(&self, resume: &Resume) -> Result<Resume, AppError> {
        if self.fail_resume_writes {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut table = self.resumes.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|r| r.id == resume.id)
            .ok_or_else(|| resume_not_found(resume.id))?;
        row.user_id = resume.user_id.clone();
        row.raw_text = resume.raw_text.clone();
        row.metadata = resume.metadata.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut table = self.resumes.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        if table.rows.len() == before {
            return Err(resume_not_found(id));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Resume>, AppError> {
        Ok(self.resumes.lock().unwrap().rows.clone())
    }

    async fn latest(&self) -> Result<Resume, AppError> {
        let table = self.resumes.lock().unwrap();
        table
            .rows
            .iter()
            .max_by_key(|r| r.id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("No resumes stored yet".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> NewProduct {
        NewProduct {
            seller_id: 7,
            title: "Standing desk".to_string(),
            description: Some("Oak top".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_caller_fields() {
        let store = MemoryStore::default();
        let created = ProductStore::create(&store, desk()).await.unwrap();
        let fetched = ProductStore::get(&store, created.id).await.unwrap();

        assert_eq!(fetched.seller_id, 7);
        assert_eq!(fetched.title, "Standing desk");
        assert_eq!(fetched.description.as_deref(), Some("Oak top"));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryStore::default();
        let created = ProductStore::create(&store, desk()).await.unwrap();
        ProductStore::delete(&store, created.id).await.unwrap();

        let err = ProductStore::get(&store, created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = ProductStore::delete(&store, created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_latest_follows_highest_id() {
        let store = MemoryStore::default();
        assert!(matches!(
            store.latest().await.unwrap_err(),
            AppError::NotFound(_)
        ));

        for text in ["first", "second"] {
            ResumeStore::create(
                &store,
                NewResume {
                    user_id: "sess".to_string(),
                    raw_text: text.to_string(),
                    metadata: None,
                },
            )
            .await
            .unwrap();
        }
        assert_eq!(store.latest().await.unwrap().raw_text, "second");
    }
}
