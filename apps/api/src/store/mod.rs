//! Record store: persistence contracts for products and resumes.
//!
//! Handlers and the ingestion flow only see these traits. `AppState` carries
//! `Arc<dyn ProductStore>` / `Arc<dyn ResumeStore>`; production wires the
//! Postgres implementation, tests wire the in-memory one.
//!
//! Every call is a single round-trip. Absent rows surface as `AppError::NotFound`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::product::{NewProduct, Product};
use crate::models::resume::{NewResume, Resume};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, product: NewProduct) -> Result<Product, AppError>;

    async fn get(&self, id: i64) -> Result<Product, AppError>;

    /// Writes every caller-editable field and refreshes `updated_at`.
    async fn update(&self, product: &Product) -> Result<Product, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// All products in ascending id order.
    async fn list(&self) -> Result<Vec<Product>, AppError>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, resume: NewResume) -> Result<Resume, AppError>;

    async fn get(&self, id: i64) -> Result<Resume, AppError>;

    /// Writes every caller-editable field and refreshes `updated_at`.
    async fn update(&self, resume: &Resume) -> Result<Resume, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// All resumes in ascending id order.
    async fn list(&self) -> Result<Vec<Resume>, AppError>;

    /// The resume with the highest id, i.e. the most recently created.
    async fn latest(&self) -> Result<Resume, AppError>;
}

pub(crate) fn product_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Product {id} not found"))
}

pub(crate) fn resume_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}
