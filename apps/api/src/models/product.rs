use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub seller_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub seller_id: i64,
    pub title: String,
    pub description: Option<String>,
}

/// Body of `POST /products` and `PUT /products/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    pub seller_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ProductInput {
    pub fn validate(self) -> Result<NewProduct, AppError> {
        let seller_id = self
            .seller_id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Validation("seller_id is required".to_string()))?;
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Validation("title is required".to_string()))?;

        Ok(NewProduct {
            seller_id,
            title,
            description: self.description,
        })
    }

    /// Merges the submitted fields over the stored product; omitted fields
    /// keep their stored values. The merged product must still be valid.
    pub fn apply_to(self, product: Product) -> Result<Product, AppError> {
        let merged = ProductInput {
            seller_id: self.seller_id.or(Some(product.seller_id)),
            title: self.title.or(Some(product.title)),
            description: self.description.or(product.description),
        }
        .validate()?;

        Ok(Product {
            seller_id: merged.seller_id,
            title: merged.title,
            description: merged.description,
            ..product
        })
    }
}
