pub mod metadata;
pub mod product;
pub mod resume;
