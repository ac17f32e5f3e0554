// src/routes/catalog.rs
use axum::{Json, extract::Path};

use crate::{
    error::AppError,
    services::catalog::{self, Product},
};

pub async fn list_products_handler() -> Json<&'static [Product]> {
    Json(catalog::products())
}

pub async fn get_product_handler(Path(id): Path<u32>) -> Result<Json<Product>, AppError> {
    catalog::find(id)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::unknown_product(id))
}
