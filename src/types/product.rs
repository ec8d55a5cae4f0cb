use crate::error::AppError;
use crate::store::{NewProduct, Product};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/save-product`. Everything is optional at the wire
/// level; `validate` names the first missing required field.
#[derive(Debug, Default, Deserialize)]
pub struct SaveProductRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<PriceValue>,
}

/// Clients send the price either as a string or as a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Text(String),
    Number(f64),
}

impl PriceValue {
    fn into_string(self) -> String {
        match self {
            PriceValue::Text(s) => s,
            PriceValue::Number(n) => n.to_string(),
        }
    }
}

impl SaveProductRequest {
    /// Check required fields in order (name, description, price) and build
    /// the store payload. The first missing field names the error.
    pub fn validate(self) -> Result<NewProduct, AppError> {
        let name = require(self.name, "name")?;
        let description = require(self.description, "description")?;
        let price = match self.price {
            Some(p) => {
                let s = p.into_string();
                if s.trim().is_empty() {
                    return Err(AppError::Validation { field: "price" });
                }
                s
            }
            None => return Err(AppError::Validation { field: "price" }),
        };

        Ok(NewProduct {
            image: self.image,
            name,
            category: self.category,
            location: self.location,
            description,
            price,
        })
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::Validation { field }),
    }
}

#[derive(Debug, Serialize)]
pub struct SaveProductResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}
