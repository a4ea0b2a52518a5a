//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product.
///
/// Owned by the read-only catalog; cart entries and order items carry
/// copies of these fields, not references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    pub image: String,
    pub description: String,
}
