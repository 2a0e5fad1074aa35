//! # Static Dataset Loading
//!
//! The session starts from a static list of product-shaped records. Those records are
//! not trusted to be complete: a missing or malformed field is defaulted rather than
//! rejected, once, here. Everything past this module works with canonical [`Product`]s.
//!
//! | field         | default                                           |
//! |---------------|---------------------------------------------------|
//! | `id`          | next free id after the largest valid one          |
//! | `name`        | empty                                             |
//! | `category`    | empty                                             |
//! | `description` | empty                                             |
//! | `price`       | 0                                                 |
//! | `stock`       | 0                                                 |
//! | `createdAt`   | load time                                         |
//! | `isActive`    | true                                              |
//! | `tags`        | empty                                             |
//!
//! Zero and duplicate identifiers count as missing.

use crate::error::Result;
use crate::model::{Product, ProductId};
use crate::store::{next_free_id, MAX_ID};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const EMBEDDED_DATASET: &str = include_str!("../../data/products.json");

/// A dataset record before normalization. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ProductId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub stock: Option<u32>,
    #[serde(
        default,
        rename = "createdAt",
        alias = "created_at",
        deserialize_with = "lenient"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "isActive",
        alias = "active",
        deserialize_with = "lenient"
    )]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<Vec<String>>,
}

/// Deserializes a field, turning a value of the wrong shape into `None`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Applies the dataset defaults, keeping record order.
pub fn normalize(raw: Vec<RawProduct>) -> Vec<Product> {
    let loaded_at = Utc::now();
    let mut seen: HashSet<ProductId> = HashSet::with_capacity(raw.len());
    let kept: Vec<Option<ProductId>> = raw
        .iter()
        .map(|r| r.id.filter(|&id| id > 0 && id <= MAX_ID && seen.insert(id)))
        .collect();
    let mut last = seen.iter().copied().max().unwrap_or(0);

    raw.into_iter()
        .zip(kept)
        .enumerate()
        .map(|(position, (r, kept))| {
            let id = match kept {
                Some(id) => id,
                None => {
                    let id = next_free_id(last, &seen);
                    seen.insert(id);
                    last = id;
                    tracing::warn!(
                        position,
                        given = ?r.id,
                        assigned = id,
                        "dataset record without a usable id"
                    );
                    id
                }
            };

            Product {
                id,
                name: r.name.unwrap_or_default(),
                category: r.category.unwrap_or_default(),
                description: r.description.unwrap_or_default(),
                price: r.price.unwrap_or(0.0),
                stock: r.stock.unwrap_or(0),
                created_at: r.created_at.unwrap_or(loaded_at),
                active: r.active.unwrap_or(true),
                tags: r.tags.unwrap_or_default(),
            }
        })
        .collect()
}

pub fn load_str(json: &str) -> Result<Vec<Product>> {
    let raw: Vec<RawProduct> = serde_json::from_str(json)?;
    let products = normalize(raw);
    tracing::debug!(count = products.len(), "loaded dataset");
    Ok(products)
}

/// The dataset shipped with the crate.
pub fn load_embedded() -> Result<Vec<Product>> {
    load_str(EMBEDDED_DATASET)
}

pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<Product>> {
    let content = fs::read_to_string(path.as_ref())?;
    load_str(&content)
}
