use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ProductId = u64;

/// Stock above this count is considered healthy.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub active: bool,
    pub tags: Vec<String>,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Overwrites every field except the identifier and creation timestamp.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.description = draft.description;
        self.price = draft.price;
        self.stock = draft.stock;
        self.active = draft.active;
        self.tags = draft.tags;
    }
}

/// Validated field values ready to be committed to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub active: bool,
    pub tags: Vec<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: String::new(),
            price,
            stock: 0,
            active: true,
            tags: Vec::new(),
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            active: product.active,
            tags: product.tags.clone(),
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockLevel {
    InStock,
    Low,
    Out,
}

impl StockLevel {
    pub fn from_stock(stock: u32) -> Self {
        if stock > LOW_STOCK_THRESHOLD {
            StockLevel::InStock
        } else if stock > 0 {
            StockLevel::Low
        } else {
            StockLevel::Out
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::Table,
            ViewMode::Table => ViewMode::Cards,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Cards => write!(f, "cards"),
            ViewMode::Table => write!(f, "table"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cards" | "card" | "grid" => Ok(ViewMode::Cards),
            "table" | "list" => Ok(ViewMode::Table),
            other => Err(format!("Unknown view mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 7,
            name: "Desk Lamp".into(),
            category: "Home".into(),
            description: "Warm light".into(),
            price: 899.0,
            stock: 4,
            created_at: Utc::now(),
            active: false,
            tags: vec!["lighting".into()],
        }
    }

    #[test]
    fn stock_levels() {
        assert_eq!(StockLevel::from_stock(0), StockLevel::Out);
        assert_eq!(StockLevel::from_stock(1), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(10), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(11), StockLevel::InStock);
    }

    #[test]
    fn apply_keeps_identity() {
        let mut p = product();
        let created = p.created_at;
        p.apply(ProductDraft::new("Floor Lamp", "Lighting", 1499.0).with_stock(12));

        assert_eq!(p.id, 7);
        assert_eq!(p.created_at, created);
        assert_eq!(p.name, "Floor Lamp");
        assert_eq!(p.stock, 12);
        assert!(p.active);
        assert!(p.tags.is_empty());
    }

    #[test]
    fn draft_from_product_copies_flags() {
        let draft = ProductDraft::from_product(&product());
        assert!(!draft.active);
        assert_eq!(draft.tags, vec!["lighting".to_string()]);
    }

    #[test]
    fn view_mode_parsing() {
        assert_eq!("list".parse::<ViewMode>().unwrap(), ViewMode::Table);
        assert_eq!("Cards".parse::<ViewMode>().unwrap(), ViewMode::Cards);
        assert!("tiles".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Cards.toggle(), ViewMode::Table);
    }
}
