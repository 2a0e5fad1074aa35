//! # Storage Layer
//!
//! This module defines the storage abstraction for shelf. The [`ProductStore`] trait is
//! the only way the rest of the crate mutates products: records are inserted or updated,
//! never deleted.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: an ordered `Vec` scoped to one UI session.
//!   Nothing outlives the process.
//!
//! ## Identity
//!
//! The store owns identifiers and creation timestamps. Callers hand over a
//! [`ProductDraft`]; the store decides the `id` (one greater than the current maximum,
//! or 1 when empty) and stamps `created_at`. Updates keep both. Identifiers stay at or
//! below [`MAX_ID`]; when the successor would pass it, the lowest free id is used instead.

use crate::model::{Product, ProductDraft, ProductId};
use std::collections::HashSet;

pub mod memory;

/// Largest identifier ever handed out, so `id + 1` always fits.
pub const MAX_ID: ProductId = ProductId::MAX - 1;

/// The identifier after `last`, or the lowest unused one when that is taken or past [`MAX_ID`].
pub fn next_free_id(last: ProductId, used: &HashSet<ProductId>) -> ProductId {
    match last.checked_add(1) {
        Some(id) if id <= MAX_ID && !used.contains(&id) => id,
        _ => (1..=MAX_ID)
            .find(|id| !used.contains(id))
            .unwrap_or(MAX_ID),
    }
}

/// Abstract interface for product storage.
pub trait ProductStore {
    /// Stores a new product at the front of the collection and returns it.
    fn insert(&mut self, draft: ProductDraft) -> Product;

    /// Replaces every field but `id` and `created_at` of the matching product.
    ///
    /// Returns `None` without touching anything when no product has `id`.
    fn update(&mut self, id: ProductId, draft: ProductDraft) -> Option<Product>;

    fn get(&self, id: ProductId) -> Option<&Product>;

    /// All products, in display order.
    fn list(&self) -> &[Product];

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}
