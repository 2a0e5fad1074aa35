use super::{next_free_id, ProductStore};
use crate::model::{Product, ProductDraft, ProductId};
use chrono::Utc;
use std::collections::HashSet;

/// In-memory product storage for one session.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    products: Vec<Product>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store around already-normalized products, keeping their order.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    fn next_id(&self) -> ProductId {
        let used: HashSet<ProductId> = self.products.iter().map(|p| p.id).collect();
        let last = used.iter().copied().max().unwrap_or(0);
        next_free_id(last, &used)
    }
}

impl ProductStore for InMemoryStore {
    fn insert(&mut self, draft: ProductDraft) -> Product {
        let product = Product {
            id: self.next_id(),
            name: draft.name,
            category: draft.category,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            created_at: Utc::now(),
            active: draft.active,
            tags: draft.tags,
        };
        tracing::debug!(id = product.id, name = %product.name, "inserted product");
        self.products.insert(0, product.clone());
        product
    }

    fn update(&mut self, id: ProductId, draft: ProductDraft) -> Option<Product> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            tracing::warn!(id, "update ignored: no product with this id");
            return None;
        };
        product.apply(draft);
        tracing::debug!(id, name = %product.name, "updated product");
        Some(product.clone())
    }

    fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn list(&self) -> &[Product] {
        &self.products
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` generic products named "Product 1".."Product N".
        ///
        /// Inserts go to the front, so "Product N" ends up first.
        pub fn with_products(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = ProductDraft::new(
                    format!("Product {}", i + 1),
                    "General",
                    100.0 + i as f64,
                )
                .with_stock(i as u32);
                self.store.insert(draft);
            }
            self
        }

        pub fn with_product(mut self, name: &str, category: &str, price: f64) -> Self {
            self.store.insert(ProductDraft::new(name, category, price));
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::store::MAX_ID;

    #[test]
    fn first_insert_gets_id_one() {
        let mut store = InMemoryStore::new();
        let p = store.insert(ProductDraft::new("Widget", "Tools", 19.99));
        assert_eq!(p.id, 1);
        assert!(p.active);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_goes_to_front_with_max_plus_one() {
        let mut store = StoreFixture::new().with_products(3).store;
        let p = store.insert(ProductDraft::new("Newest", "Tools", 5.0));
        assert_eq!(p.id, 4);
        assert_eq!(store.list()[0].name, "Newest");
    }

    #[test]
    fn ids_follow_the_maximum_not_the_length() {
        let seeded = StoreFixture::new().with_product("A", "X", 1.0).store.list()[0].clone();
        let mut high = seeded.clone();
        high.id = 40;
        let mut store = InMemoryStore::with_products(vec![seeded, high]);
        assert_eq!(store.insert(ProductDraft::new("B", "X", 1.0)).id, 41);
    }

    #[test]
    fn insert_after_the_largest_id_takes_the_lowest_free_one() {
        let seeded = StoreFixture::new().with_product("A", "X", 1.0).store.list()[0].clone();
        let mut top = seeded.clone();
        top.id = ProductId::MAX;
        let mut store = InMemoryStore::with_products(vec![seeded, top]);

        let p = store.insert(ProductDraft::new("B", "X", 1.0));
        assert_eq!(p.id, 2);
        assert_eq!(store.insert(ProductDraft::new("C", "X", 1.0)).id, 3);
    }

    #[test]
    fn next_free_id_never_passes_the_ceiling() {
        let used: HashSet<ProductId> = [1, MAX_ID].into_iter().collect();
        assert_eq!(next_free_id(MAX_ID, &used), 2);
        assert_eq!(next_free_id(0, &HashSet::new()), 1);
        assert_eq!(next_free_id(7, &used), 8);
    }

    #[test]
    fn update_preserves_identity() {
        let mut store = StoreFixture::new().with_product("Old", "Misc", 10.0).store;
        let before = store.list()[0].clone();

        let updated = store
            .update(before.id, ProductDraft::new("New", "Tools", 20.0).with_stock(3))
            .unwrap();

        assert_eq!(updated.id, before.id);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(updated.name, "New");
        assert_eq!(store.get(before.id).unwrap().stock, 3);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let mut store = StoreFixture::new().with_products(2).store;
        let snapshot = store.list().to_vec();
        assert!(store
            .update(99, ProductDraft::new("Ghost", "None", 1.0))
            .is_none());
        assert_eq!(store.list(), snapshot.as_slice());
    }

    #[test]
    fn fixture_orders_newest_first() {
        let store = StoreFixture::default().with_products(3).store;
        let names: Vec<_> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Product 3", "Product 2", "Product 1"]);
    }
}
