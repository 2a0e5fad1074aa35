use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ProductDraft, ProductId};
use crate::store::ProductStore;

/// Commits an edit. An unknown id leaves the store untouched and only warns.
pub fn run<S: ProductStore>(store: &mut S, id: ProductId, draft: ProductDraft) -> CmdResult {
    match store.update(id, draft) {
        Some(product) => CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Product updated (#{}): {}",
                product.id, product.name
            )))
            .with_affected_products(vec![product]),
        None => CmdResult::default().with_message(CmdMessage::warning(format!(
            "Product #{} no longer exists, nothing was updated",
            id
        ))),
    }
}
