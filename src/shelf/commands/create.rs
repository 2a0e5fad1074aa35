use crate::commands::{CmdMessage, CmdResult};
use crate::model::ProductDraft;
use crate::store::ProductStore;

pub fn run<S: ProductStore>(store: &mut S, draft: ProductDraft) -> CmdResult {
    let product = store.insert(draft);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product added (#{}): {}",
        product.id, product.name
    )));
    result.affected_products.push(product);
    result
}
