//! # API Facade
//!
//! [`ShelfApi`] is one UI session over a product store. Every user action is a method
//! call: a keystroke in the search field, a timer tick, a page click, a form edit. The
//! session applies the event and keeps its invariants; renderers ask for a [`Screen`].
//!
//! ## State
//!
//! - the store (the only mutable collection)
//! - the search box (raw input, debounced effective term)
//! - the current page
//! - the view mode (cards or table)
//! - the form dialog (closed, or open in create/edit mode)
//!
//! The filtered list, the page count, the page window and the page selector are all
//! derived on demand from that state and never cached.
//!
//! ## Invariants
//!
//! - A newly effective search term resets the page to 1.
//! - After any event the current page is clamped into `[1, total_pages]` (1 when empty).
//! - Page requests are clamped; a request for the current page is a no-op.
//!
//! ## Generic Over ProductStore
//!
//! `ShelfApi<S: ProductStore>` works against any store. The binary and the tests both use
//! [`InMemoryStore`](crate::store::memory::InMemoryStore).

use crate::commands::form::{Field, FormDialog, ProductForm};
use crate::commands::paginate::{self, PageItem};
use crate::commands::search::{filter_products, SearchBox, SearchCommit};
use crate::commands::{create, update, CmdMessage, CmdResult};
use crate::config::ShelfConfig;
use crate::model::{Product, ProductId, ViewMode};
use crate::store::ProductStore;
use std::time::{Duration, Instant};

/// Session knobs, usually taken from [`ShelfConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub page_size: usize,
    pub search_debounce: Duration,
    pub view_mode: ViewMode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&ShelfConfig::default())
    }
}

impl From<&ShelfConfig> for SessionSettings {
    fn from(config: &ShelfConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            search_debounce: config.search_debounce(),
            view_mode: config.default_view,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Screen {
    pub view_mode: ViewMode,
    pub search_input: String,
    pub effective_search: String,
    /// Typed text has not taken effect yet.
    pub searching: bool,
    pub match_count: usize,
    pub total_count: usize,
    pub products: Vec<Product>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_items: Vec<PageItem>,
    pub form: Option<ProductForm>,
}

impl Screen {
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

pub struct ShelfApi<S: ProductStore> {
    store: S,
    search: SearchBox,
    page_size: usize,
    current_page: usize,
    view_mode: ViewMode,
    dialog: FormDialog,
}

impl<S: ProductStore> ShelfApi<S> {
    pub fn new(store: S, settings: SessionSettings) -> Self {
        Self {
            store,
            search: SearchBox::new(settings.search_debounce),
            page_size: settings.page_size.max(1),
            current_page: 1,
            view_mode: settings.view_mode,
            dialog: FormDialog::Closed,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn products(&self) -> &[Product] {
        self.store.list()
    }

    // --- Search ---

    /// A keystroke in the search field. Filtering waits for the quiescent window.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Lets pending search input take effect once the window has elapsed.
    ///
    /// Returns true when a filter pass happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        let commit = self.search.tick(now);
        self.apply_search(commit)
    }

    /// Applies pending search input right away.
    pub fn flush_search(&mut self) -> bool {
        let commit = self.search.flush();
        self.apply_search(commit)
    }

    fn apply_search(&mut self, commit: Option<SearchCommit>) -> bool {
        let Some(commit) = commit else {
            return false;
        };
        if commit.changed {
            self.current_page = 1;
        }
        self.reconcile();
        true
    }

    pub fn search_input(&self) -> &str {
        self.search.input_text()
    }

    pub fn effective_search(&self) -> &str {
        self.search.effective()
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_searching()
    }

    pub fn search_remaining(&self, now: Instant) -> Option<Duration> {
        self.search.remaining(now)
    }

    pub fn search_passes(&self) -> usize {
        self.search.passes()
    }

    // --- Derived views ---

    pub fn filtered(&self) -> Vec<&Product> {
        filter_products(self.store.list(), self.search.effective())
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.filtered().len(), self.page_size)
    }

    pub fn current_page(&self) -> usize {
        paginate::clamp_page(self.current_page, self.total_pages())
    }

    pub fn page_window(&self) -> Vec<&Product> {
        let filtered = self.filtered();
        let total = paginate::total_pages(filtered.len(), self.page_size);
        let page = paginate::clamp_page(self.current_page, total);
        let range = paginate::page_range(filtered.len(), page, self.page_size);
        filtered[range].to_vec()
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        paginate::page_numbers(self.current_page(), self.total_pages())
    }

    pub fn screen(&self) -> Screen {
        let filtered = self.filtered();
        let match_count = filtered.len();
        let total_pages = paginate::total_pages(match_count, self.page_size);
        let current_page = paginate::clamp_page(self.current_page, total_pages);
        let range = paginate::page_range(match_count, current_page, self.page_size);

        Screen {
            view_mode: self.view_mode,
            search_input: self.search.input_text().to_string(),
            effective_search: self.search.effective().to_string(),
            searching: self.search.is_searching(),
            match_count,
            total_count: self.store.len(),
            products: filtered[range].iter().map(|&p| p.clone()).collect(),
            current_page,
            total_pages,
            page_items: paginate::page_numbers(current_page, total_pages),
            form: self.dialog.form().cloned(),
        }
    }

    // --- Pages ---

    /// Moves to `requested`, clamped into the valid range. False if nothing changed.
    pub fn go_to_page(&mut self, requested: i64) -> bool {
        let current = self.current_page();
        match paginate::navigate(current, requested, self.total_pages()) {
            Some(target) => {
                tracing::debug!(from = current, to = target, "page change");
                self.current_page = target;
                true
            }
            None => {
                self.current_page = current;
                false
            }
        }
    }

    pub fn next_page(&mut self) -> bool {
        let next = self.current_page() as i64 + 1;
        self.go_to_page(next)
    }

    pub fn prev_page(&mut self) -> bool {
        let prev = self.current_page() as i64 - 1;
        self.go_to_page(prev)
    }

    fn reconcile(&mut self) {
        let clamped = paginate::clamp_page(self.current_page, self.total_pages());
        if clamped != self.current_page {
            tracing::debug!(from = self.current_page, to = clamped, "page clamped");
            self.current_page = clamped;
        }
    }

    // --- View mode ---

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggle();
        self.view_mode
    }

    // --- Form dialog ---

    pub fn form(&self) -> Option<&ProductForm> {
        self.dialog.form()
    }

    pub fn is_form_open(&self) -> bool {
        self.dialog.is_open()
    }

    pub fn open_create(&mut self) -> CmdResult {
        if !self.dialog.open_create() {
            return form_already_open();
        }
        tracing::debug!("form opened for a new product");
        CmdResult::default()
    }

    pub fn open_edit(&mut self, id: ProductId) -> CmdResult {
        if self.dialog.is_open() {
            return form_already_open();
        }
        let Some(product) = self.store.get(id) else {
            return CmdResult::default()
                .with_message(CmdMessage::warning(format!("No product with id {}", id)));
        };
        self.dialog.open_edit(product);
        tracing::debug!(id, "form opened for editing");
        CmdResult::default()
    }

    /// Types into a form field, clearing that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> CmdResult {
        match self.dialog.form_mut() {
            Some(form) => {
                form.set_field(field, value);
                CmdResult::default()
            }
            None => no_form_open(),
        }
    }

    /// Validates the open form and commits it. The form stays open on failure.
    pub fn submit_form(&mut self) -> CmdResult {
        let Some(form) = self.dialog.form_mut() else {
            return no_form_open();
        };

        let submission = match form.submit() {
            Ok(submission) => submission,
            Err(errors) => {
                tracing::debug!(count = errors.len(), "form submission rejected");
                return CmdResult::default().with_message(CmdMessage::error(format!(
                    "Please fix {} field{} before saving",
                    errors.len(),
                    if errors.len() == 1 { "" } else { "s" }
                )));
            }
        };

        self.dialog.close();
        let result = match submission.target {
            Some(id) => update::run(&mut self.store, id, submission.draft),
            None => create::run(&mut self.store, submission.draft),
        };
        self.reconcile();
        result
    }

    pub fn cancel_form(&mut self) -> CmdResult {
        self.close_form("cancel")
    }

    /// The escape key closes the dialog without saving.
    pub fn escape(&mut self) -> CmdResult {
        self.close_form("escape")
    }

    fn close_form(&mut self, reason: &str) -> CmdResult {
        if self.dialog.close() {
            tracing::debug!(reason, "form closed without saving");
            CmdResult::default()
        } else {
            no_form_open()
        }
    }
}

fn form_already_open() -> CmdResult {
    CmdResult::default().with_message(CmdMessage::warning(
        "A product form is already open; submit or cancel it first",
    ))
}

fn no_form_open() -> CmdResult {
    CmdResult::default().with_message(CmdMessage::warning("No product form is open"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::form::{Bound, FieldError};
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn api_with(count: usize) -> ShelfApi<InMemoryStore> {
        ShelfApi::new(
            StoreFixture::new().with_products(count).store,
            SessionSettings::default(),
        )
    }

    fn search_now(api: &mut ShelfApi<InMemoryStore>, term: &str) {
        api.type_search(term, Instant::now());
        api.flush_search();
    }

    #[test]
    fn pages_of_eight() {
        let api = api_with(20);
        assert_eq!(api.total_pages(), 3);
        assert_eq!(api.page_window().len(), 8);
        assert_eq!(api.page_window()[0].name, "Product 20");
    }

    #[test]
    fn last_page_is_partial() {
        let mut api = api_with(20);
        assert!(api.go_to_page(3));
        let names: Vec<_> = api.page_window().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Product 4", "Product 3", "Product 2", "Product 1"]);
    }

    #[test]
    fn empty_store_has_no_pages() {
        let api = api_with(0);
        let screen = api.screen();
        assert_eq!(screen.total_pages, 0);
        assert_eq!(screen.current_page, 1);
        assert!(screen.products.is_empty());
        assert!(screen.page_items.is_empty());
        assert!(!screen.show_pagination());
    }

    #[test]
    fn navigation_is_clamped() {
        let mut api = api_with(20);
        assert!(!api.go_to_page(0), "page 0 clamps to the current page 1");
        assert!(api.go_to_page(99));
        assert_eq!(api.current_page(), 3);
        assert!(!api.next_page());
        assert!(api.go_to_page(-3));
        assert_eq!(api.current_page(), 1);
        assert!(!api.prev_page());
    }

    #[test]
    fn new_search_term_resets_to_page_one() {
        let mut api = api_with(20);
        api.go_to_page(2);
        search_now(&mut api, "product");
        assert_eq!(api.current_page(), 1);
    }

    #[test]
    fn shrinking_results_clamp_the_page() {
        let mut api = api_with(20);
        api.go_to_page(3);
        // Same term committed twice does not reset, but the page is still clamped
        search_now(&mut api, "");
        assert_eq!(api.current_page(), 3);

        search_now(&mut api, "product 1");
        // 11 matches: "Product 1" and "Product 10".."Product 19"
        assert_eq!(api.total_pages(), 2);
        assert_eq!(api.current_page(), 1);
        api.go_to_page(2);

        search_now(&mut api, "product 1");
        assert_eq!(api.current_page(), 2);
        search_now(&mut api, "product 19");
        assert_eq!(api.current_page(), 1);
        assert_eq!(api.screen().match_count, 1);
    }

    #[test]
    fn renaming_out_of_the_filter_clamps_the_page() {
        let mut api = api_with(17);
        search_now(&mut api, "product");
        assert!(api.go_to_page(3));
        assert_eq!(api.total_pages(), 3);

        let last = api.page_window()[0].id;
        api.open_edit(last);
        api.set_field(Field::Name, "Gizmo");
        let result = api.submit_form();

        assert!(!result.has_errors());
        assert_eq!(api.filtered().len(), 16);
        assert_eq!(api.total_pages(), 2);
        assert_eq!(api.current_page(), 2);
        assert_eq!(api.current_page, 2);
        assert_eq!(api.effective_search(), "product");
    }

    #[test]
    fn debounced_typing_is_one_pass() {
        let mut api = api_with(20);
        let t0 = Instant::now();
        api.type_search("a", t0);
        api.tick(t0 + ms(100));
        api.type_search("ab", t0 + ms(100));
        api.tick(t0 + ms(200));
        api.type_search("abc", t0 + ms(200));
        assert!(api.is_searching());
        assert!(api.screen().searching);

        assert!(!api.tick(t0 + ms(699)));
        assert!(api.tick(t0 + ms(700)));
        assert_eq!(api.search_passes(), 1);
        assert_eq!(api.effective_search(), "abc");
        assert_eq!(api.filtered().len(), 0);
    }

    #[test]
    fn pausing_between_keystrokes_is_three_passes() {
        let mut api = api_with(20);
        let t0 = Instant::now();
        let mut passes = 0;
        for (i, text) in ["p", "pr", "pro"].into_iter().enumerate() {
            let at = t0 + ms(1000 * i as u64);
            api.type_search(text, at);
            if api.tick(at + ms(500)) {
                passes += 1;
            }
        }
        assert_eq!(passes, 3);
        assert_eq!(api.search_passes(), 3);
    }

    #[test]
    fn filter_uses_effective_term_only() {
        let mut api = api_with(20);
        api.type_search("product 2", Instant::now());
        assert_eq!(api.filtered().len(), 20);
        api.flush_search();
        assert_eq!(api.filtered().len(), 2);
    }

    #[test]
    fn create_form_inserts_widget() {
        let mut api = api_with(5);
        api.open_create();
        api.set_field(Field::Name, "Widget");
        api.set_field(Field::Price, "19.99");
        api.set_field(Field::Category, "Tools");
        api.set_field(Field::Stock, "");
        api.set_field(Field::Description, "");

        let result = api.submit_form();
        assert!(!result.has_errors());
        assert!(!api.is_form_open());

        let created = &result.affected_products[0];
        assert_eq!(created.name, "Widget");
        assert_eq!(created.price, 19.99);
        assert_eq!(created.category, "Tools");
        assert_eq!(created.stock, 0);
        assert!(created.active);
        assert!(api.products().iter().all(|p| p.id <= created.id));
        assert_eq!(
            api.products().iter().filter(|p| p.id == created.id).count(),
            1
        );
        assert!(created.id > 5);
    }

    #[test]
    fn negative_price_keeps_form_open_and_inserts_nothing() {
        let mut api = api_with(5);
        api.open_create();
        api.set_field(Field::Name, "Widget");
        api.set_field(Field::Price, "-5");
        api.set_field(Field::Category, "Tools");

        let result = api.submit_form();
        assert!(result.has_errors());
        assert_eq!(api.products().len(), 5);

        let form = api.form().unwrap();
        assert_eq!(form.errors().len(), 1);
        assert_eq!(
            form.errors().get(Field::Price),
            Some(FieldError::OutOfRange(Bound::Lower))
        );
    }

    #[test]
    fn edit_changes_only_submitted_fields() {
        let mut api = api_with(5);
        let before = api.products()[2].clone();

        api.open_edit(before.id);
        assert_eq!(api.form().unwrap().fields().name, before.name);
        api.set_field(Field::Price, "250");
        let result = api.submit_form();

        assert!(!result.has_errors());
        let after = api.store().get(before.id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.price, 250.0);
        assert_eq!(after.name, before.name);
        assert_eq!(after.category, before.category);
        assert_eq!(after.stock, before.stock);
        assert_eq!(api.products().len(), 5);
    }

    #[test]
    fn edit_of_unknown_product_warns() {
        let mut api = api_with(2);
        let result = api.open_edit(77);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(!api.is_form_open());
    }

    #[test]
    fn cancel_and_escape_close_without_saving() {
        let mut api = api_with(2);
        api.open_create();
        api.set_field(Field::Name, "Never saved");
        api.cancel_form();
        assert!(!api.is_form_open());

        api.open_edit(1);
        api.set_field(Field::Name, "Renamed");
        api.escape();
        assert!(!api.is_form_open());
        assert_eq!(api.store().get(1).unwrap().name, "Product 1");
        assert_eq!(api.products().len(), 2);
    }

    #[test]
    fn form_cannot_be_opened_twice() {
        let mut api = api_with(2);
        assert!(api.open_create().messages.is_empty());
        let result = api.open_edit(1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(!api.form().unwrap().is_edit());
    }

    #[test]
    fn events_without_a_form_are_harmless() {
        let mut api = api_with(1);
        assert_eq!(api.submit_form().messages.len(), 1);
        assert_eq!(api.escape().messages.len(), 1);
        assert_eq!(api.set_field(Field::Name, "x").messages.len(), 1);
    }

    #[test]
    fn new_product_is_found_by_search() {
        let mut api = api_with(9);
        search_now(&mut api, "widget");
        assert_eq!(api.screen().match_count, 0);

        api.open_create();
        api.set_field(Field::Name, "Blue Widget");
        api.set_field(Field::Price, "10");
        api.set_field(Field::Category, "Tools");
        api.submit_form();

        let screen = api.screen();
        assert_eq!(screen.match_count, 1);
        assert_eq!(screen.products[0].name, "Blue Widget");
        assert_eq!(screen.total_count, 10);
    }

    #[test]
    fn view_mode_toggles() {
        let mut api = api_with(1);
        assert_eq!(api.view_mode(), ViewMode::Cards);
        assert_eq!(api.toggle_view_mode(), ViewMode::Table);
        api.set_view_mode(ViewMode::Cards);
        assert_eq!(api.screen().view_mode, ViewMode::Cards);
    }

    #[test]
    fn settings_follow_config() {
        let config = ShelfConfig {
            page_size: 5,
            default_view: ViewMode::Table,
            ..ShelfConfig::default()
        };
        let api = ShelfApi::new(
            StoreFixture::new().with_products(11).store,
            SessionSettings::from(&config),
        );
        assert_eq!(api.total_pages(), 3);
        assert_eq!(api.view_mode(), ViewMode::Table);
    }
}
