use crate::debounce::Debouncer;
use crate::model::Product;
use std::time::{Duration, Instant};

/// Products whose name contains `term`, ignoring case, in their original order.
///
/// An empty or whitespace-only term matches everything.
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    if term.trim().is_empty() {
        return products.iter().collect();
    }

    let term_lower = term.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&term_lower))
        .collect()
}

/// The effective term changed hands after the quiescent window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommit {
    pub term: String,
    /// False when the committed term equals the previous effective term.
    pub changed: bool,
}

/// Raw search input plus its debounced, effective counterpart.
#[derive(Debug, Clone)]
pub struct SearchBox {
    input: String,
    effective: String,
    debouncer: Debouncer<String>,
    passes: usize,
}

impl SearchBox {
    pub fn new(quiet: Duration) -> Self {
        Self {
            input: String::new(),
            effective: String::new(),
            debouncer: Debouncer::new(quiet),
            passes: 0,
        }
    }

    /// Records a keystroke. The effective term is untouched until the window elapses.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.debouncer.push(self.input.clone(), now);
    }

    pub fn tick(&mut self, now: Instant) -> Option<SearchCommit> {
        let term = self.debouncer.poll(now)?;
        Some(self.commit(term))
    }

    /// Commits pending input without waiting.
    pub fn flush(&mut self) -> Option<SearchCommit> {
        let term = self.debouncer.flush()?;
        Some(self.commit(term))
    }

    fn commit(&mut self, term: String) -> SearchCommit {
        self.passes += 1;
        let changed = term != self.effective;
        tracing::debug!(term = %term, changed, pass = self.passes, "search term committed");
        self.effective = term.clone();
        SearchCommit { term, changed }
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn effective(&self) -> &str {
        &self.effective
    }

    /// True while typed text has not yet become the effective term.
    pub fn is_searching(&self) -> bool {
        self.input != self.effective
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Number of effective filter passes so far.
    pub fn passes(&self) -> usize {
        self.passes
    }
}
