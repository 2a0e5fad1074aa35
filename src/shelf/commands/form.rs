//! # Product Form
//!
//! The add/edit dialog and its validation rules.
//!
//! A form holds five text fields exactly as the user typed them. Nothing is parsed until
//! submission, where every rule runs and every failure is reported together:
//!
//! | field         | rule                                                            |
//! |---------------|-----------------------------------------------------------------|
//! | `name`        | non-empty after trimming                                        |
//! | `price`       | present, a finite number, greater than 0                        |
//! | `category`    | non-empty after trimming                                        |
//! | `stock`       | optional (blank is 0), otherwise a whole number, not negative   |
//! | `description` | free text                                                       |
//!
//! Editing a field clears that field's error only. The other errors stay on screen until
//! the next submission.
//!
//! ## Dialog States
//!
//! ```text
//!            open_create              submit ok / cancel / escape
//!  Closed ───────────────► Open(Create) ─────────────────────────► Closed
//!         ───────────────► Open(Edit)   ─────────────────────────►
//!            open_edit
//! ```
//!
//! Opening while already open is refused. Opening always starts with no errors and the
//! focus on the name field.

use crate::model::{Product, ProductDraft, ProductId};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Price,
    Category,
    Stock,
    Description,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Price,
        Field::Category,
        Field::Stock,
        Field::Description,
    ];

    /// The field that takes focus when the dialog opens.
    pub const PRIMARY: Field = Field::Name;

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Category => "category",
            Field::Stock => "stock",
            Field::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Product Name",
            Field::Price => "Price",
            Field::Category => "Category",
            Field::Stock => "Stock",
            Field::Description => "Description",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::Name | Field::Price | Field::Category)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| format!("Unknown field: {}", s.trim()))
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("is required")]
    RequiredField,
    #[error("must be a valid number")]
    InvalidNumber,
    #[error("must be a whole number")]
    InvalidInteger,
    #[error("is out of range")]
    OutOfRange(Bound),
}

/// Which end of the allowed range a value fell past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// The message shown next to a field.
pub fn field_message(field: Field, error: FieldError) -> String {
    match (field, error) {
        (Field::Name, FieldError::RequiredField) => "Product name is required".to_string(),
        (Field::Price, FieldError::OutOfRange(_)) => "Price must be greater than 0".to_string(),
        (Field::Stock, FieldError::OutOfRange(Bound::Lower)) => {
            "Stock cannot be negative".to_string()
        }
        (Field::Stock, FieldError::OutOfRange(Bound::Upper)) => {
            format!("Stock must be at most {}", u32::MAX)
        }
        (field, error) => format!("{} {}", field.label(), error),
    }
}

/// Validation failures keyed by field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| field_message(field, e))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.iter().map(|(fd, e)| field_message(fd, e)).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Raw field text, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub price: String,
    pub category: String,
    pub stock: String,
    pub description: String,
}

impl FormFields {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            stock: product.stock.to_string(),
            description: product.description.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::Category => &self.category,
            Field::Stock => &self.stock,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Price => self.price = value,
            Field::Category => self.category = value,
            Field::Stock => self.stock = value,
            Field::Description => self.description = value,
        }
    }
}

/// Normalized values of a form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
}

impl ValidatedProduct {
    /// Merges onto a fresh draft, or onto `base` when editing (keeping its flags and tags).
    pub fn into_draft(self, base: Option<&Product>) -> ProductDraft {
        let mut draft = match base {
            Some(product) => ProductDraft::from_product(product),
            None => ProductDraft::new(String::new(), String::new(), 0.0),
        };
        draft.name = self.name;
        draft.category = self.category;
        draft.description = self.description;
        draft.price = self.price;
        draft.stock = self.stock;
        draft
    }
}

pub fn validate(fields: &FormFields) -> Result<ValidatedProduct, FormErrors> {
    let mut errors = FormErrors::new();

    let name = fields.name.trim();
    if name.is_empty() {
        errors.insert(Field::Name, FieldError::RequiredField);
    }

    let price = parse_price(&fields.price)
        .map_err(|e| errors.insert(Field::Price, e))
        .ok();

    let category = fields.category.trim();
    if category.is_empty() {
        errors.insert(Field::Category, FieldError::RequiredField);
    }

    let stock = parse_stock(&fields.stock)
        .map_err(|e| errors.insert(Field::Stock, e))
        .ok();

    match (price, stock) {
        (Some(price), Some(stock)) if errors.is_empty() => Ok(ValidatedProduct {
            name: name.to_string(),
            category: category.to_string(),
            description: fields.description.trim().to_string(),
            price,
            stock,
        }),
        _ => Err(errors),
    }
}

fn parse_price(input: &str) -> Result<f64, FieldError> {
    if input.is_empty() {
        return Err(FieldError::RequiredField);
    }
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| FieldError::InvalidNumber)?;
    if !value.is_finite() {
        return Err(FieldError::InvalidNumber);
    }
    if value <= 0.0 {
        return Err(FieldError::OutOfRange(Bound::Lower));
    }
    Ok(value)
}

fn parse_stock(input: &str) -> Result<u32, FieldError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }

    if let Ok(n) = input.parse::<i64>() {
        return u32::try_from(n).map_err(|_| out_of_stock_range(n < 0));
    }

    // Integral spellings such as "3.0" or "1e3" are whole numbers too
    match input.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => {
            if v < 0.0 || v > u32::MAX as f64 {
                Err(out_of_stock_range(v < 0.0))
            } else {
                Ok(v as u32)
            }
        }
        _ => Err(FieldError::InvalidInteger),
    }
}

fn out_of_stock_range(negative: bool) -> FieldError {
    if negative {
        FieldError::OutOfRange(Bound::Lower)
    } else {
        FieldError::OutOfRange(Bound::Upper)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Product),
}

/// A validated submission, ready to be committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// The product being edited, `None` for a new product.
    pub target: Option<ProductId>,
    pub draft: ProductDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    mode: FormMode,
    fields: FormFields,
    errors: FormErrors,
    focus: Field,
}

impl ProductForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: FormFields::default(),
            errors: FormErrors::new(),
            focus: Field::PRIMARY,
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.clone()),
            fields: FormFields::from_product(product),
            errors: FormErrors::new(),
            focus: Field::PRIMARY,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Product"
        } else {
            "Add Product"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Product"
        } else {
            "Add Product"
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_field(&mut self, field: Field) {
        self.focus = field;
    }

    /// Updates one field and clears only that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
        self.errors.remove(field);
        self.focus = field;
    }

    /// Runs every rule. Failures are kept on the form and returned.
    pub fn submit(&mut self) -> Result<Submission, FormErrors> {
        match validate(&self.fields) {
            Ok(valid) => {
                self.errors.clear();
                let (target, base) = match &self.mode {
                    FormMode::Create => (None, None),
                    FormMode::Edit(product) => (Some(product.id), Some(product)),
                };
                Ok(Submission {
                    target,
                    draft: valid.into_draft(base),
                })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormDialog {
    #[default]
    Closed,
    Open(ProductForm),
}

impl FormDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, FormDialog::Open(_))
    }

    pub fn form(&self) -> Option<&ProductForm> {
        match self {
            FormDialog::Open(form) => Some(form),
            FormDialog::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ProductForm> {
        match self {
            FormDialog::Open(form) => Some(form),
            FormDialog::Closed => None,
        }
    }

    /// Closed → Open(Create). Returns false if a form is already open.
    pub fn open_create(&mut self) -> bool {
        self.open(ProductForm::create())
    }

    /// Closed → Open(Edit), prefilled from `product`.
    pub fn open_edit(&mut self, product: &Product) -> bool {
        self.open(ProductForm::edit(product))
    }

    fn open(&mut self, form: ProductForm) -> bool {
        if self.is_open() {
            return false;
        }
        *self = FormDialog::Open(form);
        true
    }

    /// Open → Closed. Returns false if nothing was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = FormDialog::Closed;
        was_open
    }
}
