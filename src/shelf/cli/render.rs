//! # Rendering
//!
//! Turns a [`Screen`] snapshot (and command messages) into terminal text.
//!
//! Layout math stays in Rust because it needs Unicode-aware widths: truncation, column
//! widths, the gap that right-aligns a card's price. Templates only decide what goes on
//! which line and which semantic style each piece gets.

use super::styles::{names, stock_style, SHELF_THEME};
use super::templates;
use chrono::{DateTime, Utc};
use minijinja::{Environment, Value};
use serde::Serialize;
use shelf::api::Screen;
use shelf::commands::form::{Field, ProductForm};
use shelf::commands::paginate::PageItem;
use shelf::commands::{CmdMessage, MessageLevel};
use shelf::model::{Product, ProductId, ViewMode};
use shelf::price::format_price;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const CARD_WIDTH: usize = 72;
const NAME_COLUMN_MAX: usize = 28;
const CATEGORY_COLUMN_MAX: usize = 16;
const DESCRIPTION_COLUMN_MAX: usize = 40;
const FORM_LABEL_WIDTH: usize = 16;
const TABLE_HEADERS: [&str; 6] = ["ID", "Name", "Price", "Category", "Stock", "Description"];

#[derive(Serialize)]
struct ScreenData {
    summary: Option<SummaryData>,
    empty: bool,
    view: &'static str,
    cards: Vec<CardData>,
    header: String,
    rows: Vec<RowData>,
    pagination: Option<PaginationData>,
    form: Option<FormData>,
}

#[derive(Serialize)]
struct SummaryData {
    text: String,
    searching: bool,
}

#[derive(Serialize)]
struct CardData {
    id: String,
    name: String,
    gap: String,
    price: String,
    indent: String,
    category: String,
    stock: String,
    stock_style: &'static str,
    age: String,
    description: String,
}

/// Table cells, already truncated and padded to their column width.
#[derive(Serialize)]
struct RowData {
    id: String,
    name: String,
    price: String,
    category: String,
    stock: String,
    stock_style: &'static str,
    description: String,
}

#[derive(Serialize)]
struct PageLink {
    label: String,
    style: &'static str,
}

#[derive(Serialize)]
struct PaginationData {
    prev: PageLink,
    items: Vec<PageLink>,
    next: PageLink,
    status: String,
}

#[derive(Serialize)]
struct FormData {
    title: &'static str,
    fields: Vec<FieldData>,
    hint: String,
}

#[derive(Serialize)]
struct FormView {
    form: FormData,
}

#[derive(Serialize)]
struct FieldData {
    marker: &'static str,
    label: String,
    label_style: &'static str,
    gap: String,
    value: String,
    value_style: &'static str,
    indent: String,
    error: Option<String>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct HelpEntry {
    usage: String,
    gap: String,
    about: String,
}

#[derive(Serialize)]
struct HelpData {
    commands: Vec<HelpEntry>,
}

/// Template environment with the `style` filter bound to the shelf theme.
pub struct Renderer {
    env: Environment<'static>,
    currency_symbol: String,
}

impl Renderer {
    pub fn new(
        use_color: bool,
        currency_symbol: impl Into<String>,
    ) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            SHELF_THEME.apply(&name, &value.to_string(), use_color)
        });
        for (name, source) in templates::ALL {
            env.add_template(name, source)?;
        }

        Ok(Self {
            env,
            currency_symbol: currency_symbol.into(),
        })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> String {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(data))
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    /// One full frame: search summary, products, page selector and the open form.
    pub fn render_screen(&self, screen: &Screen) -> String {
        let summary = (!screen.search_input.is_empty()).then(|| SummaryData {
            text: found_summary(screen.match_count),
            searching: screen.searching,
        });

        let (view, cards, header, rows) = match screen.view_mode {
            ViewMode::Cards => ("cards", self.cards(&screen.products), String::new(), vec![]),
            ViewMode::Table => {
                let (header, rows) = self.table(&screen.products);
                ("table", vec![], header, rows)
            }
        };

        let data = ScreenData {
            summary,
            empty: screen.products.is_empty(),
            view,
            cards,
            header,
            rows,
            pagination: screen.show_pagination().then(|| pagination(screen)),
            form: screen.form.as_ref().map(form_data),
        };
        self.render("screen.tmp", &data)
    }

    /// The form on its own, with any inline errors.
    pub fn render_form(&self, form: &ProductForm) -> String {
        self.render(
            "form.tmp",
            &FormView {
                form: form_data(form),
            },
        )
    }

    pub fn render_messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let data = MessagesData {
            messages: messages
                .iter()
                .map(|msg| MessageData {
                    content: msg.content.clone(),
                    style: match msg.level {
                        MessageLevel::Info => names::INFO,
                        MessageLevel::Success => names::SUCCESS,
                        MessageLevel::Warning => names::WARNING,
                        MessageLevel::Error => names::ERROR,
                    },
                })
                .collect(),
        };
        self.render("messages.tmp", &data)
    }

    /// A two-column command reference.
    pub fn render_help(&self, entries: &[(&str, &str)]) -> String {
        let width = entries.iter().map(|(usage, _)| usage.width()).max().unwrap_or(0) + 3;
        let commands = entries
            .iter()
            .map(|(usage, about)| HelpEntry {
                usage: usage.to_string(),
                gap: " ".repeat(width - usage.width()),
                about: about.to_string(),
            })
            .collect();
        self.render("help.tmp", &HelpData { commands })
    }

    fn cards(&self, products: &[Product]) -> Vec<CardData> {
        let id_width = products
            .iter()
            .map(|p| id_label(p.id).width())
            .max()
            .unwrap_or(0);
        let indent = " ".repeat(id_width + 1);

        products
            .iter()
            .map(|p| {
                let price = format_price(p.price, &self.currency_symbol);
                let name_room = CARD_WIDTH.saturating_sub(id_width + 1 + price.width() + 2);
                let name = truncate_to_width(display_name(p), name_room);
                let gap = CARD_WIDTH
                    .saturating_sub(id_width + 1 + name.width() + price.width())
                    .max(2);

                CardData {
                    id: pad_to_width(&id_label(p.id), id_width),
                    name,
                    gap: " ".repeat(gap),
                    price,
                    indent: indent.clone(),
                    category: display_category(p).to_string(),
                    stock: format!("Stock: {}", p.stock),
                    stock_style: stock_style(p.stock_level()),
                    age: format!("added {}", format_age(p.created_at)),
                    description: truncate_to_width(
                        &single_line(&p.description),
                        CARD_WIDTH.saturating_sub(indent.width()),
                    ),
                }
            })
            .collect()
    }

    fn table(&self, products: &[Product]) -> (String, Vec<RowData>) {
        let cells: Vec<[String; 6]> = products
            .iter()
            .map(|p| {
                [
                    p.id.to_string(),
                    truncate_to_width(display_name(p), NAME_COLUMN_MAX),
                    format_price(p.price, &self.currency_symbol),
                    truncate_to_width(display_category(p), CATEGORY_COLUMN_MAX),
                    p.stock.to_string(),
                    truncate_to_width(&single_line(&p.description), DESCRIPTION_COLUMN_MAX),
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(|h| h.width());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        // The last column is never padded so rows carry no trailing blanks
        let last = TABLE_HEADERS.len() - 1;
        let header = TABLE_HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == last {
                    h.to_string()
                } else {
                    pad_to_width(h, widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        let rows = cells
            .into_iter()
            .zip(products)
            .map(|([id, name, price, category, stock, description], p)| RowData {
                id: pad_to_width(&id, widths[0]),
                name: pad_to_width(&name, widths[1]),
                price: pad_to_width(&price, widths[2]),
                category: pad_to_width(&category, widths[3]),
                stock: pad_to_width(&stock, widths[4]),
                stock_style: stock_style(p.stock_level()),
                description,
            })
            .collect();

        (header, rows)
    }
}

fn pagination(screen: &Screen) -> PaginationData {
    let current = screen.current_page;
    let link = |label: &str, enabled: bool| PageLink {
        label: label.to_string(),
        style: if enabled { names::PAGE } else { names::FAINT },
    };

    let items = screen
        .page_items
        .iter()
        .map(|item| match *item {
            PageItem::Page(n) if n == current => PageLink {
                label: format!("[{}]", n),
                style: names::PAGE_CURRENT,
            },
            PageItem::Page(n) => PageLink {
                label: n.to_string(),
                style: names::PAGE,
            },
            PageItem::Ellipsis => PageLink {
                label: "…".to_string(),
                style: names::FAINT,
            },
        })
        .collect();

    PaginationData {
        prev: link("‹ Prev", current > 1),
        items,
        next: link("Next ›", current < screen.total_pages),
        status: format!("Page {} of {}", current, screen.total_pages),
    }
}

fn form_data(form: &ProductForm) -> FormData {
    let indent = " ".repeat(2 + FORM_LABEL_WIDTH);
    let fields = Field::ALL
        .into_iter()
        .map(|field| {
            let focused = form.focus() == field;
            let label = if field.is_required() {
                format!("{} *", field.label())
            } else {
                field.label().to_string()
            };
            let raw = form.fields().get(field);
            let (value, value_style) = if raw.is_empty() {
                (placeholder(field).to_string(), names::FAINT)
            } else {
                (raw.to_string(), names::VALUE)
            };

            FieldData {
                marker: if focused { "> " } else { "  " },
                gap: " ".repeat(FORM_LABEL_WIDTH.saturating_sub(label.width())),
                label,
                label_style: if focused { names::FOCUS } else { names::LABEL },
                value,
                value_style,
                indent: indent.clone(),
                error: form.errors().message(field),
            }
        })
        .collect();

    FormData {
        title: form.title(),
        fields,
        hint: format!(
            "set <field> <value> to edit, submit to {}, cancel or esc to close",
            form.submit_label().to_lowercase()
        ),
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "Enter product name",
        Field::Price => "Enter price",
        Field::Category => "Enter category",
        Field::Stock => "Enter stock quantity (optional)",
        Field::Description => "Enter product description",
    }
}

pub fn found_summary(count: usize) -> String {
    format!("Found {} product{}", count, if count == 1 { "" } else { "s" })
}

fn id_label(id: ProductId) -> String {
    format!("#{}", id)
}

fn display_name(product: &Product) -> &str {
    if product.name.trim().is_empty() {
        "Untitled"
    } else {
        &product.name
    }
}

fn display_category(product: &Product) -> &str {
    if product.category.trim().is_empty() {
        "-"
    } else {
        &product.category
    }
}

fn single_line(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

/// Cuts `s` to at most `max_width` columns, marking the cut with an ellipsis.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let limit = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

fn format_age(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
