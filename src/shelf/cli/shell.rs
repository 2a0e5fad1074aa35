//! # Interactive Shell
//!
//! A line-oriented front end for one [`ShelfApi`] session. Each line is one UI event
//! (a search, a page click, a form edit) and each event is followed by a fresh frame.
//!
//! Search text goes through the debounce like keystrokes would: the shell waits out the
//! quiescent window, then lets the term take effect and redraws once.

use super::render::Renderer;
use shelf::api::ShelfApi;
use shelf::commands::form::Field;
use shelf::commands::{CmdMessage, CmdResult};
use shelf::error::Result;
use shelf::model::{ProductId, ViewMode};
use shelf::store::ProductStore;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::thread;
use std::time::Instant;

const PROMPT: &str = "shelf> ";

pub const HELP: &[(&str, &str)] = &[
    ("search <text>", "Filter products by name, after a short pause"),
    ("clear", "Clear the search"),
    ("next, prev", "Move one page forward or back"),
    ("page <n>", "Jump to a page"),
    ("view [cards|table]", "Switch the layout, or toggle it"),
    ("add", "Open the form for a new product"),
    ("edit <id>", "Open the form for an existing product"),
    ("set <field> <value>", "Fill a form field (name, price, category, stock, description)"),
    ("submit", "Validate and save the open form"),
    ("cancel, esc", "Close the form without saving"),
    ("help", "Show this list"),
    ("quit", "Leave the shell"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Clear,
    Next,
    Prev,
    Page(i64),
    View(Option<ViewMode>),
    Add,
    Edit(ProductId),
    Set(Field, String),
    Submit,
    Cancel,
    Escape,
    Help,
    Quit,
    Empty,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "" => Ok(ShellCommand::Empty),
            "search" | "s" | "/" => Ok(ShellCommand::Search(rest.to_string())),
            "clear" => Ok(ShellCommand::Clear),
            "next" | "n" => Ok(ShellCommand::Next),
            "prev" | "p" => Ok(ShellCommand::Prev),
            "page" => rest
                .parse()
                .map(ShellCommand::Page)
                .map_err(|_| format!("Not a page number: {}", rest)),
            "view" | "v" if rest.is_empty() => Ok(ShellCommand::View(None)),
            "view" | "v" => rest.parse().map(|mode| ShellCommand::View(Some(mode))),
            "add" | "a" => Ok(ShellCommand::Add),
            "edit" | "e" => rest
                .parse()
                .map(ShellCommand::Edit)
                .map_err(|_| format!("Not a product id: {}", rest)),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(ShellCommand::Set(field.parse()?, value.trim().to_string()))
            }
            "submit" => Ok(ShellCommand::Submit),
            "cancel" => Ok(ShellCommand::Cancel),
            "esc" | "escape" => Ok(ShellCommand::Escape),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            _ => Err(format!(
                "Unknown command: {}. Type help for a list of commands.",
                word
            )),
        }
    }
}

/// Runs the session until `quit` or end of input.
pub fn run<S, R, W>(
    api: &mut ShelfApi<S>,
    renderer: &Renderer,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    S: ProductStore,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", renderer.render_screen(&api.screen()))?;

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                write!(
                    out,
                    "{}",
                    renderer.render_messages(&[CmdMessage::warning(message)])
                )?;
                continue;
            }
        };
        tracing::debug!(?command, "shell command");

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Empty => continue,
            ShellCommand::Help => write!(out, "{}", renderer.render_help(HELP))?,
            command => {
                let result = apply(api, command);
                write!(out, "{}", renderer.render_messages(&result.messages))?;
                write!(out, "\n{}", renderer.render_screen(&api.screen()))?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Feeds one command into the session.
pub fn apply<S: ProductStore>(api: &mut ShelfApi<S>, command: ShellCommand) -> CmdResult {
    match command {
        ShellCommand::Search(text) => {
            api.type_search(text, Instant::now());
            settle_search(api);
            CmdResult::default()
        }
        ShellCommand::Clear => {
            api.type_search("", Instant::now());
            api.flush_search();
            CmdResult::default()
        }
        ShellCommand::Next => {
            if api.next_page() {
                CmdResult::default()
            } else {
                CmdResult::default().with_message(CmdMessage::info("Already on the last page"))
            }
        }
        ShellCommand::Prev => {
            if api.prev_page() {
                CmdResult::default()
            } else {
                CmdResult::default().with_message(CmdMessage::info("Already on the first page"))
            }
        }
        ShellCommand::Page(n) => {
            api.go_to_page(n);
            CmdResult::default()
        }
        ShellCommand::View(Some(mode)) => {
            api.set_view_mode(mode);
            CmdResult::default()
        }
        ShellCommand::View(None) => {
            api.toggle_view_mode();
            CmdResult::default()
        }
        ShellCommand::Add => api.open_create(),
        ShellCommand::Edit(id) => api.open_edit(id),
        ShellCommand::Set(field, value) => api.set_field(field, value),
        ShellCommand::Submit => api.submit_form(),
        ShellCommand::Cancel => api.cancel_form(),
        ShellCommand::Escape => api.escape(),
        ShellCommand::Help | ShellCommand::Quit | ShellCommand::Empty => CmdResult::default(),
    }
}

/// Sleeps through the quiescent window so the typed term takes effect.
fn settle_search<S: ProductStore>(api: &mut ShelfApi<S>) {
    while let Some(wait) = api.search_remaining(Instant::now()) {
        thread::sleep(wait);
        api.tick(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf::api::SessionSettings;
    use shelf::model::ProductDraft;
    use shelf::store::memory::InMemoryStore;
    use std::io::Cursor;
    use std::time::Duration;

    fn session(count: usize) -> ShelfApi<InMemoryStore> {
        let mut store = InMemoryStore::new();
        for i in 1..=count {
            store.insert(ProductDraft::new(format!("Item {}", i), "General", 10.0));
        }
        ShelfApi::new(
            store,
            SessionSettings {
                search_debounce: Duration::from_millis(5),
                ..SessionSettings::default()
            },
        )
    }

    fn drive(api: &mut ShelfApi<InMemoryStore>, script: &str) -> String {
        let renderer = Renderer::new(false, "₹").unwrap();
        let mut out = Vec::new();
        run(api, &renderer, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn parse(line: &str) -> std::result::Result<ShellCommand, String> {
        line.parse()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse("search  wireless mouse "),
            Ok(ShellCommand::Search("wireless mouse".into()))
        );
        assert_eq!(parse("page 3"), Ok(ShellCommand::Page(3)));
        assert_eq!(parse("page -1"), Ok(ShellCommand::Page(-1)));
        assert_eq!(parse("view"), Ok(ShellCommand::View(None)));
        assert_eq!(
            parse("view table"),
            Ok(ShellCommand::View(Some(ViewMode::Table)))
        );
        assert_eq!(parse("edit 7"), Ok(ShellCommand::Edit(7)));
        assert_eq!(
            parse("set price 19.99"),
            Ok(ShellCommand::Set(Field::Price, "19.99".into()))
        );
        assert_eq!(
            parse("set description Fits most desks"),
            Ok(ShellCommand::Set(Field::Description, "Fits most desks".into()))
        );
        assert_eq!(
            parse("set stock"),
            Ok(ShellCommand::Set(Field::Stock, String::new()))
        );
        assert_eq!(parse("ESC"), Ok(ShellCommand::Escape));
        assert_eq!(parse("   "), Ok(ShellCommand::Empty));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("page two").is_err());
        assert!(parse("edit x").is_err());
        assert!(parse("set colour red").is_err());
        assert!(parse("view grid-ish").is_err());
        assert!(parse("dance").is_err());
    }

    #[test]
    fn search_waits_for_the_window_then_filters() {
        let mut api = session(12);
        apply(&mut api, ShellCommand::Search("item 1".into()));
        assert_eq!(api.effective_search(), "item 1");
        assert!(!api.is_searching());
        assert_eq!(api.filtered().len(), 4);
        assert_eq!(api.search_passes(), 1);
    }

    #[test]
    fn paging_past_the_ends_is_reported() {
        let mut api = session(3);
        let result = apply(&mut api, ShellCommand::Next);
        assert_eq!(result.messages[0].content, "Already on the last page");
        let result = apply(&mut api, ShellCommand::Prev);
        assert_eq!(result.messages[0].content, "Already on the first page");
    }

    #[test]
    fn scripted_session_adds_a_product() {
        let mut api = session(2);
        let output = drive(
            &mut api,
            "add\nset name Widget\nset price 19.99\nset category Tools\nsubmit\nquit\n",
        );
        assert!(output.contains("Product added (#3): Widget"));
        assert_eq!(api.products()[0].name, "Widget");
        assert!(!api.is_form_open());
    }

    #[test]
    fn invalid_submit_keeps_the_form_on_screen() {
        let mut api = session(2);
        let output = drive(&mut api, "add\nset price -5\nsubmit\n");
        assert!(output.contains("Price must be greater than 0"));
        assert!(output.contains("Product name is required"));
        assert!(api.is_form_open());
        assert_eq!(api.products().len(), 2);
    }

    #[test]
    fn unknown_commands_warn_and_continue() {
        let mut api = session(1);
        let output = drive(&mut api, "dance\nview table\n");
        assert!(output.contains("Unknown command: dance"));
        assert_eq!(api.view_mode(), ViewMode::Table);
    }

    #[test]
    fn quit_stops_reading() {
        let mut api = session(20);
        drive(&mut api, "quit\nnext\n");
        assert_eq!(api.current_page(), 1);
    }

    #[test]
    fn help_lists_commands() {
        let mut api = session(1);
        let output = drive(&mut api, "help\n");
        for (usage, _) in HELP {
            assert!(output.contains(usage));
        }
    }
}
