use clap::Parser;
use directories::ProjectDirs;
use shelf::api::{SessionSettings, ShelfApi};
use shelf::config::ShelfConfig;
use shelf::error::{Result, ShelfError};
use shelf::model::{ProductId, ViewMode};
use shelf::seed;
use shelf::store::memory::InMemoryStore;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{Cli, Commands, ProductFields};
use cli::render::Renderer;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ShelfApi<InMemoryStore>,
    renderer: Renderer,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { search, page, view }) => handle_list(&mut ctx, search, page, view),
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields),
        Some(Commands::Edit { id, fields }) => handle_edit(&mut ctx, id, fields),
        Some(Commands::Shell) | None => handle_shell(&mut ctx),
    }
}

/// Diagnostics go to stderr so they never mix with rendered output.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "shelf=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn config_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("SHELF_HOME") {
        return Some(PathBuf::from(home));
    }
    ProjectDirs::from("com", "shelf", "shelf").map(|dirs| dirs.config_dir().to_path_buf())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = match config_dir() {
        Some(dir) => ShelfConfig::load(&dir).unwrap_or_else(|e| {
            tracing::warn!(dir = %dir.display(), error = %e, "ignoring unreadable config");
            ShelfConfig::default()
        }),
        None => ShelfConfig::default(),
    };

    let products = match &cli.data {
        Some(path) => seed::load_path(path)?,
        None => seed::load_embedded()?,
    };

    let use_color = !cli.no_color && console::Term::stdout().features().colors_supported();
    let renderer = Renderer::new(use_color, config.currency_symbol.clone())
        .map_err(|e| ShelfError::Api(format!("Template error: {}", e)))?;

    let api = ShelfApi::new(
        InMemoryStore::with_products(products),
        SessionSettings::from(&config),
    );

    Ok(AppContext { api, renderer })
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    page: i64,
    view: Option<ViewMode>,
) -> Result<()> {
    if let Some(mode) = view {
        ctx.api.set_view_mode(mode);
    }
    if let Some(term) = search {
        ctx.api.type_search(term, Instant::now());
        ctx.api.flush_search();
    }
    ctx.api.go_to_page(page);

    print!("{}", ctx.renderer.render_screen(&ctx.api.screen()));
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: ProductFields) -> Result<()> {
    ctx.api.open_create();
    fill_and_submit(ctx, fields)
}

fn handle_edit(ctx: &mut AppContext, id: ProductId, fields: ProductFields) -> Result<()> {
    let opened = ctx.api.open_edit(id);
    if !ctx.api.is_form_open() {
        let reason = opened
            .messages
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_else(|| format!("Cannot edit product {}", id));
        return Err(ShelfError::Api(reason));
    }
    fill_and_submit(ctx, fields)
}

/// Types the given flags into the open form and submits it.
///
/// A rejected form is printed with its inline errors and turned into an error exit.
fn fill_and_submit(ctx: &mut AppContext, fields: ProductFields) -> Result<()> {
    for (field, value) in fields.into_pairs() {
        ctx.api.set_field(field, value);
    }

    let result = ctx.api.submit_form();
    if let Some(form) = ctx.api.form() {
        print!("{}", ctx.renderer.render_form(form));
        return Err(ShelfError::Invalid(form.errors().clone()));
    }

    print!("{}", ctx.renderer.render_messages(&result.messages));
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    cli::shell::run(&mut ctx.api, &ctx.renderer, stdin.lock(), &mut stdout)
}
