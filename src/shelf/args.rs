use clap::{Args, Parser, Subcommand};
use shelf::commands::form::Field;
use shelf::model::{ProductId, ViewMode};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("SHELF_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("SHELF_GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("SHELF_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "shelf", bin_name = "shelf", version = get_version())]
#[command(about = "Search, page through, add and edit products from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load products from this JSON file instead of the built-in dataset
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Form fields as command-line flags. Values are validated like typed form input.
#[derive(Args, Debug, Default)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Unit price, greater than 0
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Category
    #[arg(long)]
    pub category: Option<String>,

    /// Units in stock (blank means 0)
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
}

impl ProductFields {
    /// The flags that were given, in form order.
    pub fn into_pairs(self) -> Vec<(Field, String)> {
        [
            (Field::Name, self.name),
            (Field::Price, self.price),
            (Field::Category, self.category),
            (Field::Stock, self.stock),
            (Field::Description, self.description),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products, one page at a time
    #[command(alias = "ls")]
    List {
        /// Only products whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show (out-of-range pages are clamped)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Layout: cards or table
        #[arg(long)]
        view: Option<ViewMode>,
    },

    /// Add a product
    #[command(alias = "a")]
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },

    /// Edit a product; only the given fields change
    #[command(alias = "e")]
    Edit {
        /// Id of the product
        id: ProductId,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Start the interactive shell (the default)
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_price_is_a_value_not_a_flag() {
        let cli = Cli::parse_from(["shelf", "add", "--name", "Widget", "--price", "-5"]);
        match cli.command {
            Some(Commands::Add { fields }) => assert_eq!(fields.price.as_deref(), Some("-5")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn only_given_fields_are_set() {
        let fields = ProductFields {
            price: Some("250".into()),
            description: Some(String::new()),
            ..ProductFields::default()
        };
        assert_eq!(
            fields.into_pairs(),
            vec![
                (Field::Price, "250".to_string()),
                (Field::Description, String::new())
            ]
        );
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::parse_from(["shelf", "--no-color", "ls", "-s", "mouse", "--view", "table"]);
        assert!(cli.no_color);
        match cli.command {
            Some(Commands::List { search, page, view }) => {
                assert_eq!(search.as_deref(), Some("mouse"));
                assert_eq!(page, 1);
                assert_eq!(view, Some(ViewMode::Table));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
