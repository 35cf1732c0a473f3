use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for ManeTracker
/// CLI application to keep a personal haircut log in SQLite
#[derive(Parser)]
#[command(
    name = "manetracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal haircut log: styles, barbers, ratings, costs and photos, stored locally",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Log in (stores the configured identity as the session marker)
    Login,

    /// Log out (clears the session marker)
    Logout,

    /// Show who is logged in
    Whoami,

    /// Log a new haircut
    Add {
        /// Date of the haircut (YYYY-MM-DD, `today` or `yesterday`)
        date: String,

        /// Style name, e.g. "High Fade"
        style: String,

        #[command(flatten)]
        details: RecordArgs,
    },

    /// Replace every field of an existing haircut
    Edit {
        /// Id of the haircut to replace
        id: String,

        /// Date of the haircut (YYYY-MM-DD, `today` or `yesterday`)
        date: String,

        /// Style name
        style: String,

        #[command(flatten)]
        details: RecordArgs,

        #[arg(
            long = "keep-images",
            help = "Start from the haircut's current images instead of an empty list"
        )]
        keep_images: bool,
    },

    /// Delete a haircut by id
    Del {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List haircuts, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long = "details", help = "Print every field instead of a table")]
        details: bool,
    },

    /// Show one haircut in detail
    Show { id: String },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

/// Optional fields shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    #[arg(long, help = "Free-form notes")]
    pub notes: Option<String>,

    #[arg(long, help = "Barber's name")]
    pub barber: Option<String>,

    #[arg(long, help = "Barbershop name")]
    pub barbershop: Option<String>,

    #[arg(long, help = "Rating from 0 to 10, one decimal at most (e.g. 8.5)")]
    pub rating: Option<String>,

    #[arg(long, allow_negative_numbers = true, help = "Amount paid (e.g. 45.00)")]
    pub cost: Option<String>,

    #[arg(
        long,
        requires = "cost",
        help = "Currency code for --cost (CAD, USD, EUR, GBP, JPY, ...)"
    )]
    pub currency: Option<String>,

    #[arg(long, requires_all = ["lat", "lng"], help = "Address of the barbershop")]
    pub address: Option<String>,

    #[arg(long, requires = "address", allow_negative_numbers = true, help = "Latitude")]
    pub lat: Option<f64>,

    #[arg(long, requires = "address", allow_negative_numbers = true, help = "Longitude")]
    pub lng: Option<f64>,

    #[arg(
        long = "image",
        value_name = "FILE",
        help = "Attach a photo (repeatable, 5 photos at most)"
    )]
    pub images: Vec<PathBuf>,
}

/// Filters for `list`; every flag is optional.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, short = 'k', help = "Search style, barber, barbershop and notes")]
    pub keyword: Option<String>,

    #[arg(long = "from", value_name = "DATE", help = "Only haircuts on or after DATE")]
    pub from: Option<String>,

    #[arg(long = "to", value_name = "DATE", help = "Only haircuts on or before DATE")]
    pub to: Option<String>,

    #[arg(long = "min-rating")]
    pub min_rating: Option<f64>,

    #[arg(long = "max-rating")]
    pub max_rating: Option<f64>,

    #[arg(long = "min-cost")]
    pub min_cost: Option<f64>,

    #[arg(long = "max-cost")]
    pub max_cost: Option<f64>,
}
