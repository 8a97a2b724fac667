use clap::{Parser, Subcommand};

/// Command-line interface definition for geoattend
#[derive(Parser)]
#[command(
    name = "geoattend",
    version = env!("CARGO_PKG_VERSION"),
    about = "Geofenced attendance: check in/out at registered sites and review attendance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Authenticated user id, as handed over by the identity provider
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend the current time is this epoch-millis instant
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<i64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Request metadata normally taken from HTTP headers.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct MetaArgs {
    #[arg(long = "user-agent", help = "User-Agent of the client")]
    pub user_agent: Option<String>,

    #[arg(long = "forwarded-for", help = "X-Forwarded-For header value")]
    pub forwarded_for: Option<String>,

    #[arg(long = "real-ip", help = "X-Real-IP header value")]
    pub real_ip: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or validate the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Validate the configuration values")]
        check: bool,
    },

    /// Check in or out at the current position
    Attend {
        #[arg(long = "x", help = "Longitude", allow_hyphen_values = true)]
        x: String,

        #[arg(long = "y", help = "Latitude", allow_hyphen_values = true)]
        y: String,

        #[command(flatten)]
        meta: MetaArgs,
    },

    /// Record a check-in/check-out pair for a user (administrators only)
    Ack {
        /// Target user id
        uid: String,

        #[arg(long = "date", help = "Day of the pair (YYYY-MM-DD)")]
        date: String,

        #[arg(long = "in", help = "Check-in time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "Check-out time (HH:MM)")]
        end: String,

        #[arg(long = "notes")]
        notes: Option<String>,

        #[arg(long = "x", allow_hyphen_values = true, requires = "y")]
        x: Option<String>,

        #[arg(long = "y", allow_hyphen_values = true, requires = "x")]
        y: Option<String>,

        #[command(flatten)]
        meta: MetaArgs,
    },

    /// List attendance events, newest first
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range (A:B)")]
        period: Option<String>,

        #[arg(long = "uid", help = "Whose events to list (default: yourself)")]
        uid: Option<String>,

        #[arg(
            long = "all",
            help = "List every user's events (administrators only)",
            conflicts_with = "uid"
        )]
        all: bool,

        #[arg(long = "json", help = "Print events as JSON")]
        json: bool,
    },

    /// Show whether you have checked in/out today
    Status {
        #[arg(long = "json")]
        json: bool,
    },

    /// Show a month calendar of attendance
    Calendar {
        #[arg(long = "month", help = "Month to show (YYYY-MM, default: current)")]
        month: Option<String>,

        #[arg(long = "uid", help = "Whose calendar to show (default: yourself)")]
        uid: Option<String>,
    },

    /// Delete an attendance event by id (administrators only)
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Manage check-in sites
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum SiteAction {
    /// List registered sites
    List {
        #[arg(long = "json")]
        json: bool,
    },

    /// Register a site (administrators only)
    Add {
        #[arg(long = "road", help = "Road address")]
        road_address: String,

        #[arg(long = "x", help = "Longitude", allow_hyphen_values = true)]
        x: String,

        #[arg(long = "y", help = "Latitude", allow_hyphen_values = true)]
        y: String,

        #[arg(long = "jibun", help = "Lot-number address")]
        jibun_address: Option<String>,

        #[arg(long = "english", help = "English address")]
        english_address: Option<String>,
    },

    /// Delete a site (administrators only)
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Sign-in callback: create the user on first sign-in, print its id
    Register {
        #[arg(long = "provider", default_value = "google")]
        provider: String,

        #[arg(long = "account-id", help = "Provider subject identifier")]
        account_id: String,

        #[arg(long = "name")]
        name: String,

        #[arg(long = "email")]
        email: String,

        #[arg(long = "email-verified")]
        email_verified: bool,

        #[arg(long = "picture")]
        picture: Option<String>,
    },

    /// Show a user (default: yourself)
    Show {
        id: Option<String>,

        #[arg(long = "json")]
        json: bool,
    },

    /// List all users (administrators only)
    List {
        #[arg(long = "json")]
        json: bool,
    },

    /// Change a user's display name
    Rename { id: String, name: String },

    /// Toggle a user's disabled flag (administrators only)
    Disable { id: String },

    /// Grant or revoke administrator rights (administrators only)
    Admin {
        id: String,

        #[arg(long = "revoke")]
        revoke: bool,
    },
}
