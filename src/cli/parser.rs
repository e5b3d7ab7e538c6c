use crate::core::filter::StatusFilter;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for ShiftTrack
/// CLI client for a webhook-backed shift attendance service
#[derive(Parser)]
#[command(
    name = "shifttrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Shift attendance client: clock in/out, review reports and manage users through a webhook gateway",
    long_about = None
)]
pub struct Cli {
    /// Override session database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the webhook base URL from the configuration
    #[arg(global = true, long = "webhook-base", value_name = "URL")]
    pub webhook_base: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Verbose diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Report filters shared by `reports` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, short, help = "Case-insensitive match on the employee name")]
    pub search: Option<String>,

    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,

    #[arg(long, value_name = "YYYY-MM-DD", help = "First day to include")]
    pub from: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Last day to include")]
    pub to: Option<String>,

    #[arg(
        long,
        conflicts_with_all = ["from", "to"],
        help = "Year, month, day or a custom range (e.g. 2025-06:2025-08)"
    )]
    pub range: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the session database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// List the webhook endpoints in use
    Endpoints,

    /// Create an account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Read from SHIFTTRACK_PASSWORD or prompted when omitted
        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Log in and remember the user locally
    Login {
        #[arg(long)]
        email: String,

        /// Read from SHIFTTRACK_PASSWORD or prompted when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the local session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Fetch the full profile of the logged-in user
    Profile,

    /// Clock in
    Start {
        #[arg(long, short, help = "Comment attached to the shift start")]
        comment: Option<String>,

        #[arg(long, value_name = "LAT,LNG", help = "Position to record")]
        at: Option<String>,
    },

    /// Clock out
    End {
        #[arg(long, short, help = "Comment attached to the shift end")]
        comment: Option<String>,

        #[arg(long, value_name = "LAT,LNG", help = "Position to record")]
        at: Option<String>,
    },

    /// Show the shift in progress, if any
    Status,

    /// List every employee's shifts (admin)
    Reports {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Show comments and map links for each shift")]
        details: bool,
    },

    /// Export the filtered report to a file (admin)
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Manage user accounts (admin)
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List every account
    List,

    /// Delete an account by id or email
    Delete {
        user: String,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Change name, email, role or password of an account
    Edit {
        user: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },
}
