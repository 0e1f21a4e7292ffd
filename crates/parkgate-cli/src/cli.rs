use clap::{Args, Parser, Subcommand};
use parkgate_core::{DeviceRole, OperatorRole};
use std::path::PathBuf;

/// Parking lot attendant terminal.
#[derive(Debug, Parser)]
#[command(name = "parkgate", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Terminal configuration file
    #[arg(
        long,
        short,
        global = true,
        env = "PARKGATE_CONFIG",
        default_value = "parkgate.toml"
    )]
    pub config: PathBuf,

    /// Operator username
    #[arg(long, short, global = true, env = "PARKGATE_USER")]
    pub user: Option<String>,

    /// Operator password
    #[arg(long, short, global = true, env = "PARKGATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Print machine-readable JSON where supported
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check credentials and show what this operator may do here
    Login,

    /// Register a vehicle entry and print its ticket
    Enter {
        /// License plate
        plate: String,
    },

    /// Look up a vehicle at the exit and let it out if paid
    Exit {
        /// License plate or scanned ticket code (PK-...)
        code: String,

        /// Register the exit without asking for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Show the informational fee for a vehicle inside
    Quote {
        /// License plate or scanned ticket code (PK-...)
        code: String,
    },

    /// Mark a vehicle as paid, as the pay station would
    Pay {
        /// License plate or scanned ticket code (PK-...)
        code: String,

        /// Amount paid, in cents
        #[arg(long)]
        cents: i64,
    },

    /// Interactive lane session reading commands from stdin
    Lane,

    /// Remote server settings (administrators only)
    #[command(subcommand)]
    Server(ServerCommand),

    /// This terminal's identity and role
    #[command(subcommand)]
    Device(DeviceCommand),

    /// Operator accounts (administrators only)
    #[command(subcommand)]
    Operators(OperatorsCommand),
}

#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Show the configured server
    Show,

    /// Validate and save new server settings
    Set(ServerArgs),

    /// Show the factory settings, saving them with --save
    Restore {
        #[arg(long)]
        save: bool,
    },

    /// Check the backend answers
    Test,
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// IPv4 address
    #[arg(long)]
    pub host: String,

    #[arg(long, default_value = "1433")]
    pub port: String,

    #[arg(long)]
    pub database: String,

    #[arg(long = "db-user")]
    pub db_user: String,

    #[arg(long = "db-password", default_value = "", hide_default_value = true)]
    pub db_password: String,
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Show the local device configuration
    Show,

    /// Rename the terminal and set its role (administrators only)
    Configure {
        #[arg(long)]
        name: String,

        /// ENTRADA, SALIDA or MIXTO
        #[arg(long)]
        role: DeviceRole,

        #[arg(long, default_value_t = 1)]
        numeric_id: i32,
    },
}

#[derive(Debug, Subcommand)]
pub enum OperatorsCommand {
    List,

    Create {
        #[arg(long)]
        username: String,

        #[arg(long = "new-password")]
        new_password: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// ADMINISTRADOR, OPERADOR or CAJA
        #[arg(long, default_value = "OPERADOR")]
        role: OperatorRole,
    },
}
