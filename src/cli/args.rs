//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// shiftdesk - shift scheduling backend
#[derive(Parser, Debug)]
#[command(name = "shiftdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create an administrator account
    CreateAdmin(CreateAdminArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the create-admin command
#[derive(Parser, Debug)]
pub struct CreateAdminArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Login email
    #[arg(long)]
    pub email: String,

    /// Password (at least 8 characters)
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_admin() {
        let cli = Cli::try_parse_from([
            "shiftdesk",
            "create-admin",
            "--name",
            "Admin",
            "--email",
            "admin@example.com",
            "--password",
            "long-enough",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateAdmin(args) => assert_eq!(args.email, "admin@example.com"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_migrate_status_verbose() {
        let cli = Cli::try_parse_from(["shiftdesk", "migrate", "status", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
