//! Create-admin command - bootstraps the first administrator.

use std::sync::Arc;

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let users = UserManager::new(Arc::new(Persistence::new(db.get_connection())));

    let admin = users
        .create_admin(args.name, args.email, args.password)
        .await?;

    println!("Admin created: {} <{}>", admin.name, admin.email);
    Ok(())
}
