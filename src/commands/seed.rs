//! Seed command - Creates the default admin account.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let email = config.admin_email.clone();

    let services = Services::from_connection(db.get_connection(), config);
    if services.auth().seed_admin().await? {
        println!("Created admin account {}", email);
    } else {
        println!("Admin account {} already exists", email);
    }

    Ok(())
}
