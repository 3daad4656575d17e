// connexion BD

use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::config::AppConfig;

pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    Database::connect(&config.database_url).await
}
