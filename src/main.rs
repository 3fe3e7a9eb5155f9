use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::config::ApiConfig;
use slotbook_calendar::config::CalendarConfig;
use slotbook_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    // Both configs are read up front so a bad value fails before any I/O
    let config = ApiConfig::from_env()?;
    let calendar_config = CalendarConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    slotbook_api::start_server(config, db_pool, calendar_config).await
}
