use sea_orm::Database;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cmd = std::env::args().nth(1);

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./presagio.db?mode=rwc".to_string());

    let db = Database::connect(&db_url).await?;

    match cmd.as_deref() {
        Some("up") | None => migration::Migrator::up(&db, None).await?,
        Some("down") => migration::Migrator::down(&db, None).await?,
        Some("fresh") => migration::Migrator::fresh(&db).await?,
        Some("status") => {
            migration::Migrator::status(&db).await?;
        }
        Some(other) => {
            eprintln!("unknown command {other:?}, expected up, down, fresh or status");
            std::process::exit(2);
        }
    }

    Ok(())
}
