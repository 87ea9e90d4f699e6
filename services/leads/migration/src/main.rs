use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(vitrex_leads_migration::Migrator).await;
}
