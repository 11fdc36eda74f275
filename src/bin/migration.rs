use clap::{Parser, Subcommand};
use management_api::{config, db, migrator::Migrator};
use sea_orm_migration::MigratorTrait;
use tracing::info;

#[derive(Parser)]
#[command(name = "migration", about = "Apply or revert schema migrations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations (default)
    Up,
    /// Revert the last `steps` migrations
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Print applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let pool = db::establish_connection_from_app_config(&cfg).await?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => {
            db::run_migrations(&pool).await?;
        }
        Command::Down { steps } => {
            info!(steps, "Reverting migrations");
            Migrator::down(&pool, Some(steps)).await?;
        }
        Command::Status => {
            Migrator::status(&pool).await?;
        }
    }

    info!("Migration command finished");
    Ok(())
}
