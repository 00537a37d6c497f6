use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use partyroom::config::db::{DbOwner, DbProfile};
use partyroom::connect_db;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Party room database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment (selects the Postgres database name)
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type. In-memory SQLite is not offered: it would vanish with the process.
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,

    /// SQLite file path, used with `--db sqlite-file`
    #[arg(long, default_value = "partyroom.db")]
    file: PathBuf,
}

fn profile(args: &Args) -> DbProfile {
    match (args.db, args.env) {
        (Db::SqliteFile, _) => DbProfile::SqliteFile(args.file.clone()),
        (Db::Postgres, Env::Prod) => DbProfile::Prod,
        (Db::Postgres, Env::Test) => DbProfile::Test,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();
    let profile = profile(&args);

    let conn = match connect_db(&profile, DbOwner::Owner).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Could not connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
