use backend_api::{run_server, AppState, FileDatabase};
use std::sync::Arc;
use std::{env, path::PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment variables with sane defaults
    let database_path_raw =
        env::var("DATABASE_PATH").unwrap_or_else(|_| "database/database.json".to_string());
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    let database_path = PathBuf::from(&database_path_raw);

    println!("Financial Profile API Server");
    println!("============================");
    println!("Database path: {}", database_path.display());
    println!("Listening on: {}:{}", host, port);
    println!("Environment overrides: DATABASE_PATH='{}'", database_path_raw);
    println!();

    // Pre-flight checks
    if !database_path.exists() {
        eprintln!(
            "[WARN] database file not found at: {}",
            database_path.display()
        );
        eprintln!("       Starting with an empty database; it is created on first write.");
    }

    // One file database backs every store
    let database = Arc::new(FileDatabase::new(&database_path));
    let state = AppState {
        users: database.clone(),
        sessions: database.clone(),
        profiles: database.clone(),
        transactions: database,
    };

    // Start the server
    run_server(state, &host, port).await?;

    Ok(())
}
