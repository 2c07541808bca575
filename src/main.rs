mod api;
mod config;
mod db;
mod error;
mod mock;
mod models;
mod query;

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::api::{Request, Response};

/// In-memory client directory with an HTTP-shaped request interface
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of synthetic clients to seed (overrides CLIENT_DIRECTORY_SEED_COUNT)
    #[arg(long)]
    seed_count: Option<usize>,

    /// Seed for the synthetic data generator (overrides CLIENT_DIRECTORY_RNG_SEED)
    #[arg(long)]
    rng_seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read request lines (`METHOD TARGET [JSON-BODY]`) from stdin
    Repl,
    /// Execute a single request against a freshly seeded store
    Request {
        method: String,
        target: String,
        body: Option<String>,
    },
    /// Print every seeded client
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so responses on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?.with_overrides(cli.seed_count, cli.rng_seed);

    // Build the store once and hand it to every operation
    let db = db::init(&config).await?;

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => run_repl(&db).await?,
        Command::Request {
            method,
            target,
            body,
        } => {
            let line = match body {
                Some(body) => format!("{} {} {}", method, target, body),
                None => format!("{} {}", method, target),
            };
            write_response(&mut std::io::stdout(), &execute(&db, &line).await)?;
        }
        Command::List => {
            for client in db.get_clients().await {
                println!(
                    "{:>4}  {:<6}  {:<28}  {:<40}  created {}  updated {}",
                    client.id,
                    client.gender,
                    client.name,
                    client.email,
                    client.created_at.format("%Y-%m-%d"),
                    client.updated_at.format("%Y-%m-%d"),
                );
            }
        }
    }

    Ok(())
}

async fn run_repl(db: &db::Database) -> Result<()> {
    info!("reading requests from stdin");

    let count = run_requests(db, BufReader::new(tokio::io::stdin()), &mut std::io::stdout()).await?;

    info!(count, "stdin closed");
    Ok(())
}

/// Execute each request line from `input`, writing responses to `out`
///
/// Blank lines and `#` comments are skipped. Returns the number of requests executed
async fn run_requests<R, W>(db: &db::Database, input: R, out: &mut W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut count = 0;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        write_response(out, &execute(db, line).await)?;
        count += 1;
    }

    Ok(count)
}

async fn execute(db: &db::Database, line: &str) -> Response {
    match Request::parse(line) {
        Ok(request) => api::handle(db, &request).await,
        Err(err) => {
            warn!(%err, line, "malformed request line");
            Response::from(err)
        }
    }
}

fn write_response<W: Write>(out: &mut W, response: &Response) -> Result<()> {
    writeln!(out, "{}", response)?;
    if let Some(body) = &response.body {
        writeln!(out, "{}", serde_json::to_string_pretty(body)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Gender};

    async fn sample_db() -> db::Database {
        let db = db::Database::new();
        db.insert_client(Client::new(
            1,
            "Ana Silva".to_string(),
            "ana@api.doc".to_string(),
            Gender::Female,
            "(11) 1234-5678".to_string(),
        ))
        .await;
        db
    }

    async fn run_script(db: &db::Database, script: &str) -> (usize, String) {
        let mut out = Vec::new();
        let count = run_requests(db, script.as_bytes(), &mut out).await.unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    fn status_lines(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .collect()
    }

    #[tokio::test]
    async fn test_blank_lines_and_comments_are_skipped() {
        let db = sample_db().await;
        let script = "\n   \n# list everything\n  # indented comment\nGET /clients/1\n\n";

        let (count, output) = run_script(&db, script).await;
        assert_eq!(count, 1);
        assert_eq!(status_lines(&output), vec!["200 OK"]);
        assert!(output.contains("\"name\": \"Ana Silva\""));
    }

    #[tokio::test]
    async fn test_malformed_line_reports_400_and_continues() {
        let db = sample_db().await;
        let script = "FETCH /clients/1\nGET\nDELETE /clients/1\nGET /clients/1\n";

        let (count, output) = run_script(&db, script).await;
        assert_eq!(count, 4);
        assert_eq!(
            status_lines(&output),
            vec!["400 Bad Request", "400 Bad Request", "204 No Content", "404 Not Found"]
        );
        assert!(db.get_client(1).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_input_runs_nothing() {
        let db = sample_db().await;
        let (count, output) = run_script(&db, "").await;
        assert_eq!(count, 0);
        assert!(output.is_empty());
    }
}
