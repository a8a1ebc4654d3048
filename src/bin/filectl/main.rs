//! `filectl` - command-line client for the file server.
//!
//! Every subcommand is one HTTP call. The server base URL comes from
//! `--api`, then `FILESERVER_API`, then `~/.fileserverrc` (`{"api": "..."}`),
//! then `http://localhost:8000`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

mod client;
mod config;

use client::{ApiClient, render_listing};

#[derive(Parser)]
#[command(name = "filectl")]
#[command(about = "Upload, list, download and delete files on a file server", version)]
struct Cli {
    /// Server base URL
    #[arg(long, global = true, env = config::API_ENV)]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a local file under its own name
    Upload { file_path: PathBuf },
    /// Download a stored file
    Download {
        file_name: String,
        /// Where to save (default: current dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List stored files, newest first
    List,
    /// Delete a stored file
    Delete { file_name: String },
    /// Check server liveness
    Ping,
}

async fn run(cli: Cli) -> Result<()> {
    let rc = config::rc_path();
    let api = config::resolve_api(cli.api, rc.as_deref());
    log::debug!("Using server {}", api);
    let client = ApiClient::new(api);

    match cli.command {
        Commands::Upload { file_path } => {
            if !file_path.is_file() {
                bail!("{} does not exist or is not a file", file_path.display());
            }
            let uploaded = client.upload(&file_path).await?;
            println!("Uploaded {} ({} bytes)", uploaded.filename, uploaded.size);
        }
        Commands::Download { file_name, out } => {
            let saved = client.download(&file_name, out.as_deref()).await?;
            println!("Saved to {}", saved.display());
        }
        Commands::List => {
            let files = client.list().await?;
            println!("{}", render_listing(&files));
        }
        Commands::Delete { file_name } => {
            client.delete(&file_name).await?;
            println!("Deleted {}", file_name);
        }
        Commands::Ping => {
            println!("Health-check: {}", client.ping().await);
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_download_with_output_and_api() {
        let cli = Cli::try_parse_from([
            "filectl",
            "download",
            "report.pdf",
            "-o",
            "/tmp/copy.pdf",
            "--api",
            "http://files.internal:8000",
        ])
        .unwrap();

        assert_eq!(cli.api.as_deref(), Some("http://files.internal:8000"));
        match cli.command {
            Commands::Download { file_name, out } => {
                assert_eq!(file_name, "report.pdf");
                assert_eq!(out, Some(PathBuf::from("/tmp/copy.pdf")));
            }
            _ => panic!("Expected Download command"),
        }
    }

    #[test]
    fn test_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["filectl"]).is_err());
        assert!(Cli::try_parse_from(["filectl", "delete"]).is_err());
    }
}
