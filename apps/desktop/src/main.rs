use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{load_settings, CatalogClient};
use tracing_subscriber::EnvFilter;

mod render;
mod shell;

#[derive(Parser, Debug)]
#[command(about = "Busca productos y categorías de Mercado Libre Chile")]
struct Args {
    /// Backend base URL; overrides client.toml and the environment.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Session cookie (`name=value`) obtained from a browser sign-in.
    #[arg(long)]
    session_cookie: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether the backend session is signed in.
    Status,
    /// Search products.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List top-level categories.
    Categories,
    /// Print the marketplace sign-in URL.
    LoginUrl,
    /// Interactive session (default).
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(cookie) = args.session_cookie {
        settings.session_cookie = Some(cookie);
    }
    let client = Arc::new(CatalogClient::from_settings(&settings)?);

    match args.command.unwrap_or(Command::Shell) {
        Command::LoginUrl => println!("{}", client.login_url()),
        Command::Status => {
            client.start().await;
            println!("{}", render::header(&client.login_affordance()));
        }
        Command::Search { query } => {
            client.start().await;
            client.search().search(&query.join(" ")).await;
            println!("{}", render::view(&client.view()));
        }
        Command::Categories => {
            client.start().await;
            client.categories().load_categories().await;
            println!("{}", render::view(&client.view()));
        }
        Command::Shell => {
            client.start().await;
            shell::run(client).await?;
        }
    }

    Ok(())
}
