//! Interactive loop: commands from stdin dispatch requests, state updates
//! are printed as they arrive.

use std::sync::Arc;

use anyhow::{Context, Result};
use client_core::CatalogClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::render;

const HELP: &str = "Comandos: buscar <texto> | categorias | estado | login | ayuda | salir";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Search(String),
    Categories,
    Status,
    Login,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "buscar" | "search" => ShellCommand::Search(rest.to_string()),
        "categorias" | "categorías" | "categories" => ShellCommand::Categories,
        "estado" | "status" => ShellCommand::Status,
        "login" => ShellCommand::Login,
        "ayuda" | "help" => ShellCommand::Help,
        "salir" | "quit" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other.to_string()),
    }
}

pub async fn run(client: Arc<CatalogClient>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut search_updates = client.search().subscribe();
    let mut category_updates = client.categories().subscribe();

    println!("{}", render::header(&client.login_affordance()));
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    break;
                };
                match parse_command(&line) {
                    ShellCommand::Search(query) => {
                        // Every submission is sent; the newest one owns the results.
                        if let Some(pending) = client.search().begin(&query) {
                            tokio::spawn(pending);
                        }
                    }
                    ShellCommand::Categories => {
                        tokio::spawn(client.categories().begin());
                    }
                    ShellCommand::Status => println!("{}", render::header(&client.login_affordance())),
                    ShellCommand::Login => println!("{}", client.login_url()),
                    ShellCommand::Help => println!("{HELP}"),
                    ShellCommand::Quit => break,
                    ShellCommand::Empty => {}
                    ShellCommand::Unknown(verb) => {
                        debug!(%verb, "unknown shell command");
                        println!("Comando desconocido: {verb}. {HELP}");
                    }
                }
            }
            Ok(()) = search_updates.changed() => {
                println!("{}", render::search_panel(&search_updates.borrow_and_update()));
            }
            Ok(()) = category_updates.changed() => {
                println!("{}", render::categories_panel(&category_updates.borrow_and_update()));
            }
        }
    }

    Ok(())
}
