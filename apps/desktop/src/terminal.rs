//! Line-oriented front end: reads commands from stdin and drives the session controller.

use std::io::Write;

use anyhow::{Context, Result};
use async_trait::async_trait;
use client_core::{
    alerts::{CONFIRM_DELETE_MESSAGE, CONFIRM_DELETE_TITLE},
    Alert, Confirmer, DeletePrompt, ItemStore, SessionController,
};
use shared::error::ListError;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Edit(usize),
    Delete(usize),
    List,
    Help,
    Quit,
    Unknown(String),
}

/// Anything not starting with `/` is submitted as the input text, blank lines included.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('/') {
        return Command::Submit(line.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let position = parts.next().and_then(|raw| raw.parse::<usize>().ok());
    match (verb, position) {
        ("/edit" | "/e", Some(position)) => Command::Edit(position),
        ("/delete" | "/d", Some(position)) => Command::Delete(position),
        ("/list" | "/l", None) => Command::List,
        ("/help" | "/h", None) => Command::Help,
        ("/quit" | "/q", None) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush().context("failed to flush stdout")?;
        self.lines
            .next_line()
            .await
            .context("failed to read from stdin")
    }
}

#[async_trait]
impl Confirmer for Terminal {
    async fn confirm_delete(&mut self, prompt: &DeletePrompt) -> bool {
        let subject = prompt
            .name
            .as_deref()
            .map(|name| format!(" (\"{name}\")"))
            .unwrap_or_default();
        println!("{CONFIRM_DELETE_TITLE}: {CONFIRM_DELETE_MESSAGE}{subject}");

        match self.read_line("Cancel or Delete? [y/N] ").await {
            Ok(Some(answer)) => matches!(
                answer.trim().to_ascii_lowercase().as_str(),
                "y" | "yes" | "delete"
            ),
            Ok(None) => false,
            Err(error) => {
                warn!(%error, "could not read delete confirmation");
                false
            }
        }
    }
}

pub async fn run<S: ItemStore>(
    controller: &mut SessionController<S>,
    terminal: &mut Terminal,
) -> Result<()> {
    println!("{}", render::HELP);
    println!("{}", render::render_rows(controller.rows()));

    while let Some(line) = terminal
        .read_line(&render::prompt(controller.state()))
        .await?
    {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{}", render::HELP),
            Command::List => match controller.refresh().await {
                Ok(()) => println!("{}", render::render_rows(controller.rows())),
                Err(err) => show_error(&err),
            },
            Command::Submit(text) => match controller.submit(&text).await {
                Ok(notice) => {
                    println!("{}", render::render_notice(&notice));
                    println!("{}", render::render_rows(controller.rows()));
                }
                Err(err) => show_error(&err),
            },
            Command::Edit(position) => match controller.row_at(position).cloned() {
                Some(row) => {
                    println!("Editing #{position}; enter the new name.");
                    controller.begin_edit(row.item);
                }
                None => println!("No movie in row {position}."),
            },
            Command::Delete(position) => {
                let Some(item_id) = controller.row_at(position).map(|row| row.item.id) else {
                    println!("No movie in row {position}.");
                    continue;
                };
                match controller.request_delete(item_id, terminal).await {
                    Ok(notice) => {
                        println!("{}", render::render_notice(&notice));
                        println!("{}", render::render_rows(controller.rows()));
                    }
                    Err(err) => show_error(&err),
                }
            }
            Command::Unknown(raw) => println!("Unknown command '{raw}'. Type /help."),
        }
    }

    Ok(())
}

fn show_error(err: &ListError) {
    println!("{}", render::render_alert(&Alert::from(err)));
}
