//! Plain-text rendering of the list table, alerts and prompts.

use client_core::{Alert, EditSession, Notice};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use shared::listing::ListRow;

const INPUT_PLACEHOLDER: &str = "Enter movie";

pub const HELP: &str = "\
Type a movie name and press Enter to submit it.
  /edit <#>     edit the movie in row #
  /delete <#>   delete the movie in row #
  /list         reload the list
  /help         show this help
  /quit         exit";

pub fn render_rows(rows: &[ListRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Movie Name", "Actions"]);

    for row in rows {
        table.add_row(vec![
            row.position.to_string(),
            row.item.name.clone(),
            format!("/edit {0}  /delete {0}", row.position),
        ]);
    }

    let mut out = table.to_string();
    if rows.is_empty() {
        out.push_str("\n(no movies yet)");
    }
    out
}

pub fn render_alert(alert: &Alert) -> String {
    format!("[{}] {}", alert.title, alert.message)
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Added(item) => format!("Added \"{}\".", item.name),
        Notice::Updated(item) => format!("Updated to \"{}\".", item.name),
        Notice::Deleted { removed: true, .. } => "Deleted.".to_string(),
        Notice::Deleted { removed: false, .. } => "Nothing to delete.".to_string(),
        Notice::DeleteCancelled(_) => "Delete cancelled.".to_string(),
    }
}

/// Prompt line for the input field; shows what is being edited, if anything.
pub fn prompt(session: &EditSession) -> String {
    match session.target() {
        None => format!("{INPUT_PLACEHOLDER} [{}]> ", session.submit_label()),
        Some(item) => format!("{} [{}]> ", item.name, session.submit_label()),
    }
}
