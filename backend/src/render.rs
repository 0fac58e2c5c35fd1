//! HTML page for one round.
//!
//! The template is compiled in; `{{cells}}` and `{{secret}}` are substituted.

use std::fmt::Write;

use crate::types::Round;

const PAGE_TEMPLATE: &str = include_str!("../templates/index.html");

/// Escape text for use inside HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_cells(round: &Round) -> String {
    let mut html = String::new();
    for cell in round.grid.in_label_order() {
        let label = escape_html(&cell.label);
        // Writing to a String cannot fail.
        let _ = writeln!(
            html,
            r#"  <div class="cell" id="{label}" data-value="{value}">{value}</div>"#,
            value = cell.value,
        );
    }
    html
}

/// Render the game page: every cell in label order plus the secret.
pub fn render_page(round: &Round) -> String {
    PAGE_TEMPLATE
        .replace("{{cells}}", render_cells(round).trim_end())
        .replace("{{secret}}", &round.secret.to_string())
}
