use std::fmt::{Display, Write};

use chrono::{DateTime, Local, TimeZone};
use dashboard_core::{AppViewModel, ContentPair, HistoryRowView, Stance};

use super::constants::*;

/// Renders the whole console as text, timestamps in local time.
pub fn render(view: &AppViewModel) -> String {
    render_in(view, &Local)
}

pub fn render_in<Tz>(view: &AppViewModel, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{rule}");

    let url = if view.url.is_empty() {
        format!("({URL_PLACEHOLDER})")
    } else {
        view.url.clone()
    };
    let _ = writeln!(out, "{LABEL_URL}: {url}");
    let _ = writeln!(out, "{LABEL_STANCE}: {}", stance_label(view.stance));

    let submit_state = if view.submit_enabled { "" } else { " (disabled)" };
    let _ = writeln!(out, "[ {} ]{submit_state}", view.submit_label);

    if let Some(error) = &view.error {
        let _ = writeln!(out, "ERROR: {error}");
    }
    if let Some(success) = &view.success {
        let _ = writeln!(out, "OK: {success}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{HISTORY_HEADING}");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    if let Some(notice) = view.empty_notice {
        let _ = writeln!(out, "{notice}");
    }
    for (index, row) in view.history.iter().enumerate() {
        write_row(&mut out, index + 1, row, tz);
    }

    out
}

fn write_row<Tz>(out: &mut String, number: usize, row: &HistoryRowView, tz: &Tz)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let marker = if row.expanded { "v" } else { ">" };
    let _ = writeln!(
        out,
        "{marker} [{number}] URL: {url}  Stance: {stance} | {when}  (id {id})",
        url = row.source_url,
        stance = row.stance,
        when = format_timestamp(&row.created_at, tz),
        id = row.id,
    );
    if let Some(pairs) = &row.details {
        for pair in pairs {
            write_pair(out, pair);
        }
    }
}

fn write_pair(out: &mut String, pair: &ContentPair) {
    let _ = writeln!(out, "    ## {}", pair.branch);
    let _ = writeln!(out, "    Facebook: {}", pair.facebook_post);
    let _ = writeln!(out, "    Tweet: {}", pair.tweet);
    let _ = writeln!(out, "    {}", "-".repeat(RULE_WIDTH - 4));
}

fn stance_label(stance: Stance) -> String {
    format!("{} - {}", stance.code(), stance.description())
}

/// RFC 3339 timestamps are shown in `tz`; anything else is shown verbatim.
pub fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| {
            parsed
                .with_timezone(tz)
                .format(TIMESTAMP_FORMAT)
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}
