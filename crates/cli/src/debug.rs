//! `--debug` report: which source each variable came from

use env_run_core::EnvironmentVariables;
use env_run_env::{EnvironmentSourceData, Source};
use std::collections::BTreeSet;
use tracing::info;

const COLUMN_WIDTHS: [usize; 3] = [42, 18, 80];
const HEADER: [&str; 3] = ["Name", "Source", "Value"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    key: String,
    source: Source,
    value: String,
}

/// Render the winning/overridden tables.
///
/// The winner for a key is the highest-precedence source whose value equals
/// the final value; every other definition of the key is overridden.
pub fn render_table(
    source_data: &EnvironmentSourceData,
    final_env: &EnvironmentVariables,
    env_name: Option<&str>,
) -> String {
    let keys: BTreeSet<&String> = Source::ASCENDING
        .iter()
        .flat_map(|source| source_data.get(*source).keys())
        .collect();

    if keys.is_empty() {
        return "No environment variables found.".to_string();
    }

    let mut winning = Vec::new();
    let mut overridden = Vec::new();

    for key in keys {
        let final_value = final_env.get(key);
        let mut winner_found = false;

        for source in Source::DESCENDING {
            let Some(value) = source_data.get(source).get(key) else {
                continue;
            };
            let row = Row {
                key: key.clone(),
                source,
                value: value.clone(),
            };
            if !winner_found && Some(value) == final_value {
                winner_found = true;
                winning.push(row);
            } else {
                overridden.push(row);
            }
        }
    }

    sort_rows(&mut winning);
    sort_rows(&mut overridden);

    let mut output = String::new();
    output.push_str(&section(
        "Winning Environment Variables",
        &winning,
        env_name,
        "No winning variables found.",
    ));
    output.push_str("\n\n");
    output.push_str(&section(
        "Overridden Environment Variables",
        &overridden,
        env_name,
        "No overridden variables found.",
    ));
    output
}

/// Log a heading and print the report to stdout
pub fn print(
    source_data: &EnvironmentSourceData,
    final_env: &EnvironmentVariables,
    env_name: Option<&str>,
) {
    info!("Environment Variables Debug Information:");
    println!("{}", render_table(source_data, final_env, env_name));
}

fn precedence_rank(source: Source) -> usize {
    Source::DESCENDING
        .iter()
        .position(|s| *s == source)
        .unwrap_or(Source::DESCENDING.len())
}

fn sort_rows(rows: &mut [Row]) {
    rows.sort_by(|a, b| {
        precedence_rank(a.source)
            .cmp(&precedence_rank(b.source))
            .then_with(|| a.key.cmp(&b.key))
    });
}

fn section(title: &str, rows: &[Row], env_name: Option<&str>, empty: &str) -> String {
    let mut out = format!("{title}\n{}\n", "-".repeat(title.len()));
    if rows.is_empty() {
        out.push_str(empty);
        return out;
    }

    let mut lines = vec![format_line(&HEADER.map(str::to_string))];
    lines.push(
        COLUMN_WIDTHS
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );

    for row in rows {
        let cells = [row.key.clone(), row.source.label(env_name), row.value.clone()];
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(COLUMN_WIDTHS)
            .map(|(cell, width)| wrap_text(cell, width))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line in 0..height {
            let physical: [String; 3] =
                std::array::from_fn(|col| wrapped[col].get(line).cloned().unwrap_or_default());
            lines.push(format_line(&physical));
        }
    }

    out.push_str(lines.join("\n").trim_end());
    out
}

fn format_line(cells: &[String; 3]) -> String {
    cells
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Split text into lines of at most `width` characters, breaking on spaces
/// and hard-breaking words that do not fit on a line of their own
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.chars().count() <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let current_len = current.chars().count();
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }
        if word_len <= width {
            current.push_str(word);
        } else {
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current = piece;
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
