use teloxide::{
    prelude::*,
    types::{ChatId, KeyboardButton, KeyboardMarkup},
    RequestError,
};

use crate::quiz::controller::{DisplayDirective, View};

pub const SKIP_BUTTON: &str = "Skip to Summary";
pub const SUBMIT_PREFERENCES_BUTTON: &str = "Update my learning plan";
pub const RESTART_BUTTON: &str = "Restart the survey";

// Telegram caps a message at 4096 UTF-16 units, leave some room
const MESSAGE_LIMIT: usize = 4000;

/// Sends whatever the directive asks for, with a keyboard of the enabled controls.
pub async fn show(
    bot: &Bot,
    chat_id: ChatId,
    directive: &DisplayDirective,
    picked: &[String],
) -> Result<(), RequestError> {
    let chunks = split_message(&text(directive, picked), MESSAGE_LIMIT);
    let last = chunks.len().saturating_sub(1);
    for (i, chunk) in chunks.into_iter().enumerate() {
        if i == last {
            bot.send_message(chat_id, chunk)
                .reply_markup(keyboard(directive))
                .await?;
        } else {
            bot.send_message(chat_id, chunk).await?;
        }
    }
    Ok(())
}

pub fn keyboard(directive: &DisplayDirective) -> KeyboardMarkup {
    KeyboardMarkup::new(
        keyboard_rows(directive)
            .into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
    )
}

fn keyboard_rows(directive: &DisplayDirective) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = match &directive.view {
        View::Question(prompt) => prompt.choices.iter().map(|c| vec![c.clone()]).collect(),
        View::Preferences(prompt) => prompt.choices.iter().map(|c| vec![c.clone()]).collect(),
        View::Summary(_) => Vec::new(),
    };
    if directive.skip_available {
        rows.push(vec![SKIP_BUTTON.to_string()]);
    }
    if directive.preferences_available {
        if matches!(directive.view, View::Summary(_)) {
            rows.extend(
                crate::quiz::PREFERENCE_CHOICES
                    .iter()
                    .map(|c| vec![c.to_string()]),
            );
        }
        rows.push(vec![SUBMIT_PREFERENCES_BUTTON.to_string()]);
    }
    if directive.restart_available {
        rows.push(vec![RESTART_BUTTON.to_string()]);
    }
    rows
}

fn text(directive: &DisplayDirective, picked: &[String]) -> String {
    match &directive.view {
        View::Question(prompt) => {
            let choices = prompt
                .choices
                .iter()
                .map(|c| format!("• {}", c))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n\n{}", prompt.question, choices)
        }
        View::Preferences(prompt) => {
            format!("{}\n\n{}", prompt.label, selection(picked))
        }
        View::Summary(summary) => summary.clone(),
    }
}

pub fn selection(picked: &[String]) -> String {
    if picked.is_empty() {
        "Tap the options you like, then \"Update my learning plan\".".to_string()
    } else {
        format!("Selected: {}", picked.join(", "))
    }
}

/// Splits on line breaks where possible so that no piece exceeds `limit` chars.
fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let mut line = line;
        loop {
            let line_len = line.chars().count();
            if current_len + line_len <= limit {
                current.push_str(line);
                current_len += line_len;
                break;
            }
            if current_len > 0 {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // a single line longer than the limit
            let cut = line
                .char_indices()
                .nth(limit)
                .map_or(line.len(), |(idx, _)| idx);
            chunks.push(line[..cut].to_string());
            line = &line[cut..];
        }
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
