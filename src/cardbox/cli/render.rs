//! Rendering of list views, single cards and command messages.
//!
//! Output goes through `outstanding` templates (see [`super::templates`]) with
//! the named styles in [`super::styles`]. Layout (widths, truncation, padding)
//! stays in Rust because it needs `unicode-width`; templates only choose
//! styles. Every `render_*` function returns a `String` so it can be tested
//! without a terminal.

use super::styles::{names, CARDBOX_THEME};
use super::templates::{CARD_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE};
use cardbox::view::{CardView, CmdMessage, ListView, MessageLevel};
use outstanding::{render_with_color, ThemeChoice};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
const INDENT: &str = "     ";
const ADD_HINT: &str = "Add your first card: cardbox add --title <TITLE> --category <CATEGORY>";

/// One card with its layout already computed.
#[derive(Serialize)]
struct CardLineData {
    index: String,
    title: String,
    padding: String,
    badge: String,
    badge_style: &'static str,
    description: String,
    image: Option<String>,
    image_is_placeholder: bool,
}

#[derive(Serialize)]
struct ListData {
    heading: String,
    empty_message: Option<String>,
    hint: &'static str,
    indent: &'static str,
    cards: Vec<CardLineData>,
}

#[derive(Serialize)]
struct CardData {
    card: CardLineData,
    rule: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

pub fn colors_enabled() -> bool {
    console::colors_enabled()
}

fn render_template<T: Serialize>(template: &str, data: &T, use_color: bool) -> String {
    render_with_color(template, data, ThemeChoice::from(&*CARDBOX_THEME), use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_list(view: &ListView, use_color: bool) -> String {
    let description_width = LINE_WIDTH.saturating_sub(INDENT.width());
    let image_width = description_width.saturating_sub("image: ".len());

    let cards = view
        .cards
        .iter()
        .map(|card| {
            let mut line = card_line(card);
            line.description =
                truncate_to_width(&first_line(&card.description), description_width);
            line.image = line.image.map(|image| truncate_to_width(&image, image_width));
            line
        })
        .collect();

    let data = ListData {
        heading: view.heading.clone(),
        empty_message: view.empty_message.clone(),
        hint: ADD_HINT,
        indent: INDENT,
        cards,
    };
    render_template(LIST_TEMPLATE, &data, use_color)
}

pub fn render_card(card: &CardView, use_color: bool) -> String {
    let data = CardData {
        card: card_line(card),
        rule: "-".repeat(LINE_WIDTH),
    };
    render_template(CARD_TEMPLATE, &data, use_color)
}

/// `  3. Title ............ [Category]`, badge right-aligned to LINE_WIDTH.
fn card_line(card: &CardView) -> CardLineData {
    let index = format!("{:>3}. ", card.id);
    let badge = format!("[{}]", card.category);

    let fixed = index.width() + badge.width() + 1;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&card.title, available);
    let padding = " ".repeat(available.saturating_sub(title.width()) + 1);

    CardLineData {
        index,
        title,
        padding,
        badge,
        badge_style: card.tone.style_name(),
        description: card.description.clone(),
        image: card.image.as_deref().map(image_label),
        image_is_placeholder: card.image_is_placeholder,
    }
}

/// Inline `data:` URLs are summarised instead of dumping the base64 payload.
pub fn image_label(image: &str) -> String {
    match image.strip_prefix("data:") {
        Some(rest) => {
            let media_type = rest.split([';', ',']).next().unwrap_or_default();
            format!("inline {} ({} chars)", media_type, image.len())
        }
        None => image.to_string(),
    }
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let messages = messages
        .iter()
        .map(|message| MessageData {
            content: message.content.clone(),
            style: match message.level {
                MessageLevel::Info => names::MSG_INFO,
                MessageLevel::Success => names::MSG_SUCCESS,
                MessageLevel::Warning => names::MSG_WARNING,
            },
        })
        .collect();
    render_template(MESSAGES_TEMPLATE, &MessagesData { messages }, use_color)
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages, colors_enabled());
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or_default().trim().to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
