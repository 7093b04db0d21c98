//! Named terminal styles for the cardbox CLI.
//!
//! Templates refer to styles by semantic name ("title", "badge_blue",
//! "msg_success"); the palette lives only here.

use console::Style;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

pub mod names {
    pub const MSG_INFO: &str = "msg_info";
    pub const MSG_SUCCESS: &str = "msg_success";
    pub const MSG_WARNING: &str = "msg_warning";
}

pub static CARDBOX_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("heading", Style::new().bold())
        .add("id", Style::new().yellow())
        .add("title", Style::new().bold())
        .add("description", Style::new())
        .add("image", Style::new().cyan().underlined())
        .add("placeholder", Style::new().dim().italic())
        .add("hint", Style::new().dim())
        .add("badge_blue", Style::new().blue())
        .add("badge_green", Style::new().green())
        .add("badge_purple", Style::new().magenta())
        .add("badge_yellow", Style::new().yellow())
        .add(
            "badge_gray",
            Style::new().color256(rgb_to_ansi256((138, 138, 138))),
        )
        .add(names::MSG_INFO, Style::new().dim())
        .add(names::MSG_SUCCESS, Style::new().green())
        .add(names::MSG_WARNING, Style::new().yellow())
});
