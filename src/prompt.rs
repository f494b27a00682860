use std::sync::OnceLock;

use dialoguer::theme::SimpleTheme;
use dialoguer::{Confirm, Input};

use gvc::question::Prompter;

static THEME: OnceLock<SimpleTheme> = OnceLock::new();

pub(crate) fn confirm(prompt: impl Into<String>, default: bool) -> dialoguer::Result<bool> {
    let theme = THEME.get_or_init(|| SimpleTheme);
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
}

pub(crate) fn input(prompt: impl Into<String>, default: Option<String>) -> dialoguer::Result<String> {
    let theme = THEME.get_or_init(|| SimpleTheme);
    let mut p = Input::with_theme(theme).with_prompt(prompt);
    if let Some(default) = default {
        p = p.default(default);
    }
    p.interact_text()
}

/// Asks config questions on the controlling terminal.
pub(crate) struct Terminal;

impl Prompter for Terminal {
    fn input(&mut self, message: &str, default: Option<&str>) -> gvc::utils::Result<String> {
        Ok(input(message, default.map(str::to_string))?)
    }

    fn confirm(&mut self, message: &str, default: bool) -> gvc::utils::Result<bool> {
        Ok(confirm(message, default)?)
    }
}
