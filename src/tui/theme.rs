use ratatui::style::Color;
use tracing::debug;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub purple: Color,
    pub selection_bg: Color,
    /// Clear-all action at rest
    pub danger: Color,
    /// Clear-all action once armed
    pub danger_armed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1E, 0x22, 0x28),
            text: Color::Rgb(0xD8, 0xDE, 0xE9),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x5D, 0xAD, 0xE2),
            dim: Color::Rgb(0x80, 0x86, 0x8F),
            red: Color::Rgb(0xE0, 0x6C, 0x75),
            green: Color::Rgb(0x98, 0xC3, 0x79),
            purple: Color::Rgb(0xC6, 0x78, 0xDD),
            selection_bg: Color::Rgb(0x2C, 0x3E, 0x50),
            danger: Color::Rgb(0x7B, 0x24, 0x1C),
            danger_armed: Color::Rgb(0xE7, 0x4C, 0x3C),
        }
    }
}

/// `#RRGGBB` or the short `#RGB` form
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        6 => Some(Color::Rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        // #abc is #aabbcc
        3 => {
            let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            Some(Color::Rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

impl Theme {
    /// Default palette with `[ui.colors]` overrides applied. Unknown keys and
    /// bad values are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            match (theme.slot_mut(key), parse_hex_color(value)) {
                (Some(slot), Some(color)) => *slot = color,
                _ => debug!(key = %key, value = %value, "ignoring color override"),
            }
        }
        theme
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "highlight" => &mut self.highlight,
            "dim" => &mut self.dim,
            "red" => &mut self.red,
            "green" => &mut self.green,
            "purple" => &mut self.purple,
            "selection_bg" => &mut self.selection_bg,
            "danger" => &mut self.danger,
            "danger_armed" => &mut self.danger_armed,
            _ => return None,
        })
    }

    /// Foreground for a task's text; completed tasks are greyed out
    pub fn task_color(&self, done: bool) -> Color {
        if done { self.dim } else { self.text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(
            parse_hex_color("#E74C3C"),
            Some(Color::Rgb(0xE7, 0x4C, 0x3C))
        );
        assert_eq!(parse_hex_color("#fa0"), Some(Color::Rgb(0xFF, 0xAA, 0x00)));
        assert_eq!(parse_hex_color("E74C3C"), None);
        assert_eq!(parse_hex_color("#E74C"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#éé"), None);
    }

    #[test]
    fn config_overrides_known_slots() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("danger".into(), "#112233".into());
        ui.colors.insert("unknown_slot".into(), "#445566".into());
        ui.colors.insert("text".into(), "not a color".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.danger, Color::Rgb(0x11, 0x22, 0x33));
        // Unparseable values keep the default
        assert_eq!(theme.text, Theme::default().text);
    }

    #[test]
    fn done_tasks_use_dim() {
        let theme = Theme::default();
        assert_eq!(theme.task_color(true), theme.dim);
        assert_eq!(theme.task_color(false), theme.text);
    }
}
