use std::collections::BTreeMap;

use log::warn;
use ratatui::prelude::Color;

// Tokyonight-inspired palette; tweak these to change the default colours.
const TN_BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
const TN_BG_ALT: Color = Color::Rgb(31, 35, 53); // #1f2335
const TN_BG_STRONG: Color = Color::Rgb(65, 72, 104); // #414868
const TN_FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const TN_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub status_bg: Color,
    pub status_fg: Color,
    pub status_pad_bg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub page_border: Color,
    pub active_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            status_bg: TN_BG_STRONG,
            status_fg: TN_BLUE,
            status_pad_bg: TN_BG_ALT,
            selected_bg: TN_BG_STRONG,
            selected_fg: TN_FG,
            page_border: TN_BG_STRONG,
            active_border: TN_BLUE,
        }
    }
}

impl Theme {
    /// Builds a theme from the `[theme]` config table: `name` selects a
    /// preset, the remaining keys override single colours.
    pub fn from_table(table: &BTreeMap<String, String>) -> Self {
        let mut theme = match table.get("name").map(|n| n.to_lowercase()) {
            Some(name) => Self::preset(&name).unwrap_or_else(|| {
                warn!("unknown theme preset {name:?}");
                Self::default()
            }),
            None => Self::default(),
        };
        for (key, value) in table {
            if key == "name" {
                continue;
            }
            let Some(color) = parse_color(value) else {
                warn!("theme.{key}: unknown colour {value:?}");
                continue;
            };
            match key.as_str() {
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "status_pad_bg" => theme.status_pad_bg = color,
                "selected_bg" => theme.selected_bg = color,
                "selected_fg" => theme.selected_fg = color,
                "page_border" => theme.page_border = color,
                "active_border" => theme.active_border = color,
                _ => warn!("theme.{key} is not a theme colour"),
            }
        }
        theme
    }

    fn preset(name: &str) -> Option<Self> {
        let base = Self::default();
        match name {
            "gruvbox" => Some(Self {
                status_bg: Color::Yellow,
                status_fg: Color::Black,
                status_pad_bg: Color::DarkGray,
                active_border: Color::Yellow,
                ..base
            }),
            "dracula" => Some(Self {
                status_bg: Color::Magenta,
                status_fg: Color::White,
                status_pad_bg: Color::DarkGray,
                active_border: Color::Magenta,
                ..base
            }),
            "tokyonight" => Some(Self {
                status_bg: Color::Blue,
                status_fg: Color::White,
                status_pad_bg: Color::DarkGray,
                active_border: Color::Cyan,
                ..base
            }),
            "mono" => Some(Self {
                status_bg: Color::White,
                status_fg: Color::Black,
                status_pad_bg: Color::Reset,
                selected_bg: Color::White,
                selected_fg: Color::Black,
                page_border: Color::DarkGray,
                active_border: Color::White,
            }),
            _ => None,
        }
    }
}

pub fn parse_color(s: &str) -> Option<Color> {
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "darkgray" => Some(Color::DarkGray),
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::Rgb(channel(1)?, channel(3)?, channel(5)?))
        }
        _ => None,
    }
}
