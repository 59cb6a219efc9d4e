use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by energy-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Stat cards / share bars ──────────────────────────────────────────────
    /// Filled portion when an appliance's share is below 50 %.
    pub share_low: Style,
    /// Filled portion when the share is between 50 % and 80 %.
    pub share_medium: Style,
    /// Filled portion when the share is at or above 80 %.
    pub share_high: Style,
    /// Unfilled (empty) portion of a share bar.
    pub share_empty: Style,
    pub share_label: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_bar: Style,
    pub chart_value: Style,

    // ── Seasons ──────────────────────────────────────────────────────────────
    pub season_spring: Style,
    pub season_summer: Style,
    pub season_fall: Style,
    pub season_winter: Style,
    pub season_unknown: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Chat ─────────────────────────────────────────────────────────────────
    pub chat_user: Style,
    pub chat_assistant: Style,
    pub chat_typing: Style,
    pub chat_input: Style,
    pub chat_suggestion: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            share_low: Style::default().fg(Color::Green),
            share_medium: Style::default().fg(Color::Yellow),
            share_high: Style::default().fg(Color::Red),
            share_empty: Style::default().fg(Color::DarkGray),
            share_label: Style::default().fg(Color::Gray),

            chart_bar: Style::default().fg(Color::Cyan),
            chart_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            season_spring: Style::default().fg(Color::Green),
            season_summer: Style::default().fg(Color::Yellow),
            season_fall: Style::default().fg(Color::Magenta),
            season_winter: Style::default().fg(Color::Cyan),
            season_unknown: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            chat_user: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            chat_assistant: Style::default().fg(Color::Cyan),
            chat_typing: Style::default().fg(Color::DarkGray),
            chat_input: Style::default().fg(Color::White),
            chat_suggestion: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and bright accent colours so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            share_low: Style::default().fg(Color::Green),
            share_medium: Style::default().fg(Color::Yellow),
            share_high: Style::default().fg(Color::Red),
            share_empty: Style::default().fg(Color::Gray),
            share_label: Style::default().fg(Color::DarkGray),

            chart_bar: Style::default().fg(Color::Blue),
            chart_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            season_spring: Style::default().fg(Color::Green),
            season_summer: Style::default().fg(Color::Yellow),
            season_fall: Style::default().fg(Color::Magenta),
            season_winter: Style::default().fg(Color::Blue),
            season_unknown: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            chat_user: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            chat_assistant: Style::default().fg(Color::Blue),
            chat_typing: Style::default().fg(Color::Gray),
            chat_input: Style::default().fg(Color::Black),
            chat_suggestion: Style::default().fg(Color::DarkGray),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            share_low: Style::default().fg(Color::Green),
            share_medium: Style::default().fg(Color::Yellow),
            share_high: Style::default().fg(Color::Red),
            share_empty: Style::default().fg(Color::DarkGray),
            share_label: Style::default().fg(Color::White),

            chart_bar: Style::default().fg(Color::Cyan),
            chart_value: Style::default().fg(Color::White),

            season_spring: Style::default().fg(Color::Green),
            season_summer: Style::default().fg(Color::Yellow),
            season_fall: Style::default().fg(Color::Magenta),
            season_winter: Style::default().fg(Color::Cyan),
            season_unknown: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),

            chat_user: Style::default().fg(Color::Green),
            chat_assistant: Style::default().fg(Color::Cyan),
            chat_typing: Style::default().fg(Color::DarkGray),
            chat_input: Style::default().fg(Color::White),
            chat_suggestion: Style::default().fg(Color::Gray),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Return the share-bar fill style for a given percentage of the total.
    ///
    /// * `< 50 %`  → `share_low`
    /// * `50–80 %` → `share_medium`
    /// * `≥ 80 %`  → `share_high`
    pub fn share_style(&self, percentage: f64) -> Style {
        if percentage >= 80.0 {
            self.share_high
        } else if percentage >= 50.0 {
            self.share_medium
        } else {
            self.share_low
        }
    }

    /// Return the season style that matches a raw season label.
    pub fn season_style(&self, season: &str) -> Style {
        match season.to_lowercase().as_str() {
            "spring" => self.season_spring,
            "summer" => self.season_summer,
            "fall" | "autumn" => self.season_fall,
            "winter" => self.season_winter,
            _ => self.season_unknown,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
