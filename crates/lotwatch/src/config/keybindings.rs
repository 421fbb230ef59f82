//! Keybindings configuration for the TUI.

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Binary-level configuration sharing the application config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TUI configuration.
    #[serde(default)]
    pub tui: TuiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

/// Keybindings for every screen.
///
/// Omitted sections fall back to their defaults, but a section that is
/// present must define every action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Lot list.
    #[serde(default)]
    pub home: HomeKeyBindings,
    /// Lot detail screen.
    #[serde(default)]
    pub lot_details: LotDetailsKeyBindings,
    /// Historical data screen.
    #[serde(default)]
    pub history: ScrollKeyBindings,
    /// Upcoming events screen.
    #[serde(default)]
    pub events: ScrollKeyBindings,
    /// Connection error screen.
    #[serde(default)]
    pub connection_error: ConnectionErrorKeyBindings,
}

/// Keybindings for the lot list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Move down in the list.
    pub down: Vec<String>,
    /// Move up in the list.
    pub up: Vec<String>,
    /// Open the selected lot.
    pub open: Vec<String>,
    /// Show upcoming events.
    pub events: Vec<String>,
    /// Reload lot data.
    pub refresh: Vec<String>,
    /// Switch between light and dark.
    pub toggle_theme: Vec<String>,
}

/// Keybindings for the lot detail screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotDetailsKeyBindings {
    /// Return to the lot list.
    pub back: Vec<String>,
    /// Show historical data.
    pub history: Vec<String>,
    /// Reload lot data.
    pub refresh: Vec<String>,
    /// Switch between light and dark.
    pub toggle_theme: Vec<String>,
}

/// Keybindings for scrollable report screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollKeyBindings {
    /// Return to the previous screen.
    pub back: Vec<String>,
    /// Scroll down.
    pub scroll_down: Vec<String>,
    /// Scroll up.
    pub scroll_up: Vec<String>,
    /// Switch between light and dark.
    pub toggle_theme: Vec<String>,
}

/// Keybindings for the connection error screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionErrorKeyBindings {
    /// Try loading again.
    pub retry: Vec<String>,
    /// Quit the application.
    pub quit: Vec<String>,
}

impl Default for HomeKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Q", "Esc"],
            down: vec_of_strings!["j", "J", "Down"],
            up: vec_of_strings!["k", "K", "Up"],
            open: vec_of_strings!["Enter", "l"],
            events: vec_of_strings!["e", "E"],
            refresh: vec_of_strings!["r", "R"],
            toggle_theme: vec_of_strings!["t", "T"],
        }
    }
}

impl Default for LotDetailsKeyBindings {
    fn default() -> Self {
        Self {
            back: vec_of_strings!["q", "Q", "Esc", "Backspace"],
            history: vec_of_strings!["h", "H"],
            refresh: vec_of_strings!["r", "R"],
            toggle_theme: vec_of_strings!["t", "T"],
        }
    }
}

impl Default for ScrollKeyBindings {
    fn default() -> Self {
        Self {
            back: vec_of_strings!["q", "Q", "Esc", "Backspace"],
            scroll_down: vec_of_strings!["j", "J", "Down"],
            scroll_up: vec_of_strings!["k", "K", "Up"],
            toggle_theme: vec_of_strings!["t", "T"],
        }
    }
}

impl Default for ConnectionErrorKeyBindings {
    fn default() -> Self {
        Self {
            retry: vec_of_strings!["r", "R", "Enter"],
            quit: vec_of_strings!["q", "Q", "Esc"],
        }
    }
}

/// Load the `[tui]` part of the configuration file.
///
/// # Returns
/// - `Ok(Some(config))` if the file exists and was successfully parsed
/// - `Ok(None)` if the file does not exist
/// - `Err(_)` if there was an error reading or parsing the file
pub fn load_config(config_path: &Path) -> Result<Option<Config>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Generate the default `[tui]` section as TOML.
pub fn generate_default_tui_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("Failed to serialize default keybindings")
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+d" -> `KeyCode::Char('d')` with CONTROL modifier
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    let parts: Vec<&str> = s.split('+').collect();
    let Some((key_part, modifier_parts)) = parts.split_last() else {
        bail!("Empty key string");
    };

    let mut modifiers = KeyModifiers::NONE;
    for &modifier in modifier_parts {
        match modifier {
            "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
            "Alt" => modifiers |= KeyModifiers::ALT,
            "Shift" => modifiers |= KeyModifiers::SHIFT,
            other => bail!("Unknown modifier: {other}"),
        }
    }

    let code = parse_key_code(key_part)?;
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "Delete" => Ok(KeyCode::Delete),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        other => bail!("Unknown key: {other}"),
    }
}

/// Screen context for keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Lot list.
    Home,
    /// Lot detail.
    LotDetails,
    /// Historical data.
    History,
    /// Upcoming events.
    Events,
    /// Connection error.
    ConnectionError,
}

impl ViewType {
    const ALL: [Self; 5] = [
        Self::Home,
        Self::LotDetails,
        Self::History,
        Self::Events,
        Self::ConnectionError,
    ];

    const fn section(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::LotDetails => "lot_details",
            Self::History => "history",
            Self::Events => "events",
            Self::ConnectionError => "connection_error",
        }
    }
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Move selection down.
    Down,
    /// Move selection up.
    Up,
    /// Open the selected lot.
    Open,
    /// Show upcoming events.
    ShowEvents,
    /// Show historical data.
    ShowHistory,
    /// Reload data.
    Refresh,
    /// Switch theme.
    ToggleTheme,
    /// Go back one screen.
    Back,
    /// Scroll down.
    ScrollDown,
    /// Scroll up.
    ScrollUp,
    /// Retry after a connection error.
    Retry,
}

impl Action {
    const fn name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Down => "down",
            Self::Up => "up",
            Self::Open => "open",
            Self::ShowEvents => "events",
            Self::ShowHistory => "history",
            Self::Refresh => "refresh",
            Self::ToggleTheme => "toggle_theme",
            Self::Back => "back",
            Self::ScrollDown => "scroll_down",
            Self::ScrollUp => "scroll_up",
            Self::Retry => "retry",
        }
    }
}

impl KeyBindingsConfig {
    /// Actions with their keys for one view, in help-text order.
    fn bindings(&self, view: ViewType) -> Vec<(Action, &[String])> {
        match view {
            ViewType::Home => vec![
                (Action::Down, self.home.down.as_slice()),
                (Action::Up, &self.home.up),
                (Action::Open, &self.home.open),
                (Action::ShowEvents, &self.home.events),
                (Action::Refresh, &self.home.refresh),
                (Action::ToggleTheme, &self.home.toggle_theme),
                (Action::Quit, &self.home.quit),
            ],
            ViewType::LotDetails => vec![
                (Action::ShowHistory, self.lot_details.history.as_slice()),
                (Action::Refresh, &self.lot_details.refresh),
                (Action::ToggleTheme, &self.lot_details.toggle_theme),
                (Action::Back, &self.lot_details.back),
            ],
            ViewType::History => Self::scroll_bindings(&self.history),
            ViewType::Events => Self::scroll_bindings(&self.events),
            ViewType::ConnectionError => vec![
                (Action::Retry, self.connection_error.retry.as_slice()),
                (Action::Quit, &self.connection_error.quit),
            ],
        }
    }

    fn scroll_bindings(keys: &ScrollKeyBindings) -> Vec<(Action, &[String])> {
        vec![
            (Action::ScrollDown, keys.scroll_down.as_slice()),
            (Action::ScrollUp, &keys.scroll_up),
            (Action::ToggleTheme, &keys.toggle_theme),
            (Action::Back, &keys.back),
        ]
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        self.bindings(view)
            .into_iter()
            .find(|(candidate, _)| *candidate == action)
            .map_or(&[], |(_, keys)| keys)
    }

    /// First key bound to `action` in `view`, as written in the config.
    pub fn first_key(&self, view: ViewType, action: Action) -> Option<&str> {
        self.get_keys(view, action).first().map(String::as_str)
    }

    /// First action in `view` bound to `key`.
    pub fn action_for(&self, view: ViewType, key: &KeyEvent) -> Option<Action> {
        self.bindings(view).into_iter().find_map(|(action, keys)| {
            keys.iter()
                .filter_map(|key_str| parse_key(key_str).ok())
                .any(|expected| Self::key_event_matches(&expected, key))
                .then_some(action)
        })
    }

    fn key_event_matches(expected: &KeyEvent, actual: &KeyEvent) -> bool {
        // Terminals report Shift on uppercase letters inconsistently.
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        let shift_insensitive = matches!(expected.code, KeyCode::Char(_));
        expected.code == actual.code
            && if shift_insensitive {
                (expected.modifiers & relevant) == (actual.modifiers & relevant)
            } else {
                expected.modifiers == actual.modifiers
            }
    }

    /// Generate help text for a specific view.
    pub fn generate_help_text(&self, view: ViewType) -> String {
        self.bindings(view)
            .into_iter()
            .map(|(action, keys)| format!("{}:{}", format_first_key(keys), help_label(view, action)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const fn help_label(view: ViewType, action: Action) -> &'static str {
    match action {
        Action::Quit => "quit",
        Action::Down => "down",
        Action::Up => "up",
        Action::Open => "open",
        Action::ShowEvents => "events",
        Action::ShowHistory => "history",
        Action::Refresh => "refresh",
        Action::ToggleTheme => "theme",
        Action::Back if matches!(view, ViewType::LotDetails) => "lots",
        Action::Back => "back",
        Action::ScrollDown => "scroll down",
        Action::ScrollUp => "scroll up",
        Action::Retry => "try again",
    }
}

fn format_first_key(keys: &[String]) -> String {
    keys.first()
        .map_or_else(|| "?".to_string(), |k| format_key_display(k))
}

/// Format a key for display, converting special keys to readable symbols.
fn format_key_display(key: &str) -> String {
    match key {
        "Enter" => "↵".to_string(),
        "Backspace" => "BS".to_string(),
        "Delete" => "Del".to_string(),
        "Up" => "↑".to_string(),
        "Down" => "↓".to_string(),
        "Left" => "←".to_string(),
        "Right" => "→".to_string(),
        "PageUp" => "PgUp".to_string(),
        "PageDown" => "PgDn".to_string(),
        other if other.starts_with("Ctrl+") || other.starts_with("Alt+") => other.replace('+', "-"),
        other => other.to_string(),
    }
}

/// Validate the TUI configuration.
///
/// Checks for:
/// - Empty key bindings
/// - Invalid key expressions
/// - Key conflicts within each view
pub fn validate_tui_config(config: &TuiConfig) -> Result<()> {
    validate_keybindings_config(&config.keybindings)
}

/// Validate the keybindings configuration.
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    for view in ViewType::ALL {
        let bindings = config.bindings(view);
        for (action, keys) in &bindings {
            let name = format!("{}.{}", view.section(), action.name());
            if keys.is_empty() {
                bail!("{name} must have at least one key binding");
            }
            for key in *keys {
                parse_key(key).with_context(|| format!("Invalid key '{key}' in {name}"))?;
            }
        }
        validate_view_keybindings(view.section(), &bindings)?;
    }
    Ok(())
}

fn validate_view_keybindings(view_name: &str, bindings: &[(Action, &[String])]) -> Result<()> {
    let mut key_to_actions: HashMap<&str, Vec<&'static str>> = HashMap::new();

    for (action, keys) in bindings {
        for key in *keys {
            key_to_actions.entry(key.as_str()).or_default().push(action.name());
        }
    }

    for (key, actions) in key_to_actions {
        if actions.len() > 1 {
            bail!("Key '{key}' is bound to multiple actions in {view_name}: {actions:?}");
        }
    }

    Ok(())
}
