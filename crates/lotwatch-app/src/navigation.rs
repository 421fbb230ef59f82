//! Screen stack for the interactive views.

use std::fmt;

/// Message shown when lot data cannot be loaded.
pub const DEFAULT_CONNECTION_ERROR: &str = "Unable to connect to parking services";

/// A screen the user can be looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Lot list.
    Home,
    /// Current status and predictions of one lot.
    LotDetails {
        /// Selected lot id.
        lot_id: String,
    },
    /// Hourly usage of one lot.
    History {
        /// Selected lot id.
        lot_id: String,
    },
    /// Upcoming campus events.
    Events,
    /// Data could not be loaded.
    ConnectionError {
        /// Human-readable reason.
        message: String,
    },
}

impl Screen {
    /// Connection error screen with the default message.
    #[must_use]
    pub fn connection_error() -> Self {
        Self::ConnectionError {
            message: DEFAULT_CONNECTION_ERROR.to_owned(),
        }
    }

    /// Title shown in the screen header.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Parking Status",
            Self::LotDetails { .. } => "Lot Details",
            Self::History { .. } => "Historical Data",
            Self::Events => "Upcoming Events",
            Self::ConnectionError { .. } => "Connection Error",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LotDetails { lot_id } | Self::History { lot_id } => {
                write!(f, "{} ({lot_id})", self.title())
            }
            _ => f.write_str(self.title()),
        }
    }
}

/// Stack of screens rooted at [`Screen::Home`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavStack {
    stack: Vec<Screen>,
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavStack {
    /// Stack holding only the home screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Home],
        }
    }

    /// Screen on top of the stack.
    #[must_use]
    pub fn current(&self) -> &Screen {
        // the root is never popped
        self.stack.last().unwrap_or(&Screen::Home)
    }

    /// Number of screens, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// True when only the home screen remains.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.stack.len() <= 1
    }

    /// Show `screen` on top of the current one.
    ///
    /// Pushing the screen that is already on top is a no-op.
    pub fn push(&mut self, screen: Screen) {
        if self.current() == &screen {
            return;
        }
        tracing::debug!(screen = %screen, "push screen");
        self.stack.push(screen);
    }

    /// Return to the previous screen. The home screen is never popped.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.is_root() {
            return None;
        }
        let popped = self.stack.pop();
        if let Some(screen) = &popped {
            tracing::debug!(screen = %screen, "pop screen");
        }
        popped
    }

    /// Drop everything above the home screen.
    pub fn reset(&mut self) {
        self.stack.truncate(1);
    }

    /// Replace the top screen, or push when at the root.
    pub fn replace(&mut self, screen: Screen) {
        if !self.is_root() {
            self.stack.pop();
        }
        self.push(screen);
    }
}
