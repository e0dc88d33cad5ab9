//! Per-node expand/collapse state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a category node in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Expansion state of a submenu.
///
/// `Expanding` and `Collapsing` last until the host reports the end of the CSS
/// height transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuNodeState {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl MenuNodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuNodeState::Collapsed => "collapsed",
            MenuNodeState::Expanding => "expanding",
            MenuNodeState::Expanded => "expanded",
            MenuNodeState::Collapsing => "collapsing",
        }
    }

    /// Value for the toggle's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> bool {
        matches!(self, MenuNodeState::Expanding | MenuNodeState::Expanded)
    }

    /// Fully open with no transition running.
    pub fn is_expanded(&self) -> bool {
        matches!(self, MenuNodeState::Expanded)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, MenuNodeState::Expanding | MenuNodeState::Collapsing)
    }

    /// Flip direction. A toggle mid-transition reverses it.
    pub fn toggled(self) -> Self {
        match self {
            MenuNodeState::Collapsed | MenuNodeState::Collapsing => MenuNodeState::Expanding,
            MenuNodeState::Expanded | MenuNodeState::Expanding => MenuNodeState::Collapsing,
        }
    }

    pub fn expanded(self) -> Self {
        match self {
            MenuNodeState::Collapsed | MenuNodeState::Collapsing => MenuNodeState::Expanding,
            other => other,
        }
    }

    pub fn collapsed(self) -> Self {
        match self {
            MenuNodeState::Expanded | MenuNodeState::Expanding => MenuNodeState::Collapsing,
            other => other,
        }
    }

    /// Settle a running transition.
    pub fn settled(self) -> Self {
        match self {
            MenuNodeState::Expanding => MenuNodeState::Expanded,
            MenuNodeState::Collapsing => MenuNodeState::Collapsed,
            other => other,
        }
    }
}
