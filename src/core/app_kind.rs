use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Application variants the desktop can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppKind {
    Terminal,
    Files,
    Docs,
    Monitor,
    Settings,
    Browser,
    ChatAgent,
}

impl AppKind {
    /// Every launchable kind in desktop icon order.
    pub const ALL: [AppKind; 7] = [
        Self::ChatAgent,
        Self::Terminal,
        Self::Browser,
        Self::Files,
        Self::Docs,
        Self::Monitor,
        Self::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Files => "files",
            Self::Docs => "docs",
            Self::Monitor => "monitor",
            Self::Settings => "settings",
            Self::Browser => "browser",
            Self::ChatAgent => "chat-agent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "terminal" => Self::Terminal,
            "files" => Self::Files,
            "docs" => Self::Docs,
            "monitor" => Self::Monitor,
            "settings" => Self::Settings,
            "browser" => Self::Browser,
            "chat-agent" => Self::ChatAgent,
            _ => return None,
        })
    }

    /// Title used when the app is launched from its desktop icon.
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Terminal => "Terminal",
            Self::Files => "File Manager",
            Self::Docs => "Documentation",
            Self::Monitor => "System Monitor",
            Self::Settings => "Settings",
            Self::Browser => "Chrome",
            Self::ChatAgent => "CodeAI Agent",
        }
    }

    /// Terminals and chat agents may have any number of windows; every other
    /// kind is limited to one.
    pub fn is_multi_instance(&self) -> bool {
        matches!(self, Self::Terminal | Self::ChatAgent)
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`AppKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown app kind '{0}'")]
pub struct UnknownAppKind(pub String);

impl FromStr for AppKind {
    type Err = UnknownAppKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value.trim()).ok_or_else(|| UnknownAppKind(value.to_string()))
    }
}
