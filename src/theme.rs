//! Light and dark colour schemes.

use serde::Serialize;

use crate::models::{Badge, Hex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shades {
    pub main: Hex,
    pub light: Hex,
    pub dark: Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Backgrounds {
    pub primary: Hex,
    pub secondary: Hex,
    pub card: Hex,
    pub elevated: Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextColors {
    pub primary: Hex,
    pub secondary: Hex,
    pub tertiary: Hex,
    pub inverse: Hex,
    pub disabled: Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Borders {
    pub primary: Hex,
    pub secondary: Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusColors {
    pub success: Hex,
    pub warning: Hex,
    pub error: Hex,
    pub info: Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: Shades,
    pub background: Backgrounds,
    pub text: TextColors,
    pub border: Borders,
    pub status: StatusColors,
}

const STATUS: StatusColors = StatusColors {
    success: "#10b981",
    warning: "#f59e0b",
    error: "#ef4444",
    info: "#3b82f6",
};

pub const LIGHT: Palette = Palette {
    primary: Shades {
        main: "#138aec",
        light: "#4da3f0",
        dark: "#0d6bc4",
    },
    background: Backgrounds {
        primary: "#f6f7f8",
        secondary: "#ffffff",
        card: "#ffffff",
        elevated: "#ffffff",
    },
    text: TextColors {
        primary: "#212529",
        secondary: "#6c757d",
        tertiary: "#adb5bd",
        inverse: "#ffffff",
        disabled: "#adb5bd",
    },
    border: Borders {
        primary: "#e9ecef",
        secondary: "#dee2e6",
    },
    status: STATUS,
};

pub const DARK: Palette = Palette {
    primary: Shades {
        main: "#4da3f0",
        light: "#6bb5f3",
        dark: "#138aec",
    },
    background: Backgrounds {
        primary: "#0f172a",
        secondary: "#1e293b",
        card: "#1e293b",
        elevated: "#2d3b4e",
    },
    text: TextColors {
        primary: "#f8f9fa",
        secondary: "#cbd5e1",
        tertiary: "#94a3b8",
        inverse: "#0f172a",
        disabled: "#64748b",
    },
    border: Borders {
        primary: "#334155",
        secondary: "#475569",
    },
    status: STATUS,
};

impl Palette {
    pub fn for_mode(is_dark_mode: bool) -> &'static Palette {
        if is_dark_mode { &DARK } else { &LIGHT }
    }

    /// Foreground colour for a badge variant.
    pub fn badge(&self, badge: Badge) -> Hex {
        match badge {
            Badge::Success => self.status.success,
            Badge::Warning => self.status.warning,
            Badge::Danger => self.status.error,
            Badge::Info => self.status.info,
            Badge::Default => self.text.secondary,
        }
    }
}
