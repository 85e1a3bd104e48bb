//! Keyboard shortcuts for timeline navigation
//!
//! A [`ShortcutMap`] resolves key combos to undo/redo actions. The default
//! table covers the common conventions (Ctrl+Z, Ctrl+Y, Ctrl+Shift+Z and
//! their macOS Cmd equivalents); hosts can extend it or replace it
//! entirely.

use serde::{Deserialize, Serialize};

/// Modifier keys held alongside a shortcut key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Control key
    pub ctrl: bool,
    /// Shift key
    pub shift: bool,
    /// Alt key
    pub alt: bool,
    /// Super key (Cmd on macOS, Windows key elsewhere)
    pub super_key: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        super_key: false,
    };

    /// Ctrl only
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
        super_key: false,
    };

    /// Shift only
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
        super_key: false,
    };

    /// Alt only
    pub const ALT: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: true,
        super_key: false,
    };

    /// Super only
    pub const SUPER: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        super_key: true,
    };

    /// Ctrl+Shift
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        alt: false,
        super_key: false,
    };

    /// Super+Shift
    pub const SUPER_SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
        super_key: true,
    };
}

/// A key plus the modifiers held with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCombo {
    /// The pressed key
    pub key: char,
    /// Modifiers held at the same time
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a combo; the key is stored lowercase
    pub fn new(key: char, modifiers: Modifiers) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            modifiers,
        }
    }

    /// Copy with the key lowercased, for case-insensitive lookup
    fn normalized(&self) -> Self {
        Self {
            key: self.key.to_ascii_lowercase(),
            modifiers: self.modifiers,
        }
    }
}

/// Timeline operation triggered by a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortcutAction {
    /// Step backward one entry
    Undo,
    /// Step forward one entry
    Redo,
}

/// A key combo bound to a timeline action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    /// The triggering combo
    pub combo: KeyCombo,
    /// The action it triggers
    pub action: ShortcutAction,
    /// Human-readable description for help overlays
    pub description: String,
}

impl Shortcut {
    /// Bind a bare key
    pub fn key(key: char, action: ShortcutAction, desc: impl Into<String>) -> Self {
        Self {
            combo: KeyCombo::new(key, Modifiers::NONE),
            action,
            description: desc.into(),
        }
    }

    /// Bind a key with modifiers
    pub fn key_mod(
        key: char,
        modifiers: Modifiers,
        action: ShortcutAction,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            combo: KeyCombo::new(key, modifiers),
            action,
            description: desc.into(),
        }
    }
}

/// The standard undo/redo bindings
pub fn default_shortcuts() -> Vec<Shortcut> {
    let mut s = Vec::with_capacity(5);

    // ==== Undo ====
    s.push(Shortcut::key_mod(
        'z',
        Modifiers::CTRL,
        ShortcutAction::Undo,
        "Undo",
    ));
    s.push(Shortcut::key_mod(
        'z',
        Modifiers::SUPER,
        ShortcutAction::Undo,
        "Undo (macOS)",
    ));

    // ==== Redo ====
    s.push(Shortcut::key_mod(
        'y',
        Modifiers::CTRL,
        ShortcutAction::Redo,
        "Redo",
    ));
    s.push(Shortcut::key_mod(
        'z',
        Modifiers::CTRL_SHIFT,
        ShortcutAction::Redo,
        "Redo",
    ));
    s.push(Shortcut::key_mod(
        'z',
        Modifiers::SUPER_SHIFT,
        ShortcutAction::Redo,
        "Redo (macOS)",
    ));

    s
}

/// Ordered shortcut table with first-match lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutMap {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutMap {
    /// Map with no bindings at all
    pub fn empty() -> Self {
        Self {
            shortcuts: Vec::new(),
        }
    }

    /// Map over an explicit binding list
    pub fn from_shortcuts(shortcuts: Vec<Shortcut>) -> Self {
        Self { shortcuts }
    }

    /// Resolve a combo to its action; the earliest matching binding wins
    pub fn resolve(&self, combo: KeyCombo) -> Option<ShortcutAction> {
        let probe = combo.normalized();
        self.shortcuts
            .iter()
            .find(|s| s.combo.normalized() == probe)
            .map(|s| s.action)
    }

    /// Add a binding that takes precedence over existing ones
    pub fn bind(&mut self, shortcut: Shortcut) {
        self.shortcuts.insert(0, shortcut);
    }

    /// All bindings in lookup order
    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    /// Check if the map has no bindings
    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self {
            shortcuts: default_shortcuts(),
        }
    }
}
