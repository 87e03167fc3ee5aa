//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings only apply to the normal (screen) mode. Text entry in search,
//! the form and the go-to prompt uses fixed keys.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the help overlay.
    OpenHelp,
    /// Start filtering the list by name.
    StartSearch,
    /// Open the form in create mode.
    NewUser,
    /// Open the form seeded with the selected user.
    EditSelection,
    /// Ask to delete the selected user.
    DeleteSelection,
    /// Navigate to the selected user's detail screen.
    OpenDetails,
    /// Return to the previous route.
    Back,
    /// Re-activate the current screen, fetching again.
    Reload,
    /// Open the go-to prompt to type a route path.
    GoTo,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Swallow the key.
    Ignore,
}

const ACTIONS: [(KeyAction, &str); 15] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::NewUser, "NewUser"),
    (KeyAction::EditSelection, "EditSelection"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::OpenDetails, "OpenDetails"),
    (KeyAction::Back, "Back"),
    (KeyAction::Reload, "Reload"),
    (KeyAction::GoTo, "GoTo"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PageUp, "PageUp"),
    (KeyAction::PageDown, "PageDown"),
    (KeyAction::Ignore, "Ignore"),
];

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows and vim keys for movement, single letters for actions.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Enter), KeyAction::OpenDetails);
        bindings.insert((M::NONE, Esc), KeyAction::Back);
        bindings.insert((M::NONE, Backspace), KeyAction::Back);
        bindings.insert((M::NONE, Char('r')), KeyAction::Reload);
        bindings.insert((M::NONE, Char('g')), KeyAction::GoTo);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PageUp);
        bindings.insert((M::NONE, Char('l')), KeyAction::PageDown);
        Self { bindings }
    }

    /// Load from `path`; if it is missing, try the config dir, and finally write defaults to `path`.
    pub fn load_or_init(path: &str) -> Self {
        let source = if std::path::Path::new(path).exists() {
            Some(path.to_string())
        } else {
            crate::config::config_file_read_path("keybinds.conf")
        };
        if let Some(source) = source {
            return Self::from_file(&source).unwrap_or_else(Self::new_defaults);
        }
        let keymap = Self::new_defaults();
        if let Err(e) = keymap.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default keybindings");
        }
        keymap
    }

    pub fn from_file(path: &str) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|c| Self::parse(&c))
    }

    /// Apply `Action = KeySpec` lines on top of the defaults. Unknown actions
    /// and unparsable keys are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut keymap = Self::new_defaults();
        let entries = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|l| l.split_once('='))
            .filter_map(|(lhs, rhs)| Some((parse_key(rhs)?, parse_action(lhs)?)));
        keymap.bindings.extend(entries);
        keymap
    }

    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# usrdesk keybindings\n");
        buf.push_str("# One binding per line: Action = Key\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Tab, Up, Down, Left, Right, PageUp, PageDown, Delete, Backspace\n");
        buf.push_str("# Actions: ");
        buf.push_str(&ACTIONS.iter().map(|(_, n)| *n).collect::<Vec<_>>().join(", "));
        buf.push_str("\n\n");

        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| format!("{} = {}", format_action(*action), Self::format_key(*mods, *code)))
            .collect();
        lines.sort();
        for line in lines {
            let _ = writeln!(&mut buf, "{line}");
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Keys bound to `action`, formatted and sorted, for the help overlay.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Human-readable key spec such as `Ctrl+c` or `PageDown`.
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        let base = match code {
            KeyCode::Char(c) => c.to_string(),
            other => NAMED_KEYS
                .iter()
                .find(|(_, k)| *k == other)
                .map(|(name, _)| name.to_string())
                .unwrap_or_else(|| format!("{other:?}")),
        };
        if mods.contains(KeyModifiers::CONTROL) { format!("Ctrl+{base}") } else { base }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

/// Spec names for non-character keys. The first name listed for a key is the one written out.
const NAMED_KEYS: [(&str, KeyCode); 13] = [
    ("Enter", KeyCode::Enter),
    ("Delete", KeyCode::Delete),
    ("Backspace", KeyCode::Backspace),
    ("Esc", KeyCode::Esc),
    ("Escape", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("BackTab", KeyCode::BackTab),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
];

/// `q`, `Ctrl+c`, `PageDown`, ...
fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    let spec = spec.trim();
    let (mods, rest) = spec
        .strip_prefix("Ctrl+")
        .map_or((KeyModifiers::NONE, spec), |r| (KeyModifiers::CONTROL, r));
    if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| *name == rest) {
        return Some((mods, *code));
    }
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some((mods, KeyCode::Char(c))),
        _ => None,
    }
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTIONS.iter().find(|(_, name)| *name == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTIONS
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, name)| *name)
        .unwrap_or("Ignore")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_cover_screen_actions() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&press(KeyCode::Char('n'))), Some(KeyAction::NewUser));
        assert_eq!(km.resolve(&press(KeyCode::Enter)), Some(KeyAction::OpenDetails));
        assert_eq!(km.resolve(&press(KeyCode::Esc)), Some(KeyAction::Back));
        assert_eq!(km.resolve(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(KeyAction::Quit));
    }

    #[test]
    fn config_overrides_defaults() {
        let km = Keymap::parse("# remap\nNewUser = a\nQuit = Ctrl+x\nNonsense = z\nEditSelection = two\n");
        assert_eq!(km.resolve(&press(KeyCode::Char('a'))), Some(KeyAction::NewUser));
        assert_eq!(km.resolve(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let km = Keymap::default();
        assert_eq!(km.keys_for(KeyAction::DeleteSelection), vec!["Delete".to_string(), "d".to_string()]);
    }

    #[test]
    fn action_names_roundtrip() {
        for (action, name) in ACTIONS {
            assert_eq!(parse_action(name), Some(action));
            assert_eq!(format_action(action), name);
        }
    }
}
