use std::{fmt, path::Path, str::FromStr};

use bricks_engine::{Command, GameConfig};
use crossterm::event::KeyCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::util;

/// Everything the `play` command reads from a configuration file.
///
/// The game settings sit at the top level of the JSON object next to `keys`.
/// Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CliConfig {
    #[serde(flatten)]
    pub(crate) game: GameConfig,
    #[serde(default)]
    pub(crate) keys: KeyBindings,
}

impl CliConfig {
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config: Self = match path {
            Some(path) => util::read_json_file("config", path)?,
            None => Self::default(),
        };
        config.game.validate()?;
        Ok(config)
    }
}

/// A key name as written in the configuration file.
///
/// Either a single character (`"h"`, `"p"`) or one of the named keys
/// `Left`, `Right`, `Up`, `Down`, `Space`, `Enter`, `Tab`, `Esc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Key(KeyCode);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown key '{name}'")]
pub(crate) struct UnknownKeyError {
    name: String,
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Space", KeyCode::Char(' ')),
    ("Enter", KeyCode::Enter),
    ("Tab", KeyCode::Tab),
    ("Esc", KeyCode::Esc),
];

impl Key {
    pub(crate) const fn new(code: KeyCode) -> Self {
        Self(code)
    }

    pub(crate) const fn char(c: char) -> Self {
        Self(KeyCode::Char(c))
    }

    pub(crate) fn code(self) -> KeyCode {
        self.0
    }
}

impl FromStr for Key {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| *name == s) {
            return Ok(Self(*code));
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != ' ' => Ok(Self::char(c)),
            _ => Err(UnknownKeyError { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, code)| *code == self.0) {
            return f.write_str(name);
        }
        match self.0 {
            KeyCode::Char(c) => write!(f, "{c}"),
            code => write!(f, "{code}"),
        }
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Keys mapped to each player command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct KeyBindings {
    pub(crate) left: Vec<Key>,
    pub(crate) right: Vec<Key>,
    pub(crate) down: Vec<Key>,
    pub(crate) rotate: Vec<Key>,
    pub(crate) pause: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![Key::new(KeyCode::Left), Key::char('h')],
            right: vec![Key::new(KeyCode::Right), Key::char('l')],
            down: vec![Key::new(KeyCode::Down), Key::char('j')],
            rotate: vec![Key::new(KeyCode::Up), Key::char('k')],
            pause: vec![Key::char('p')],
        }
    }
}

impl KeyBindings {
    fn entries(&self) -> [(Command, &[Key]); 5] {
        [
            (Command::Left, self.left.as_slice()),
            (Command::Right, self.right.as_slice()),
            (Command::Down, self.down.as_slice()),
            (Command::Rotate, self.rotate.as_slice()),
            (Command::Pause, self.pause.as_slice()),
        ]
    }

    /// Command bound to `code`, if any. The first matching command wins.
    pub(crate) fn command_for(&self, code: KeyCode) -> Option<Command> {
        self.entries()
            .into_iter()
            .find(|(_, keys)| keys.iter().any(|key| key.code() == code))
            .map(|(command, _)| command)
    }

    pub(crate) fn keys_for(&self, command: Command) -> &[Key] {
        self.entries()
            .into_iter()
            .find_map(|(c, keys)| (c == command).then_some(keys))
            .unwrap_or_default()
    }
}
