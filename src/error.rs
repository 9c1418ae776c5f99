use crate::core_types::Position;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("illegal layout \"{input}\": incorrect length: expected {expected}, got {actual}")]
    Length {
        input: String,
        expected: usize,
        actual: usize,
    },

    #[error("illegal layout \"{input}\": invalid key value '{ch}'")]
    IllegalChar { input: String, ch: char },

    #[error("illegal layout \"{input}\": duplicate key value '{ch}'")]
    Duplicate { input: String, ch: char },
}

/// Which array of an area declaration an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Val,
    Pos,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Val => "val",
            Self::Pos => "pos",
        }
    }
}

/// Location of an entry inside a layout configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    /// The top-level `fixed_key` or `mutable_area` array itself.
    Root(&'static str),
    FixedKey {
        index: usize,
    },
    FixedKeyField {
        index: usize,
        field: Field,
    },
    Area {
        index: usize,
    },
    AreaField {
        index: usize,
        field: Field,
    },
    AreaEntry {
        index: usize,
        field: Field,
        slot: usize,
    },
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root(name) => write!(f, "{}", name),
            Self::FixedKey { index } => write!(f, "fixed_key[{}]", index),
            Self::FixedKeyField { index, field } => {
                write!(f, "fixed_key[{}].{}", index, field.name())
            }
            Self::Area { index } => write!(f, "mutable_area[{}]", index),
            Self::AreaField { index, field } => {
                write!(f, "mutable_area[{}].{}", index, field.name())
            }
            Self::AreaEntry { index, field, slot } => {
                write!(f, "mutable_area[{}].{}[{}]", index, field.name(), slot)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid layout configuration: missing field `{field}` in {site}")]
    MissingField { site: Site, field: &'static str },

    #[error("invalid layout configuration: illegal type for {site}: expected {expected}, got {found}")]
    WrongType {
        site: Site,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid layout configuration: mismatched field size in {site}: `val` has {values} entries, `pos` has {positions}")]
    LengthMismatch {
        site: Site,
        values: usize,
        positions: usize,
    },

    #[error("invalid layout configuration: illegal size {size} for {site}: should be in range [{min}, {max}]")]
    AreaSize {
        site: Site,
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid layout configuration: illegal key value \"{found}\" at {site}: should be a capital letter or one of ',', '.', ';', '/'")]
    IllegalKeyValue { site: Site, found: String },

    #[error("invalid layout configuration: position {found} at {site} out of range [0, 29]")]
    IllegalPosition { site: Site, found: i64 },

    #[error("invalid layout configuration: duplicate key value '{value}' at {first} and {second}")]
    DuplicateKeyValue {
        value: char,
        first: Site,
        second: Site,
    },

    #[error("invalid layout configuration: duplicate position {position} at {first} and {second}")]
    DuplicatePosition {
        position: Position,
        first: Site,
        second: Site,
    },

    #[error("invalid layout configuration: unable to generate adequate samples: required at least {required} mutable keys, got {found}")]
    TooFewMutableKeys { required: usize, found: usize },
}

#[derive(Error, Debug)]
pub enum KeymorphError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML Parsing Error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("layout \"{0}\" does not fit the configured partition")]
    Unmanageable(String),
}

pub type KmResult<T> = Result<T, KeymorphError>;
