use crate::error::LayoutError;
use crate::layout::Layout;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum KnownLayout {
    Qwerty,
    Dvorak,
    Colemak,
    #[strum(serialize = "colemak_dh")]
    ColemakDH,
    Workman,
}

impl KnownLayout {
    // The 30-key block, top row first, in the crate's alphabet.
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Qwerty => "QWERTYUIOPASDFGHJKL;ZXCVBNM,./",
            // Dvorak's quote key has no slot here; '/' takes it.
            Self::Dvorak => "/,.PYFGCRLAOEUIDHTNS;QJKXBMWVZ",
            Self::Colemak => "QWFPGJLUY;ARSTDHNEIOZXCVBKM,./",
            Self::ColemakDH => "QWFPBJLUY;ARSTGMNEIOZXCDVKH,./",
            Self::Workman => "QDRWBJFUP;ASHTGYNEOIZXMCVKL,./",
        }
    }

    pub fn layout(&self) -> Result<Layout, LayoutError> {
        Layout::parse(self.get_str())
    }
}

pub fn get_all_layouts() -> HashMap<KnownLayout, Layout> {
    KnownLayout::iter()
        .filter_map(|known| known.layout().ok().map(|layout| (known, layout)))
        .collect()
}

/// Resolves either a known layout name or a literal 30-key string.
pub fn resolve(name_or_seq: &str) -> Result<Layout, LayoutError> {
    match name_or_seq.parse::<KnownLayout>() {
        Ok(known) => known.layout(),
        Err(_) => Layout::parse(name_or_seq),
    }
}
