use crate::area::Area;
use crate::consts::{
    KEY_COUNT, KEY_VALUES, MAX_AREA_SIZE, MIN_AREA_SIZE, MIN_MUTABLE_KEYS, POSITIONS, TABLE_SIZE,
};
use crate::core_types::{FixedKey, KeyValue, Position};
use crate::error::{ConfigError, Field, KmResult, Site};
use crate::util::is_key_value_legal;
use std::fs;
use std::path::Path;
use toml::{Table, Value};
use tracing::{debug, info, warn};

pub const FIXED_KEY_FIELD: &str = "fixed_key";
pub const MUTABLE_AREA_FIELD: &str = "mutable_area";
pub const VALUE_FIELD: &str = "val";
pub const POSITION_FIELD: &str = "pos";

/// A compiled partition of the 30 keys.
///
/// Every key value and every position belongs to exactly one fixed key or
/// exactly one area. Keys not claimed by the declaration end up in a trailing
/// leftover area.
#[derive(Debug, Clone)]
pub struct Config {
    areas: Vec<Area>,
    fixed_keys: Vec<FixedKey>,
    /// Each area index repeated once per key the area owns.
    area_weights: Vec<usize>,
}

impl Config {
    /// Compiles a parsed TOML document.
    ///
    /// ```toml
    /// [[fixed_key]]
    /// val = ";"
    /// pos = 9
    ///
    /// [[mutable_area]]
    /// val = ["Z", "X", "C", "V"]
    /// pos = [20, 21, 22, 23]
    /// ```
    ///
    /// Unknown top-level fields are ignored. A document with neither array
    /// yields one area covering all 30 keys.
    pub fn from_document(doc: &Table) -> Result<Self, ConfigError> {
        let mut claims = Claims::new();

        let mut fixed_keys = Vec::new();
        for (index, entry) in entries(doc, FIXED_KEY_FIELD)?.iter().enumerate() {
            let table = as_table(entry, Site::FixedKey { index })?;
            let (raw_val, raw_pos) = required_fields(table, Site::FixedKey { index })?;
            let val = claims.parse_value(
                raw_val,
                Site::FixedKeyField {
                    index,
                    field: Field::Val,
                },
            )?;
            let pos = claims.parse_position(
                raw_pos,
                Site::FixedKeyField {
                    index,
                    field: Field::Pos,
                },
            )?;
            fixed_keys.push(FixedKey::new(val, pos));
        }
        check_mutable_key_count(fixed_keys.len())?;

        let mut declared = Vec::new();
        for (index, entry) in entries(doc, MUTABLE_AREA_FIELD)?.iter().enumerate() {
            let table = as_table(entry, Site::Area { index })?;
            declared.push(claims.parse_area(index, table)?);
        }

        Ok(Self::assemble(claims, fixed_keys, declared))
    }

    pub fn from_toml_str(s: &str) -> KmResult<Self> {
        let doc: Table = toml::from_str(s)?;
        Ok(Self::from_document(&doc)?)
    }

    /// Reads and compiles the configuration at `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KmResult<Self> {
        let path = path.as_ref();
        info!("Loading layout configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Typed counterpart of `from_document`, with the same validation.
    pub fn new(
        fixed_keys: &[FixedKey],
        areas: &[(&[KeyValue], &[Position])],
    ) -> Result<Self, ConfigError> {
        let mut claims = Claims::new();

        for (index, key) in fixed_keys.iter().enumerate() {
            claims.claim_value(
                key.val,
                Site::FixedKeyField {
                    index,
                    field: Field::Val,
                },
            )?;
            claims.claim_position(
                key.pos as i64,
                Site::FixedKeyField {
                    index,
                    field: Field::Pos,
                },
            )?;
        }
        check_mutable_key_count(fixed_keys.len())?;

        let mut declared = Vec::with_capacity(areas.len());
        for (index, (values, positions)) in areas.iter().enumerate() {
            declared.push(claims.claim_area(index, values, positions)?);
        }

        Ok(Self::assemble(claims, fixed_keys.to_vec(), declared))
    }

    /// The built-in partition: `;` `,` `.` `/` pinned to 9, 27, 28 and 29,
    /// `Z` `X` `C` `V` permuted among 20..=23, everything else free.
    pub fn builtin() -> Self {
        let fixed_keys = [
            FixedKey::new(b';', 9),
            FixedKey::new(b',', 27),
            FixedKey::new(b'.', 28),
            FixedKey::new(b'/', 29),
        ];
        let areas: [(&[KeyValue], &[Position]); 1] = [(&b"ZXCV"[..], &[20, 21, 22, 23][..])];
        Self::new(&fixed_keys, &areas).expect("built-in layout configuration is valid")
    }

    fn assemble(
        claims: Claims,
        mut fixed_keys: Vec<FixedKey>,
        declared: Vec<(Vec<KeyValue>, Vec<Position>)>,
    ) -> Self {
        let mut areas: Vec<Area> = declared
            .into_iter()
            .map(|(values, positions)| Area::from_parts(values, positions))
            .collect();

        let values = claims.unclaimed_values();
        let positions = claims.unclaimed_positions();
        debug_assert_eq!(values.len(), positions.len());

        match values.len() {
            0 => {}
            1 => {
                // A one-key area has nothing to swap with.
                warn!(
                    "Only '{}' at position {} is left unclaimed; pinning it",
                    values[0] as char, positions[0]
                );
                fixed_keys.push(FixedKey::new(values[0], positions[0]));
            }
            n => {
                debug!("Deriving leftover area with {} keys", n);
                areas.push(Area::from_parts(values, positions));
            }
        }

        let area_weights: Vec<usize> = areas
            .iter()
            .enumerate()
            .flat_map(|(id, area)| std::iter::repeat(id).take(area.len()))
            .collect();

        debug!(
            fixed = fixed_keys.len(),
            areas = areas.len(),
            mutable = area_weights.len(),
            "Compiled layout configuration"
        );

        Self {
            areas,
            fixed_keys,
            area_weights,
        }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub(crate) fn areas_mut(&mut self) -> &mut [Area] {
        &mut self.areas
    }

    pub fn fixed_keys(&self) -> &[FixedKey] {
        &self.fixed_keys
    }

    pub fn area_weights(&self) -> &[usize] {
        &self.area_weights
    }

    pub fn mutable_key_count(&self) -> usize {
        self.area_weights.len()
    }

    pub fn fixed_key_count(&self) -> usize {
        self.fixed_keys.len()
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_mutable_key_count(fixed: usize) -> Result<(), ConfigError> {
    let found = KEY_COUNT.saturating_sub(fixed);
    if found < MIN_MUTABLE_KEYS {
        return Err(ConfigError::TooFewMutableKeys {
            required: MIN_MUTABLE_KEYS,
            found,
        });
    }
    Ok(())
}

fn check_area_shape(
    site: Site,
    values: usize,
    positions: usize,
) -> Result<(), ConfigError> {
    if values != positions {
        return Err(ConfigError::LengthMismatch {
            site,
            values,
            positions,
        });
    }
    if !(MIN_AREA_SIZE..=MAX_AREA_SIZE).contains(&values) {
        return Err(ConfigError::AreaSize {
            site,
            size: values,
            min: MIN_AREA_SIZE,
            max: MAX_AREA_SIZE,
        });
    }
    Ok(())
}

fn entries<'a>(doc: &'a Table, field: &'static str) -> Result<&'a [Value], ConfigError> {
    match doc.get(field) {
        None => Ok(&[]),
        Some(value) => value
            .as_array()
            .map(|array| array.as_slice())
            .ok_or(ConfigError::WrongType {
                site: Site::Root(field),
                expected: "array of tables",
                found: value.type_str(),
            }),
    }
}

fn as_table(value: &Value, site: Site) -> Result<&Table, ConfigError> {
    value.as_table().ok_or(ConfigError::WrongType {
        site,
        expected: "table",
        found: value.type_str(),
    })
}

fn required_fields(table: &Table, site: Site) -> Result<(&Value, &Value), ConfigError> {
    let val = table.get(VALUE_FIELD).ok_or(ConfigError::MissingField {
        site,
        field: VALUE_FIELD,
    })?;
    let pos = table.get(POSITION_FIELD).ok_or(ConfigError::MissingField {
        site,
        field: POSITION_FIELD,
    })?;
    Ok((val, pos))
}

fn as_array(value: &Value, site: Site) -> Result<&[Value], ConfigError> {
    value
        .as_array()
        .map(|array| array.as_slice())
        .ok_or(ConfigError::WrongType {
            site,
            expected: "array",
            found: value.type_str(),
        })
}

/// Tracks which declaration entry owns each key value and position.
///
/// Indexed like a `Layout` table: positions and key values share one array
/// without colliding.
pub(crate) struct Claims {
    owners: [Option<Site>; TABLE_SIZE],
}

impl Claims {
    pub(crate) fn new() -> Self {
        Self {
            owners: [None; TABLE_SIZE],
        }
    }

    pub(crate) fn claim_value(&mut self, val: KeyValue, site: Site) -> Result<KeyValue, ConfigError> {
        if !is_key_value_legal(val) {
            return Err(ConfigError::IllegalKeyValue {
                site,
                found: (val as char).to_string(),
            });
        }
        if let Some(first) = self.owners[val as usize] {
            return Err(ConfigError::DuplicateKeyValue {
                value: val as char,
                first,
                second: site,
            });
        }
        self.owners[val as usize] = Some(site);
        Ok(val)
    }

    pub(crate) fn claim_position(&mut self, pos: i64, site: Site) -> Result<Position, ConfigError> {
        if !(0..KEY_COUNT as i64).contains(&pos) {
            return Err(ConfigError::IllegalPosition { site, found: pos });
        }
        let pos = pos as Position;
        if let Some(first) = self.owners[pos as usize] {
            return Err(ConfigError::DuplicatePosition {
                position: pos,
                first,
                second: site,
            });
        }
        self.owners[pos as usize] = Some(site);
        Ok(pos)
    }

    fn parse_value(&mut self, raw: &Value, site: Site) -> Result<KeyValue, ConfigError> {
        let s = raw.as_str().ok_or(ConfigError::WrongType {
            site,
            expected: "string",
            found: raw.type_str(),
        })?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii() => self.claim_value(ch as KeyValue, site),
            _ => Err(ConfigError::IllegalKeyValue {
                site,
                found: s.to_string(),
            }),
        }
    }

    fn parse_position(&mut self, raw: &Value, site: Site) -> Result<Position, ConfigError> {
        let pos = raw.as_integer().ok_or(ConfigError::WrongType {
            site,
            expected: "integer",
            found: raw.type_str(),
        })?;
        self.claim_position(pos, site)
    }

    /// Validates one `[[mutable_area]]` table.
    pub(crate) fn parse_area(
        &mut self,
        index: usize,
        table: &Table,
    ) -> Result<(Vec<KeyValue>, Vec<Position>), ConfigError> {
        let (raw_vals, raw_poss) = required_fields(table, Site::Area { index })?;
        let raw_vals = as_array(
            raw_vals,
            Site::AreaField {
                index,
                field: Field::Val,
            },
        )?;
        let raw_poss = as_array(
            raw_poss,
            Site::AreaField {
                index,
                field: Field::Pos,
            },
        )?;
        check_area_shape(Site::Area { index }, raw_vals.len(), raw_poss.len())?;

        let values = raw_vals
            .iter()
            .enumerate()
            .map(|(slot, raw)| {
                self.parse_value(
                    raw,
                    Site::AreaEntry {
                        index,
                        field: Field::Val,
                        slot,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let positions = raw_poss
            .iter()
            .enumerate()
            .map(|(slot, raw)| {
                self.parse_position(
                    raw,
                    Site::AreaEntry {
                        index,
                        field: Field::Pos,
                        slot,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((values, positions))
    }

    /// Typed counterpart of `parse_area`.
    pub(crate) fn claim_area(
        &mut self,
        index: usize,
        values: &[KeyValue],
        positions: &[Position],
    ) -> Result<(Vec<KeyValue>, Vec<Position>), ConfigError> {
        check_area_shape(Site::Area { index }, values.len(), positions.len())?;
        for (slot, &val) in values.iter().enumerate() {
            self.claim_value(
                val,
                Site::AreaEntry {
                    index,
                    field: Field::Val,
                    slot,
                },
            )?;
        }
        for (slot, &pos) in positions.iter().enumerate() {
            self.claim_position(
                pos as i64,
                Site::AreaEntry {
                    index,
                    field: Field::Pos,
                    slot,
                },
            )?;
        }
        Ok((values.to_vec(), positions.to_vec()))
    }

    fn unclaimed_values(&self) -> Vec<KeyValue> {
        KEY_VALUES
            .iter()
            .copied()
            .filter(|&val| self.owners[val as usize].is_none())
            .collect()
    }

    fn unclaimed_positions(&self) -> Vec<Position> {
        POSITIONS
            .iter()
            .copied()
            .filter(|&pos| self.owners[pos as usize].is_none())
            .collect()
    }
}
