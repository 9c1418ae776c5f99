use keymorph::config::Config;
use keymorph::consts::KEY_COUNT;
use keymorph::core_types::FixedKey;
use keymorph::error::{ConfigError, Field, KeymorphError, Site};
use rstest::rstest;
use std::io::Write;

const EXAMPLE: &str = r#"
[[fixed_key]]
val = ";"
pos = 9

[[fixed_key]]
val = ","
pos = 27

[[mutable_area]]
val = ["Z", "X", "C", "V"]
pos = [20, 21, 22, 23]
"#;

fn compile(doc: &str) -> Result<Config, ConfigError> {
    match Config::from_toml_str(doc) {
        Ok(config) => Ok(config),
        Err(KeymorphError::Config(e)) => Err(e),
        Err(other) => panic!("unexpected error: {}", other),
    }
}

/// Every value and position must be owned exactly once.
fn assert_partition(config: &Config) {
    let mut values: Vec<u8> = config.fixed_keys().iter().map(|k| k.val).collect();
    let mut positions: Vec<u8> = config.fixed_keys().iter().map(|k| k.pos).collect();
    for area in config.areas() {
        assert_eq!(area.values().len(), area.positions().len());
        values.extend_from_slice(area.values());
        positions.extend_from_slice(area.positions());
    }
    values.sort_unstable();
    positions.sort_unstable();
    assert_eq!(values, keymorph::consts::KEY_VALUES.to_vec());
    assert_eq!(positions, (0..30).collect::<Vec<u8>>());
}

#[test]
fn test_example_document() {
    let config = compile(EXAMPLE).unwrap();
    assert_partition(&config);

    assert_eq!(config.fixed_key_count(), 2);
    assert_eq!(config.fixed_keys()[0], FixedKey::new(b';', 9));
    assert_eq!(config.area_count(), 2);
    assert_eq!(config.areas()[0].values(), b"CVXZ");
    assert_eq!(config.areas()[1].len(), 24);
    assert_eq!(config.mutable_key_count(), 28);

    let weights = config.area_weights();
    assert_eq!(weights.len(), 28);
    assert_eq!(weights.iter().filter(|&&w| w == 0).count(), 4);
    assert_eq!(weights.iter().filter(|&&w| w == 1).count(), 24);
}

#[test]
fn test_empty_document_is_one_area() {
    let config = compile("").unwrap();
    assert_partition(&config);
    assert_eq!(config.fixed_key_count(), 0);
    assert_eq!(config.area_count(), 1);
    assert_eq!(config.areas()[0].len(), KEY_COUNT);
    assert_eq!(config.area_weights(), vec![0; KEY_COUNT].as_slice());
}

#[test]
fn test_unknown_fields_ignored() {
    let config = compile("title = \"mine\"\n[extra]\nx = 1\n").unwrap();
    assert_eq!(config.area_count(), 1);
}

#[test]
fn test_full_declaration_has_no_leftover() {
    let mut doc = String::from("[[mutable_area]]\nval = [");
    let vals: Vec<String> = keymorph::consts::KEY_VALUES
        .iter()
        .map(|&v| format!("\"{}\"", v as char))
        .collect();
    doc.push_str(&vals.join(", "));
    doc.push_str("]\npos = [");
    let poss: Vec<String> = (0..30).map(|p: u8| p.to_string()).collect();
    doc.push_str(&poss.join(", "));
    doc.push_str("]\n");

    let config = compile(&doc).unwrap();
    assert_partition(&config);
    assert_eq!(config.area_count(), 1);
}

#[test]
fn test_single_leftover_key_is_pinned() {
    let mut doc = String::new();
    // 27 pinned keys plus a two-key area leave 'Z' alone at position 29.
    let values = keymorph::consts::KEY_VALUES;
    for (i, &val) in values.iter().take(27).enumerate() {
        doc.push_str(&format!("[[fixed_key]]\nval = \"{}\"\npos = {}\n", val as char, i));
    }
    doc.push_str(&format!(
        "[[mutable_area]]\nval = [\"{}\", \"{}\"]\npos = [27, 28]\n",
        values[27] as char, values[28] as char
    ));

    let config = compile(&doc).unwrap();
    assert_partition(&config);
    assert_eq!(config.area_count(), 1);
    assert_eq!(config.fixed_key_count(), 28);
    assert_eq!(
        config.fixed_keys().last(),
        Some(&FixedKey::new(values[29], 29))
    );
    assert_eq!(config.area_weights(), &[0, 0]);
}

#[test]
fn test_builtin() {
    let config = Config::builtin();
    assert_partition(&config);
    assert_eq!(config.fixed_key_count(), 4);
    assert_eq!(config.area_count(), 2);
    let leftover = &config.areas()[1];
    assert_eq!(leftover.len(), 22);
    let mut positions = leftover.positions().to_vec();
    positions.sort_unstable();
    let expected: Vec<u8> = (0..30)
        .filter(|p| ![9, 20, 21, 22, 23, 27, 28, 29].contains(p))
        .collect();
    assert_eq!(positions, expected);
    assert!(leftover.values().iter().all(|v| v.is_ascii_uppercase()));
}

#[test]
fn test_typed_constructor_matches_document() {
    let fixed = [FixedKey::new(b';', 9), FixedKey::new(b',', 27)];
    let areas: [(&[u8], &[u8]); 1] = [(&b"ZXCV"[..], &[20, 21, 22, 23][..])];
    let typed = Config::new(&fixed, &areas).unwrap();
    let parsed = compile(EXAMPLE).unwrap();

    assert_eq!(typed.fixed_keys(), parsed.fixed_keys());
    assert_eq!(typed.area_weights(), parsed.area_weights());
    for (a, b) in typed.areas().iter().zip(parsed.areas()) {
        assert_eq!(a.values(), b.values());
    }
}

#[rstest]
#[case::fixed_key_not_array("fixed_key = 3", ConfigError::WrongType {
    site: Site::Root("fixed_key"), expected: "array of tables", found: "integer" })]
#[case::area_not_table("mutable_area = [1]", ConfigError::WrongType {
    site: Site::Area { index: 0 }, expected: "table", found: "integer" })]
#[case::missing_pos("[[fixed_key]]\nval = \"A\"", ConfigError::MissingField {
    site: Site::FixedKey { index: 0 }, field: "pos" })]
#[case::missing_val("[[mutable_area]]\npos = [1, 2]", ConfigError::MissingField {
    site: Site::Area { index: 0 }, field: "val" })]
#[case::val_not_string("[[fixed_key]]\nval = 1\npos = 2", ConfigError::WrongType {
    site: Site::FixedKeyField { index: 0, field: Field::Val }, expected: "string", found: "integer" })]
#[case::pos_not_integer("[[fixed_key]]\nval = \"A\"\npos = \"2\"", ConfigError::WrongType {
    site: Site::FixedKeyField { index: 0, field: Field::Pos }, expected: "integer", found: "string" })]
#[case::area_val_not_array("[[mutable_area]]\nval = \"AB\"\npos = [1, 2]", ConfigError::WrongType {
    site: Site::AreaField { index: 0, field: Field::Val }, expected: "array", found: "string" })]
#[case::lowercase("[[fixed_key]]\nval = \"a\"\npos = 0", ConfigError::IllegalKeyValue {
    site: Site::FixedKeyField { index: 0, field: Field::Val }, found: "a".to_string() })]
#[case::two_chars("[[fixed_key]]\nval = \"AB\"\npos = 0", ConfigError::IllegalKeyValue {
    site: Site::FixedKeyField { index: 0, field: Field::Val }, found: "AB".to_string() })]
#[case::position_high("[[fixed_key]]\nval = \"A\"\npos = 30", ConfigError::IllegalPosition {
    site: Site::FixedKeyField { index: 0, field: Field::Pos }, found: 30 })]
#[case::position_negative("[[mutable_area]]\nval = [\"A\", \"B\"]\npos = [0, -1]", ConfigError::IllegalPosition {
    site: Site::AreaEntry { index: 0, field: Field::Pos, slot: 1 }, found: -1 })]
#[case::length_mismatch("[[mutable_area]]\nval = [\"A\", \"B\"]\npos = [0, 1, 2]", ConfigError::LengthMismatch {
    site: Site::Area { index: 0 }, values: 2, positions: 3 })]
#[case::area_too_small("[[mutable_area]]\nval = [\"A\"]\npos = [0]", ConfigError::AreaSize {
    site: Site::Area { index: 0 }, size: 1, min: 2, max: 30 })]
#[case::duplicate_value(
    "[[fixed_key]]\nval = \"A\"\npos = 0\n[[mutable_area]]\nval = [\"B\", \"A\"]\npos = [1, 2]",
    ConfigError::DuplicateKeyValue {
        value: 'A',
        first: Site::FixedKeyField { index: 0, field: Field::Val },
        second: Site::AreaEntry { index: 0, field: Field::Val, slot: 1 },
    })]
#[case::duplicate_position(
    "[[mutable_area]]\nval = [\"A\", \"B\"]\npos = [4, 5]\n[[mutable_area]]\nval = [\"C\", \"D\"]\npos = [6, 4]",
    ConfigError::DuplicatePosition {
        position: 4,
        first: Site::AreaEntry { index: 0, field: Field::Pos, slot: 0 },
        second: Site::AreaEntry { index: 1, field: Field::Pos, slot: 1 },
    })]
fn test_rejects(#[case] doc: &str, #[case] expected: ConfigError) {
    assert_eq!(compile(doc).unwrap_err(), expected);
}

#[test]
fn test_too_few_mutable_keys() {
    let mut doc = String::new();
    for (i, &val) in keymorph::consts::KEY_VALUES.iter().take(29).enumerate() {
        doc.push_str(&format!("[[fixed_key]]\nval = \"{}\"\npos = {}\n", val as char, i));
    }
    assert_eq!(
        compile(&doc).unwrap_err(),
        ConfigError::TooFewMutableKeys {
            required: 2,
            found: 1
        }
    );
}

#[test]
fn test_error_messages_name_the_site() {
    let err = compile("[[mutable_area]]\nval = [\"A\", \"B\"]\npos = [0, 99]").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("invalid layout configuration"), "{}", msg);
    assert!(msg.contains("mutable_area[0].pos[1]"), "{}", msg);
}

#[test]
fn test_malformed_toml() {
    assert!(matches!(
        Config::from_toml_str("[[fixed_key]\nval ="),
        Err(KeymorphError::Toml(_))
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE.as_bytes()).unwrap();
    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.fixed_key_count(), 2);

    let missing = file.path().with_extension("missing");
    assert!(matches!(
        Config::load_from_file(missing),
        Err(KeymorphError::Io(_))
    ));
}
