use std::fs;

/// Keys of the bundled config and the TOML type each must have.
const SCHEMA: &[(&str, &str, &str)] = &[
    ("output", "pretty", "boolean"),
    ("output", "indent", "integer"),
    ("code", "language_class", "boolean"),
];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={config_path}");

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    for &(section, key, kind) in SCHEMA {
        let value = table
            .get(section)
            .and_then(|s| s.get(key))
            .unwrap_or_else(|| panic!("default_config.toml is missing [{section}] {key}"));
        if value.type_str() != kind {
            panic!(
                "default_config.toml: [{section}] {key} must be a {kind}, found {}",
                value.type_str()
            );
        }
    }

    if table["output"]["indent"].as_integer().is_some_and(|indent| indent < 0) {
        panic!("default_config.toml: [output] indent must not be negative");
    }
}
