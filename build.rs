use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The navigator rejects even spans, so catch that here rather than at startup
    if let Some(size) = table
        .get("navigation")
        .and_then(|nav| nav.get("window_size"))
        .and_then(|v| v.as_integer())
    {
        if size < 1 || size % 2 == 0 {
            panic!("navigation.window_size must be an odd integer >= 1, got {}", size);
        }
    }
}
