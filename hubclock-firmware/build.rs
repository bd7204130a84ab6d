//! Build script for hubclock-firmware
//!
//! - Passes the linker scripts (memory.x comes from embassy-stm32)
//! - Validates panel.toml at compile time

use std::fs;
use std::path::Path;

/// Fastest tick source the refresh path is specified for
const MAX_TICK_HZ: i64 = 20_000;

fn main() {
    setup_linker();
    validate_config();
}

/// Pass the cortex-m-rt and defmt linker scripts
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds panel.toml at build time.                   ║\n\
            ║  Please create one in the hubclock-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => report("Failed to read panel.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            report("Invalid TOML syntax in panel.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    check_sections(&config, &mut errors);
    validate_panel(&config, &mut errors);
    validate_refresh(&config, &mut errors);
    validate_demo(&config, &mut errors);

    if !errors.is_empty() {
        report("Invalid panel configuration", &errors);
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Panic with a boxed error listing
fn report(title: &str, errors: &[String]) -> ! {
    let body = errors
        .iter()
        .map(|e| {
            let line = if e.len() > 62 {
                format!("{}...", &e[..59])
            } else {
                e.clone()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Only the known sections, and only tables
fn check_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".into());
        return;
    };

    for (name, value) in root {
        if !["panel", "refresh", "demo"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Keys of `section` that are not in `known`
fn check_keys(table: &toml::Table, section: &str, known: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

fn validate_panel(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(panel) = config.get("panel").and_then(|p| p.as_table()) else {
        return;
    };
    check_keys(panel, "panel", &["scan", "flip_y"], errors);

    match panel.get("scan") {
        Some(toml::Value::String(scan)) if scan == "single" || scan == "dual" => {}
        Some(_) => errors.push("[panel] scan must be \"single\" or \"dual\"".into()),
        None => {}
    }

    if let Some(flip) = panel.get("flip_y") {
        if !flip.is_bool() {
            errors.push("[panel] flip_y must be true or false".into());
        }
    }
}

fn validate_refresh(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(refresh) = config.get("refresh").and_then(|r| r.as_table()) else {
        return;
    };
    check_keys(refresh, "refresh", &["tick_hz", "interval"], errors);

    match refresh.get("tick_hz") {
        Some(toml::Value::Integer(hz)) if (1..=MAX_TICK_HZ).contains(hz) => {}
        Some(_) => errors.push(format!("[refresh] tick_hz must be 1-{}", MAX_TICK_HZ)),
        None => {}
    }

    match refresh.get("interval") {
        Some(toml::Value::Integer(n)) if *n >= 0 && *n <= u32::MAX as i64 => {}
        Some(_) => errors.push("[refresh] interval must be a non-negative integer".into()),
        None => {}
    }
}

fn validate_demo(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(demo) = config.get("demo").and_then(|d| d.as_table()) else {
        return;
    };
    check_keys(demo, "demo", &["color", "clock_24h"], errors);

    match demo.get("color") {
        Some(toml::Value::Integer(code)) if (0..=7).contains(code) => {}
        Some(_) => errors.push("[demo] color must be 0-7".into()),
        None => {}
    }

    if let Some(clock) = demo.get("clock_24h") {
        if !clock.is_bool() {
            errors.push("[demo] clock_24h must be true or false".into());
        }
    }
}
