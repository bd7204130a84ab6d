//! Panel configuration parser
//!
//! Minimal TOML subset, enough for `panel.toml`:
//!
//! - `[panel]`, `[refresh]` and `[demo]` section headers
//! - `key = value` pairs (string, integer, boolean)
//! - `#` comments, whole-line or trailing
//!
//! Keys outside a known section, or unknown to it, are rejected so typos
//! do not silently fall back to defaults.

use super::types::{PanelConfig, MAX_TICK_HZ};
use crate::color::Color;
use crate::topology::ScanMode;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not recognized in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Refresh,
    Demo,
}

/// Parse `panel.toml` contents, starting from the defaults
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Panel => apply_panel_key(&mut config, key, value)?,
            Section::Refresh => apply_refresh_key(&mut config, key, value)?,
            Section::Demo => apply_demo_key(&mut config, key, value)?,
        }
    }

    Ok(config)
}

fn apply_panel_key(config: &mut PanelConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "scan" => config.scan = parse_scan_mode(value)?,
        "flip_y" => config.flip_y = Some(parse_bool(value)?),
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_refresh_key(config: &mut PanelConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "tick_hz" => {
            let hz: u32 = parse_int(value)?;
            if hz == 0 || hz > MAX_TICK_HZ {
                return Err(ParseError::InvalidValue);
            }
            config.tick_hz = hz;
        }
        "interval" => config.refresh_interval_ticks = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_demo_key(config: &mut PanelConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "color" => {
            let code: u8 = parse_int(value)?;
            if code > 7 {
                return Err(ParseError::InvalidValue);
            }
            config.color = Color::new(code);
        }
        "clock_24h" => config.clock_24h = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "panel" => Ok(Section::Panel),
        "refresh" => Ok(Section::Refresh),
        "demo" => Ok(Section::Demo),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_scan_mode(value: &str) -> Result<ScanMode, ParseError> {
    match parse_string(value)? {
        "single" => Ok(ScanMode::Single),
        "dual" => Ok(ScanMode::Dual),
        _ => Err(ParseError::InvalidValue),
    }
}
