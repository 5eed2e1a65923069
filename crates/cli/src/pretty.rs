//! Terminal rendering for subnet results.
//!
//! Human output is an aligned key/value block. JSON output follows jq
//! colour conventions:
//! - Strings: green
//! - Numbers: cyan
//! - Null: bright black (dimmed)
//! - Keys: blue

use colored::{Color, Colorize};
use subnetcalc_core::{AddressCount, Ipv4Subnet, Ipv6Subnet, SubnetResult, NOT_APPLICABLE};

/// Configuration for pretty printing.
#[derive(Debug, Clone, Copy)]
pub struct PrettyConfig {
    /// Enable colored output.
    pub color: bool,
    /// Indent string (usually 2 spaces).
    pub indent: &'static str,
    /// Compact mode (single line, no extra whitespace).
    pub compact: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            color: true,
            indent: "  ",
            compact: false,
        }
    }
}

/// Width of the label column in human output.
const LABEL_WIDTH: usize = 14;

/// Render a result as a heading plus aligned key/value lines.
pub fn render_result(result: &SubnetResult, config: &PrettyConfig) -> String {
    let (heading, rows) = match result {
        SubnetResult::V4(subnet) => (
            format!("{}{}", subnet.network, subnet.cidr),
            v4_rows(subnet),
        ),
        SubnetResult::V6(subnet) => (
            format!("{}{}", subnet.network_compressed, subnet.cidr),
            v6_rows(subnet),
        ),
    };

    let mut output = format!(
        "{} {} {}\n",
        colorize("▶", Color::Blue, config.color),
        colorize(&result.family().to_string(), Color::Green, config.color),
        colorize(&heading, Color::Yellow, config.color),
    );

    for (label, value) in rows {
        let color = if value == NOT_APPLICABLE {
            Color::BrightBlack
        } else {
            Color::Cyan
        };
        output.push_str(&format!(
            "{}{:<width$} {}\n",
            config.indent,
            label,
            colorize(&value, color, config.color),
            width = LABEL_WIDTH,
        ));
    }

    output
}

fn v4_rows(subnet: &Ipv4Subnet) -> Vec<(&'static str, String)> {
    let or_na = |addr: Option<std::net::Ipv4Addr>| {
        addr.map_or_else(|| NOT_APPLICABLE.to_string(), |a| a.to_string())
    };

    vec![
        ("address", subnet.address.to_string()),
        ("mask", subnet.mask.to_string()),
        ("wildcard", subnet.wildcard.to_string()),
        ("network", subnet.network.to_string()),
        ("broadcast", subnet.broadcast.to_string()),
        ("first usable", or_na(subnet.first_usable)),
        ("last usable", or_na(subnet.last_usable)),
        ("total", group_digits(subnet.total)),
        (
            "usable",
            subnet
                .usable
                .count()
                .map_or_else(|| subnet.usable.to_string(), group_digits),
        ),
    ]
}

fn v6_rows(subnet: &Ipv6Subnet) -> Vec<(&'static str, String)> {
    let join = |groups: &[String]| {
        if groups.is_empty() {
            NOT_APPLICABLE.to_string()
        } else {
            groups.join(":")
        }
    };
    let count = |c: AddressCount| c.exact().map_or_else(|| c.to_string(), group_digits);

    vec![
        ("address", subnet.address.clone()),
        ("network", subnet.network.clone()),
        ("compressed", subnet.network_compressed.clone()),
        ("network part", join(subnet.network_portion.as_slice())),
        ("host part", join(subnet.host_portion.as_slice())),
        ("host bits", subnet.host_bits.to_string()),
        ("total", count(subnet.total)),
        ("usable", count(subnet.usable)),
    ]
}

/// Format a count with comma thousands separators.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Pretty-print a JSON value with colors.
pub fn pretty_json(value: &serde_json::Value, config: &PrettyConfig) -> String {
    let mut output = String::new();
    format_json_value(value, config, 0, &mut output);
    output
}

fn format_json_value(
    value: &serde_json::Value,
    config: &PrettyConfig,
    depth: usize,
    output: &mut String,
) {
    match value {
        serde_json::Value::Null => {
            output.push_str(&colorize("null", Color::BrightBlack, config.color));
        }
        serde_json::Value::Bool(b) => {
            output.push_str(&colorize(&b.to_string(), Color::Yellow, config.color));
        }
        serde_json::Value::Number(n) => {
            output.push_str(&colorize(&n.to_string(), Color::Cyan, config.color));
        }
        serde_json::Value::String(s) => {
            // serde_json's Display produces the quoted, escaped literal
            let literal = serde_json::Value::String(s.clone()).to_string();
            output.push_str(&colorize(&literal, Color::Green, config.color));
        }
        serde_json::Value::Array(arr) => {
            // Hextet lists stay on one line
            let flat = config.compact || arr.iter().all(|v| !v.is_array() && !v.is_object());
            let items = arr.iter().map(|item| (None, item));
            format_json_seq(('[', ']'), items, arr.len(), flat, config, depth, output);
        }
        serde_json::Value::Object(obj) => {
            let items = obj.iter().map(|(k, v)| (Some(k.as_str()), v));
            format_json_seq(('{', '}'), items, obj.len(), config.compact, config, depth, output);
        }
    }
}

fn format_json_seq<'a>(
    (open, close): (char, char),
    items: impl Iterator<Item = (Option<&'a str>, &'a serde_json::Value)>,
    len: usize,
    flat: bool,
    config: &PrettyConfig,
    depth: usize,
    output: &mut String,
) {
    output.push(open);
    if len == 0 {
        output.push(close);
        return;
    }

    for (i, (key, value)) in items.enumerate() {
        if i > 0 {
            output.push(',');
            if flat {
                output.push(' ');
            }
        }
        if !flat {
            output.push('\n');
            output.push_str(&config.indent.repeat(depth + 1));
        }
        if let Some(key) = key {
            let literal = serde_json::Value::String(key.to_string()).to_string();
            output.push_str(&colorize(&literal, Color::Blue, config.color));
            output.push_str(": ");
        }
        format_json_value(value, config, depth + 1, output);
    }

    if !flat {
        output.push('\n');
        output.push_str(&config.indent.repeat(depth));
    }
    output.push(close);
}

fn colorize(s: &str, color: Color, enabled: bool) -> String {
    if enabled {
        s.color(color).to_string()
    } else {
        s.to_string()
    }
}
