//! Rendering of the files chef-solo reads from the sandbox.

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::domain::defaults::ResolvedConfig;

/// Local chef-zero endpoint written as `chef_server_url`.
pub const CHEF_SERVER_URL: &str = "http://127.0.0.1:8889";

/// Name of the node attributes file placed next to the config file.
pub const DNA_FILENAME: &str = "dna.json";

/// Settings written to `solo.rb` before the user's `solo_rb` overrides.
#[must_use]
pub fn default_config_rb(config: &ResolvedConfig) -> Vec<(String, Value)> {
    let root = if config.platform.windows_os() {
        config.root_path.replace("$env:TEMP", "#{ENV['TEMP']}")
    } else {
        config.root_path.clone()
    };
    let path = |leaf: &str| Value::String(config.remote_path_join([root.as_str(), leaf]));

    let mut data = Vec::new();
    if let Some(name) = &config.node_name {
        data.push(("node_name".to_string(), Value::String(name.clone())));
    }
    data.extend([
        ("checksum_path".to_string(), path("checksums")),
        ("file_cache_path".to_string(), path("cache")),
        ("file_backup_path".to_string(), path("backup")),
        (
            "cookbook_path".to_string(),
            Value::Array(vec![path("cookbooks"), path("site-cookbooks")]),
        ),
        ("data_bag_path".to_string(), path("data_bags")),
        ("environment_path".to_string(), path("environments")),
        ("node_path".to_string(), path("nodes")),
        ("role_path".to_string(), path("roles")),
        ("client_path".to_string(), path("clients")),
        ("user_path".to_string(), path("users")),
        ("validation_key".to_string(), path("validation.pem")),
        ("client_key".to_string(), path("client.pem")),
        (
            "chef_server_url".to_string(),
            Value::String(CHEF_SERVER_URL.to_string()),
        ),
        (
            "encrypted_data_bag_secret".to_string(),
            path("encrypted_data_bag_secret"),
        ),
        (
            "treat_deprecation_warnings_as_errors".to_string(),
            Value::Bool(config.deprecations_as_errors),
        ),
    ]);
    data
}

/// Render `solo.rb`: the generated settings with `solo_rb` merged on top.
///
/// Overridden keys keep their position; new keys follow in key order.
/// Generated values may interpolate (`#{ENV['TEMP']}` on Windows), user
/// values never do.
#[must_use]
pub fn render_config_rb(config: &ResolvedConfig) -> String {
    let mut data: Vec<(String, String)> = default_config_rb(config)
        .into_iter()
        .map(|(key, value)| {
            let literal = ruby_literal(&value, Quoting::Interpolated);
            (key, literal)
        })
        .collect();
    for (key, value) in &config.solo_rb {
        let literal = format_value(value);
        match data.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = literal,
            None => data.push((key.clone(), literal)),
        }
    }
    let mut out = data
        .iter()
        .map(|(key, literal)| format!("{key} {literal}"))
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    /// `#` escaped, so the string is taken literally.
    Literal,
    /// `#{...}` left for Ruby to expand.
    Interpolated,
}

/// Format a value as a Ruby literal.
///
/// Strings starting with `:` are emitted bare so symbols survive. Other
/// strings are double-quoted, escaping backslashes, quotes and `#`.
#[must_use]
pub fn format_value(value: &Value) -> String {
    ruby_literal(value, Quoting::Literal)
}

fn ruby_literal(value: &Value, quoting: Quoting) -> String {
    match value {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.starts_with(':') => s.clone(),
        Value::String(s) => ruby_string(s, quoting),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|v| ruby_literal(v, quoting)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    format!("{} => {}", ruby_string(k, quoting), ruby_literal(v, quoting))
                })
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
    }
}

fn ruby_string(s: &str, quoting: Quoting) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' | '"' => out.push('\\'),
            '#' if quoting == Quoting::Literal => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Render `dna.json`: node attributes plus the run list.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_dna_json(config: &ResolvedConfig) -> Result<String> {
    let mut dna: Map<String, Value> = config.attributes.clone();
    dna.insert(
        "run_list".to_string(),
        Value::Array(config.run_list.iter().cloned().map(Value::String).collect()),
    );
    serde_json::to_string_pretty(&Value::Object(dna)).context("serializing dna.json")
}
