//! YAML frontmatter splitting, editing and rendering.
//!
//! A frontmatter block is a leading `---` line, YAML text, and a closing `---`
//! line. Parsing yields an insertion-ordered mapping. Edits go through the
//! block text instead, so lines of keys that are not touched keep their exact
//! bytes (quoting, number radix, `~` and comments included).

use crate::error::{Error, Result};
use kit_fs::io;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use std::sync::LazyLock;

static OPEN_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[ \t]*\r?\n").expect("Invalid open delimiter regex"));

static CLOSE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---[ \t]*\r?$").expect("Invalid close delimiter regex"));

/// A top-level key at column 0: double-quoted, single-quoted or plain.
static TOP_LEVEL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"([^"\r\n]*)"|'([^'\r\n]*)'|([^\s#'"\-?:,\[\]{}&*!|>%@`][^:\r\n]*?))[ \t]*:(?:[ \t]|\r?\n|$)"#)
        .expect("Invalid top-level key regex")
});

/// A document split into its metadata fields and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub fields: Mapping,
    pub body: String,
}

impl Frontmatter {
    /// Split `content` into fields and body.
    ///
    /// Content without a leading block yields empty fields and the whole text
    /// as body.
    ///
    /// # Errors
    /// Returns an error if the block is present but is not a YAML mapping.
    pub fn parse(content: &str) -> Result<Self> {
        let Some((yaml, body)) = split(content) else {
            return Ok(Self {
                fields: Mapping::new(),
                body: content.to_string(),
            });
        };

        let fields = if yaml.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str::<Value>(yaml)
                .map_err(|e| Error::parse("YAML frontmatter", e.to_string()))?
            {
                Value::Mapping(map) => map,
                Value::Null => Mapping::new(),
                other => {
                    return Err(Error::NotAMapping {
                        found: kind_of(&other).to_string(),
                    });
                }
            }
        };

        Ok(Self {
            fields,
            body: body.to_string(),
        })
    }

    /// Whether `content` starts with a complete frontmatter block.
    pub fn is_present(content: &str) -> bool {
        split(content).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field. An existing key keeps its position.
    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(Value::String(key.to_string()), value);
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Shallow-merge `overrides` into the fields.
    pub fn merge(&mut self, overrides: &Mapping) {
        for (key, value) in overrides {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Render back to text. With no fields left only the body is emitted.
    pub fn render(&self) -> Result<String> {
        if self.fields.is_empty() {
            return Ok(self.body.clone());
        }
        let yaml = serde_yaml::to_string(&self.fields)?;
        Ok(format!("---\n{yaml}---\n{}", self.body))
    }
}

/// Split `content` into the opening delimiter line, the YAML text and
/// everything from the closing delimiter on.
fn split_raw(content: &str) -> Option<(&str, &str, &str)> {
    let open = OPEN_DELIMITER.find(content)?;
    let close = CLOSE_DELIMITER.find(&content[open.end()..])?;
    let yaml_end = open.end() + close.start();
    Some((
        &content[..open.end()],
        &content[open.end()..yaml_end],
        &content[yaml_end..],
    ))
}

fn split(content: &str) -> Option<(&str, &str)> {
    let (_, yaml, tail) = split_raw(content)?;
    let close = CLOSE_DELIMITER.find(tail)?;
    let after = &tail[close.end()..];
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);
    Some((yaml, body))
}

/// One top-level field as written: its key line with any indented
/// continuation lines, then trailing blank or comment lines.
#[derive(Debug)]
struct Entry {
    key: Option<String>,
    text: String,
    trivia: String,
}

impl Entry {
    fn from_lines(key: Option<String>, lines: &[&str]) -> Self {
        let value_end = if key.is_some() {
            lines
                .iter()
                .rposition(|line| !is_trivia(line))
                .map_or(0, |i| i + 1)
        } else {
            lines.len()
        };
        Self {
            key,
            text: lines[..value_end].concat(),
            trivia: lines[value_end..].concat(),
        }
    }
}

fn is_trivia(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

fn top_level_key(line: &str) -> Option<String> {
    let caps = TOP_LEVEL_KEY.captures(line)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}

/// Group the lines of a block into top-level entries. Lines before the first
/// key form an entry without a key.
fn entries(yaml: &str) -> Vec<Entry> {
    let mut out = Vec::new();
    let mut key = None;
    let mut lines: Vec<&str> = Vec::new();
    for line in yaml.split_inclusive('\n') {
        if let Some(next) = top_level_key(line) {
            if key.is_some() || !lines.is_empty() {
                out.push(Entry::from_lines(key.take(), &lines));
                lines.clear();
            }
            key = Some(next);
        }
        lines.push(line);
    }
    if key.is_some() || !lines.is_empty() {
        out.push(Entry::from_lines(key, &lines));
    }
    out
}

/// Whether every parsed field has exactly one entry the text edit can find.
/// Flow-style or complex keys fall back to a full render.
fn entries_cover(entries: &[Entry], fields: &Mapping) -> bool {
    let keyed = entries.iter().filter(|e| e.key.is_some()).count();
    keyed == fields.len()
        && fields.keys().all(|key| {
            key.as_str()
                .is_some_and(|k| entries.iter().any(|e| e.key.as_deref() == Some(k)))
        })
}

/// Serialize a single `key: value` pair with the block's line ending.
fn render_entry(key: &Value, value: &Value, newline: &str) -> Result<String> {
    let mut single = Mapping::new();
    single.insert(key.clone(), value.clone());
    let text = serde_yaml::to_string(&single)?;
    Ok(if newline == "\n" {
        text
    } else {
        text.replace('\n', newline)
    })
}

fn join_block(head: &str, entries: &[Entry], appended: &str, tail: &str) -> String {
    let mut out = String::from(head);
    for entry in entries {
        out.push_str(&entry.text);
        out.push_str(&entry.trivia);
    }
    out.push_str(appended);
    out.push_str(tail);
    out
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Convert JSON override values (as stored in the sync record) to YAML.
pub fn mapping_from_json(overrides: &serde_json::Map<String, serde_json::Value>) -> Result<Mapping> {
    let mut mapping = Mapping::new();
    for (key, value) in overrides {
        mapping.insert(Value::String(key.clone()), serde_yaml::to_value(value)?);
    }
    Ok(mapping)
}

/// Merge `overrides` into the frontmatter of `content`.
///
/// Existing keys are replaced in place, new keys are appended, other lines of
/// the block and the body are left byte-for-byte. Content without a block
/// gains one.
pub fn apply_overrides_to_str(content: &str, overrides: &Mapping) -> Result<String> {
    let mut doc = Frontmatter::parse(content)?;
    let Some((head, yaml, tail)) = split_raw(content) else {
        doc.merge(overrides);
        return doc.render();
    };

    let mut entries = entries(yaml);
    if !entries_cover(&entries, &doc.fields) {
        tracing::debug!("Frontmatter layout not line-editable, re-rendering block");
        doc.merge(overrides);
        return doc.render();
    }

    let newline = if head.ends_with("\r\n") { "\r\n" } else { "\n" };
    let mut appended = String::new();
    for (key, value) in overrides {
        let rendered = render_entry(key, value, newline)?;
        let existing = key
            .as_str()
            .and_then(|k| entries.iter_mut().find(|e| e.key.as_deref() == Some(k)));
        match existing {
            Some(entry) => entry.text = rendered,
            None => appended.push_str(&rendered),
        }
    }
    Ok(join_block(head, &entries, &appended, tail))
}

/// Merge `overrides` into the frontmatter of the file at `path`, in place.
pub fn apply_overrides(path: &Path, overrides: &Mapping) -> Result<()> {
    let content = io::read_text(path)?;
    let updated = apply_overrides_to_str(&content, overrides)?;
    if updated != content {
        io::write_text(path, &updated)?;
    }
    Ok(())
}

/// Drop the `description` field.
///
/// When nothing else remains in the block, only the body is returned.
/// Content without a block is returned unchanged. Other lines keep their bytes.
pub fn strip_description(content: &str) -> Result<String> {
    let mut doc = Frontmatter::parse(content)?;
    if doc.fields.is_empty() {
        return Ok(doc.body);
    }
    if !doc.fields.contains_key("description") {
        return Ok(content.to_string());
    }
    if doc.fields.len() == 1 {
        return Ok(doc.body);
    }
    let Some((head, yaml, tail)) = split_raw(content) else {
        return Ok(content.to_string());
    };

    let mut entries = entries(yaml);
    if !entries_cover(&entries, &doc.fields) {
        doc.remove("description");
        return doc.render();
    }
    for entry in entries.iter_mut() {
        if entry.key.as_deref() == Some("description") {
            entry.text.clear();
        }
    }
    Ok(join_block(head, &entries, "", tail))
}
