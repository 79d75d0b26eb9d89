//! Layout placeholder substitution.
//!
//! Bundle files refer to their own install location through literal tokens
//! so one bundle serves every integration:
//!
//! | Token | Value |
//! |---|---|
//! | `{{IDE_DIR}}` | layout root, e.g. `.cursor` |
//! | `{{FILE_EXT}}` | rule extension, e.g. `.mdc` |
//! | `{{RULES_DIR}}` | `<root>/rules` |
//! | `{{DOCS_DIR}}` | `<root>/docs` |
//! | `{{COMMANDS_DIR}}` | `<root>/commands` |

pub const IDE_DIR: &str = "{{IDE_DIR}}";
pub const FILE_EXT: &str = "{{FILE_EXT}}";
pub const RULES_DIR: &str = "{{RULES_DIR}}";
pub const DOCS_DIR: &str = "{{DOCS_DIR}}";
pub const COMMANDS_DIR: &str = "{{COMMANDS_DIR}}";

/// Concrete values for one integration layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderValues {
    pub ide_dir: String,
    pub file_ext: String,
    pub rules_dir: String,
    pub docs_dir: String,
    pub commands_dir: String,
}

impl PlaceholderValues {
    /// Derive all values from a layout root and a rule extension.
    pub fn for_layout(root: &str, extension: &str) -> Self {
        Self {
            ide_dir: root.to_string(),
            file_ext: extension.to_string(),
            rules_dir: format!("{root}/rules"),
            docs_dir: format!("{root}/docs"),
            commands_dir: format!("{root}/commands"),
        }
    }

    fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            (IDE_DIR, &self.ide_dir),
            (FILE_EXT, &self.file_ext),
            (RULES_DIR, &self.rules_dir),
            (DOCS_DIR, &self.docs_dir),
            (COMMANDS_DIR, &self.commands_dir),
        ]
    }
}

/// Replace every placeholder token in `content`.
///
/// `None` content yields an empty string. Unknown `{{...}}` sequences are left
/// alone.
pub fn substitute(content: Option<&str>, values: &PlaceholderValues) -> String {
    let Some(content) = content else {
        return String::new();
    };
    if !content.contains("{{") {
        return content.to_string();
    }
    values
        .pairs()
        .iter()
        .fold(content.to_string(), |acc, (token, value)| acc.replace(token, value))
}
