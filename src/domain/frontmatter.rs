//! Frontmatter extraction for detail files
//!
//! Detail files start with a metadata block delimited by lines containing
//! exactly `---`, holding `key: value` pairs that duplicate a subset of the
//! index entry. Extraction is deliberately lenient: a missing or malformed
//! block yields empty values, and the sync check reports the mismatch. The
//! parser itself never fails a file.

use serde::Deserialize;

/// Metadata block at the top of a detail file
///
/// Only the keys the sync check compares are modeled; anything else in the
/// block is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub depends_on: Option<Vec<String>>,
}

impl Frontmatter {
    /// Extracts the leading metadata block from file content
    ///
    /// Returns the default (all keys absent) when the block is missing,
    /// unterminated, or not parseable as key/value YAML.
    pub fn extract(content: &str) -> Self {
        match frontmatter_block(content) {
            Some(block) => serde_yaml::from_str(&block).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Returns the `id` value, or the empty string when absent
    pub fn id_value(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Returns the `status` value, or the empty string when absent
    pub fn status_value(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }

    /// Returns the `depends_on` list, empty when absent
    pub fn depends_on_values(&self) -> &[String] {
        self.depends_on.as_deref().unwrap_or(&[])
    }
}

/// Returns the text between the opening and closing `---` lines
fn frontmatter_block(content: &str) -> Option<String> {
    let mut lines = content.lines();

    if lines.next()?.trim_end() != "---" {
        return None;
    }

    let mut block = String::new();
    for line in lines {
        if line.trim_end() == "---" {
            return Some(block);
        }
        block.push_str(line);
        block.push('\n');
    }

    // No closing delimiter
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_and_status() {
        let content = "---\nid: T001\nstatus: done\n---\n\n# Task T001\n\nBody text.\n";
        let fm = Frontmatter::extract(content);

        assert_eq!(fm.id_value(), "T001");
        assert_eq!(fm.status_value(), "done");
        assert!(fm.depends_on_values().is_empty());
    }

    #[test]
    fn extracts_depends_on_flow_list() {
        let content = "---\nid: T003\nstatus: pending\ndepends_on: [T001, T002]\n---\nBody\n";
        let fm = Frontmatter::extract(content);

        assert_eq!(fm.depends_on_values(), ["T001", "T002"]);
    }

    #[test]
    fn extracts_depends_on_block_list() {
        let content = "---\nid: T003\ndepends_on:\n  - T001\n  - T002\n---\n";
        let fm = Frontmatter::extract(content);

        assert_eq!(fm.depends_on_values(), ["T001", "T002"]);
    }

    #[test]
    fn missing_block_yields_empty_values() {
        let fm = Frontmatter::extract("# Just a heading\n\nNo frontmatter here.\n");

        assert_eq!(fm, Frontmatter::default());
        assert_eq!(fm.id_value(), "");
        assert_eq!(fm.status_value(), "");
    }

    #[test]
    fn unterminated_block_yields_empty_values() {
        let fm = Frontmatter::extract("---\nid: T001\nstatus: done\n\n# No closing delimiter\n");
        assert_eq!(fm, Frontmatter::default());
    }

    #[test]
    fn malformed_yaml_yields_empty_values() {
        let fm = Frontmatter::extract("---\n: : :\n\t{bad\n---\n");
        assert_eq!(fm, Frontmatter::default());
    }

    #[test]
    fn missing_keys_are_absent_not_errors() {
        let fm = Frontmatter::extract("---\ntitle: Something else\n---\n");

        assert!(fm.id.is_none());
        assert!(fm.status.is_none());
        assert_eq!(fm.id_value(), "");
    }

    #[test]
    fn extra_keys_ignored() {
        let content = "---\nid: T001\nstatus: pending\nowner: agent-7\npriority: high\n---\n";
        let fm = Frontmatter::extract(content);

        assert_eq!(fm.id_value(), "T001");
        assert_eq!(fm.status_value(), "pending");
    }

    #[test]
    fn crlf_delimiters_accepted() {
        let content = "---\r\nid: T001\r\nstatus: done\r\n---\r\nBody\r\n";
        let fm = Frontmatter::extract(content);

        assert_eq!(fm.id_value(), "T001");
    }

    #[test]
    fn delimiter_must_open_the_file() {
        let fm = Frontmatter::extract("\n---\nid: T001\n---\n");
        assert_eq!(fm, Frontmatter::default());
    }
}
