//! Storage layer for tasklint
//!
//! Read-only access to the checked convention:
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Index | JSONL (one JSON object per line) | `<dir>/tasks.jsonl` |
//! | Detail files | Markdown + `---` frontmatter | `<dir>/{id}-{slug}.md` |
//!
//! The index and detail files are produced by an external generation step;
//! nothing in this crate writes into the task directory.

mod index;

pub use index::{IndexStore, LoadedIndex, INDEX_FILE};
