use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Rows of optionally-absent text cells, as a table extractor emits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

/// Either `{"pages": [{"tables": [...]}]}` or a bare pages → tables nesting.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentRepr {
    Bare(Vec<Vec<Table>>),
    Paged { pages: Vec<Page> },
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pages = match DocumentRepr::deserialize(deserializer)? {
            DocumentRepr::Bare(pages) => pages.into_iter().map(|tables| Page { tables }).collect(),
            DocumentRepr::Paged { pages } => pages,
        };
        Ok(Document { pages })
    }
}

impl Document {
    pub fn table_count(&self) -> usize {
        self.pages.iter().map(|p| p.tables.len()).sum()
    }
}

/// Anything that can hand over a fully tabulated document.
pub trait TableSource {
    fn load(&self) -> Result<Document>;
}

/// JSON document on disk, or on stdin for `-`.
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        JsonSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

impl TableSource for JsonSource {
    fn load(&self) -> Result<Document> {
        let raw = if self.is_stdin() {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading schedule document from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.path)
                .with_context(|| format!("reading schedule document {}", self.path.display()))?
        };

        let doc: Document = serde_json::from_str(&raw)
            .with_context(|| format!("decoding tables from {}", self.path.display()))?;
        tracing::debug!(
            path = %self.path.display(),
            pages = doc.pages.len(),
            tables = doc.table_count(),
            "document loaded"
        );
        Ok(doc)
    }
}

// ── Tests ──
