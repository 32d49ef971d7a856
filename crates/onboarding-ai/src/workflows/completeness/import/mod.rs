mod parser;

use super::domain::{ExtractedItem, ExtractedItemType, ItemStatus};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ItemImportError {
    #[error("failed to read extraction export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid extraction CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads extracted items from the extraction pipeline's CSV export
/// (`Item ID, Type, Status, Source Session`).
pub struct ExtractedItemImporter;

impl ExtractedItemImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ExtractedItem>, ItemImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows with an unknown type or status, or a repeated id, are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ExtractedItem>, ItemImportError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut items = Vec::new();

        for row in parser::parse_rows(reader)? {
            let item_type = match row.item_type.parse::<ExtractedItemType>() {
                Ok(item_type) => item_type,
                Err(err) => {
                    warn!(line = row.line, id = %row.id, %err, "skipping extracted item");
                    continue;
                }
            };
            let status = match row.status.parse::<ItemStatus>() {
                Ok(status) => status,
                Err(err) => {
                    warn!(line = row.line, id = %row.id, %err, "skipping extracted item");
                    continue;
                }
            };
            if !seen.insert(row.id.clone()) {
                warn!(line = row.line, id = %row.id, "skipping duplicate extracted item");
                continue;
            }

            items.push(ExtractedItem {
                id: row.id,
                item_type,
                status,
                source_session: row.source_session,
            });
        }

        Ok(items)
    }
}
