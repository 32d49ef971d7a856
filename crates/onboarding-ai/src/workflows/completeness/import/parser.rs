use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ItemRow {
    pub(crate) line: u64,
    pub(crate) id: String,
    pub(crate) item_type: String,
    pub(crate) status: String,
    pub(crate) source_session: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ItemRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<ExportRow>().enumerate() {
        let row = record?;
        rows.push(ItemRow {
            // header is line 1
            line: index as u64 + 2,
            id: row.id,
            item_type: row.item_type,
            status: row.status,
            source_session: row.source_session,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Item ID")]
    id: String,
    #[serde(rename = "Type")]
    item_type: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(
        rename = "Source Session",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    source_session: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
