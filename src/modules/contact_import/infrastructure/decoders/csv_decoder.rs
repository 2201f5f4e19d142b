use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};

use crate::log_debug;
use crate::modules::contact_import::application::ports::SpreadsheetDecoder;
use crate::modules::contact_import::domain::RawRow;
use crate::shared::errors::{AppError, AppResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes a CSV export of the contact sheet.
///
/// The first line holds the headers. Short rows are padded with empty
/// cells, and rows with nothing in them are dropped without shifting the
/// sheet line numbers of the rows after them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSpreadsheetDecoder;

impl CsvSpreadsheetDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode_bytes(bytes: &[u8]) -> AppResult<Vec<RawRow>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|header| header.is_empty()) {
            return Err(AppError::DecodeError("missing header row".to_string()));
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let cells = headers
                .iter()
                .enumerate()
                .map(|(column, header)| {
                    let value = record.get(column).unwrap_or_default();
                    (header.clone(), value.to_string())
                })
                .collect();

            // The reader skips empty lines, so count sheet lines from its position.
            let row = match record.position() {
                Some(position) => RawRow::new(position.line() as usize, cells),
                None => RawRow::from_data_index(index, cells),
            };
            if !row.is_blank() {
                rows.push(row);
            }
        }

        log_debug!("CSV: decoded {} rows with {} columns", rows.len(), headers.len());
        Ok(rows)
    }
}

#[async_trait]
impl SpreadsheetDecoder for CsvSpreadsheetDecoder {
    async fn decode(&self, bytes: &[u8]) -> AppResult<Vec<RawRow>> {
        let owned = bytes.to_vec();
        tokio::task::spawn_blocking(move || Self::decode_bytes(&owned))
            .await
            .map_err(|e| AppError::InternalError(format!("CSV decoding task failed: {}", e)))?
    }
}
