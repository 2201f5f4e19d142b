pub mod csv_decoder;

pub use csv_decoder::CsvSpreadsheetDecoder;
