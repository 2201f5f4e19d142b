pub mod adapters;
pub mod decoders;

pub use adapters::HttpContactCreationApi;
pub use decoders::CsvSpreadsheetDecoder;
