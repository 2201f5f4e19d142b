pub mod contact_creation;
pub mod progress_sink;
pub mod spreadsheet_decoder;

pub use contact_creation::ContactCreationApi;
pub use progress_sink::{progress_channel, ChannelProgressSink, ProgressSink};
pub use spreadsheet_decoder::SpreadsheetDecoder;
