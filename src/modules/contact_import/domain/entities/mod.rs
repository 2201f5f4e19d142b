pub mod contact_payload;
pub mod contact_record;
pub mod raw_row;

pub use contact_payload::{ContactPayload, CreatedContact};
pub use contact_record::{columns, split_full_name, ContactRecord};
pub use raw_row::{RawRow, FIRST_DATA_LINE};
