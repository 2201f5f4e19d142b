/// Test data factories using builder pattern
///
/// Provides convenient methods to create contact records with sensible defaults
use contact_import::modules::contact_import::ContactRecord;

pub struct ContactFactory {
    record: ContactRecord,
}

impl ContactFactory {
    pub fn new(last_name: &str, first_name: &str) -> Self {
        Self {
            record: ContactRecord::new(last_name, first_name, 2),
        }
    }

    pub fn company(mut self, company: &str) -> Self {
        self.record.company_name_raw = company.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.record.email = email.to_string();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.record.phone = phone.to_string();
        self
    }

    pub fn mobile(mut self, mobile: &str) -> Self {
        self.record.mobile = mobile.to_string();
        self
    }

    pub fn row(mut self, source_row_index: usize) -> Self {
        self.record.source_row_index = source_row_index;
        self
    }

    pub fn build(self) -> ContactRecord {
        self.record
    }

    /// `count` valid records named `Contact1..` with sheet rows 2..
    pub fn batch(count: usize) -> Vec<ContactRecord> {
        (0..count)
            .map(|i| {
                ContactFactory::new("Kim", &format!("Contact{}", i + 1))
                    .email(&format!("contact{}@example.com", i + 1))
                    .row(i + 2)
                    .build()
            })
            .collect()
    }
}
