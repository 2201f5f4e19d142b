/// End-to-end runs through ContactImportService with in-memory APIs
mod utils;

use contact_import::modules::contact_import::{
    progress_channel, BatchSubmitter, ContactImportService, CsvSpreadsheetDecoder, ImportError,
    ImportPhase, ProgressEvent, RowNumber,
};
use contact_import::modules::customer::{CustomerResolver, ResolutionCache};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use utils::factories::ContactFactory;
use utils::fakes::{drain_events, FakeCustomerDirectory, RecordingContactApi};

const SHEET: &str = "\
이름,회사명,직위,부서,이메일,전화번호,휴대폰,관계유형,메모
김철수,Acme,과장,영업팀,kim@acme.co.kr,02-555-0100,010-1234-5678,고객,
Jane Doe,,Engineer,,jane@example.com,,,,met at conference
이영희,Unknown Co,,,,,,,
";

struct Harness {
    service: ContactImportService,
    directory: Arc<FakeCustomerDirectory>,
    api: Arc<RecordingContactApi>,
}

fn harness(api: RecordingContactApi) -> Harness {
    let directory = Arc::new(FakeCustomerDirectory::new().with_customer("Acme", "C-100"));
    let api = Arc::new(api);

    let service = ContactImportService::new(
        Arc::new(CsvSpreadsheetDecoder::new()),
        CustomerResolver::new(ResolutionCache::new(), directory.clone()),
        BatchSubmitter::new(api.clone()).with_batch_size(2),
    );

    Harness {
        service,
        directory,
        api,
    }
}

fn phases(events: &[ProgressEvent]) -> Vec<ImportPhase> {
    events
        .iter()
        .filter_map(|event| match event {
            ProgressEvent::Phase(phase) => Some(*phase),
            ProgressEvent::Progress(_) => None,
        })
        .collect()
}

#[tokio::test]
async fn imports_a_sheet_end_to_end() {
    let h = harness(RecordingContactApi::new());
    let (sink, mut events) = progress_channel();

    let result = h
        .service
        .import_file(SHEET.as_bytes(), Some(Arc::new(sink)), None)
        .await
        .expect("import should succeed");

    assert!(result.success);
    assert_eq!(result.total_count, 3);
    assert_eq!(result.success_count, 3);
    assert_eq!(result.message, "3 contacts created");

    let mapping = &result.customer_mapping;
    assert_eq!(mapping.total_customers, 2);
    assert_eq!(mapping.mapped_customers, 1);
    assert_eq!(mapping.unmapped_customers, 1);
    assert_eq!(mapping.contacts_without_company, 1);

    // Sheet line numbers: header on line 1, data from line 2.
    let rows: Vec<usize> = result
        .success_items
        .iter()
        .map(|o| o.record.source_row_index)
        .collect();
    assert_eq!(rows, vec![2, 3, 4]);

    let created = h.api.created();
    assert_eq!(created[0].last_name, "김");
    assert_eq!(created[0].first_name, "철수");
    assert_eq!(created[0].customer_id.as_deref(), Some("C-100"));
    assert_eq!(created[1].last_name, "Doe");
    assert_eq!(created[1].customer_id, None);
    assert_eq!(created[1].note.as_deref(), Some("met at conference"));
    assert_eq!(created[2].customer_id, None);

    let events = drain_events(&mut events);
    assert_eq!(
        phases(&events),
        vec![
            ImportPhase::Validating,
            ImportPhase::Resolving,
            ImportPhase::Uploading,
            ImportPhase::Completed,
            ImportPhase::Idle,
        ]
    );
}

#[tokio::test]
async fn invalid_rows_stop_the_run_before_any_request() {
    let h = harness(RecordingContactApi::new());
    let (sink, mut events) = progress_channel();

    let records = vec![
        ContactFactory::new("Kim", "Minsu").company("Acme").build(),
        ContactFactory::new("", "Jisoo").build(),
        ContactFactory::new("Park", "Hana").email("abc").build(),
    ];

    let err = h
        .service
        .import_records(records, Some(Arc::new(sink)), None)
        .await
        .expect_err("validation must fail");

    let errors = err.validation_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].row_number, RowNumber::Row(2));
    assert_eq!(errors[0].field, "lastName");
    assert_eq!(errors[1].row_number, RowNumber::Row(3));
    assert_eq!(errors[1].field, "email");

    assert_eq!(h.directory.call_count(), 0);
    assert_eq!(h.api.attempts(), 0);
    assert_eq!(
        phases(&drain_events(&mut events)),
        vec![ImportPhase::Validating, ImportPhase::Invalid, ImportPhase::Idle]
    );
}

#[tokio::test]
async fn empty_lines_do_not_shift_row_numbers() {
    let h = harness(RecordingContactApi::new());
    let sheet = "이름,회사명\n김철수,Acme\n\n\nJane Doe,\n";

    let result = h
        .service
        .import_file(sheet.as_bytes(), None, None)
        .await
        .expect("import should succeed");

    let rows: Vec<usize> = result
        .success_items
        .iter()
        .map(|o| o.record.source_row_index)
        .collect();
    assert_eq!(rows, vec![2, 5]);
}

#[test]
fn validate_records_checks_without_side_effects() {
    let h = harness(RecordingContactApi::new());

    let report = h
        .service
        .validate_records(&[ContactFactory::new("Kim", "").company("Acme").build()]);

    assert!(!report.valid);
    assert_eq!(report.errors[0].field, "firstName");
    assert_eq!(h.directory.call_count(), 0);
    assert_eq!(h.api.attempts(), 0);
}

#[tokio::test]
async fn header_only_sheet_has_no_data() {
    let h = harness(RecordingContactApi::new());

    let err = h
        .service
        .import_file("이름,회사명\n".as_bytes(), None, None)
        .await
        .expect_err("an empty sheet is invalid");

    assert!(matches!(err, ImportError::Validation { .. }));
    assert_eq!(err.validation_errors()[0].row_number, RowNumber::All);
}

#[tokio::test]
async fn undecodable_file_is_reported_as_decode_error() {
    let h = harness(RecordingContactApi::new());

    let err = h
        .service
        .import_file(b"\xff\xfe\x00\n\xff", None, None)
        .await
        .expect_err("invalid UTF-8 cannot be decoded");

    assert!(matches!(err, ImportError::Decode(_)));
    assert_eq!(h.api.attempts(), 0);
}

#[tokio::test]
async fn rejected_contacts_are_listed_without_failing_the_run() {
    let h = harness(RecordingContactApi::new().rejecting("Contact3"));

    let result = h
        .service
        .import_records(ContactFactory::batch(5), None, None)
        .await
        .expect("rejections are not run failures");

    assert!(!result.success);
    assert_eq!(result.success_count, 4);
    assert_eq!(result.fail_count, 1);
    assert_eq!(result.failed_items[0].record.first_name, "Contact3");
    assert_eq!(result.message, "4 contacts created, 1 failed");
}

#[tokio::test]
async fn unreachable_endpoint_fails_with_partial_result() {
    let h = harness(RecordingContactApi::new().unreachable_after(2));
    let (sink, mut events) = progress_channel();

    let err = h
        .service
        .import_records(ContactFactory::batch(6), Some(Arc::new(sink)), None)
        .await
        .expect_err("the run must abort");

    let partial = err.partial_result().expect("partial outcomes are kept");
    assert_eq!(partial.success_count, 2);
    assert_eq!(partial.fail_count, 2);
    assert_eq!(partial.not_submitted_count, 2);
    assert!(!partial.success);

    let phases = phases(&drain_events(&mut events));
    assert_eq!(&phases[phases.len() - 2..], &[ImportPhase::Failed, ImportPhase::Idle]);
}

#[tokio::test]
async fn pre_cancelled_run_submits_nothing() {
    let h = harness(RecordingContactApi::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = h
        .service
        .import_records(ContactFactory::batch(4), None, Some(cancel))
        .await
        .expect("cancellation is not an error");

    assert!(result.cancelled);
    assert!(!result.success);
    assert_eq!(result.total_count, 0);
    assert_eq!(result.not_submitted_count, 4);
    assert_eq!(h.api.attempts(), 0);
}
