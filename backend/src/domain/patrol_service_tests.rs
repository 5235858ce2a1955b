//! Orchestration coverage: best-effort capture, error mapping, filter
//! translation, and page shaping.

use std::sync::Arc;

use chrono::Utc;
use pagination::PageRequest;
use rstest::rstest;
use uuid::Uuid;

use super::{PatrolService, predicates_for};
use crate::domain::image_service::ImageService;
use crate::domain::ports::{
    ListRecordsRequest, MockCameraSnapshotSource, MockImageStore, MockPatrolRecordRepository,
    PatrolImageQuery, PatrolRecordRepositoryError, PatrolRecordsCommand, PatrolRecordsQuery,
    RecordFilter, RecordPage, RecordPredicate, TextField, TimeField,
};
use crate::domain::{
    CameraMap, ErrorCode, ImageId, NewPatrolRecord, NewPatrolRecordDraft, PatrolRecord,
    PatrolRecordParts,
};

fn new_record(id: Uuid) -> NewPatrolRecord {
    NewPatrolRecord::new(NewPatrolRecordDraft {
        id,
        checkpoint: "9".to_owned(),
        guard_name: "Janssen".to_owned(),
        client_time: 1_700_000_100,
        server_time: 1_700_000_103,
        image_id: ImageId::new("img-9").expect("valid image id"),
        note: String::new(),
    })
    .expect("valid record")
}

fn stored_record(id: Uuid, client_time: i64) -> PatrolRecord {
    let now = Utc::now();
    PatrolRecord::new(PatrolRecordParts {
        id,
        checkpoint: "9".to_owned(),
        guard_name: "Janssen".to_owned(),
        client_time,
        server_time: client_time + 3,
        image_id: ImageId::new("img-9").expect("valid image id"),
        note: String::new(),
        created_at: now,
        updated_at: now,
    })
    .expect("valid record")
}

fn image_service_without_cameras() -> Arc<ImageService> {
    let mut store = MockImageStore::new();
    store.expect_save().never();
    Arc::new(ImageService::new(
        Arc::new(store),
        Arc::new(MockCameraSnapshotSource::new()),
        CameraMap::empty(),
    ))
}

fn service(records: MockPatrolRecordRepository) -> PatrolService {
    PatrolService::new(Arc::new(records), image_service_without_cameras())
}

#[rstest]
#[tokio::test]
async fn create_without_camera_mapping_succeeds() {
    let id = Uuid::new_v4();
    let mut records = MockPatrolRecordRepository::new();
    records
        .expect_insert()
        .times(1)
        .returning(move |record| Ok(stored_record(record.id(), record.client_time())));

    let stored = service(records)
        .create_record(new_record(id))
        .await
        .expect("creation succeeds without a camera");
    assert_eq!(stored.id(), id);
}

#[rstest]
#[tokio::test]
async fn duplicate_insert_surfaces_as_conflict() {
    let id = Uuid::new_v4();
    let mut records = MockPatrolRecordRepository::new();
    records
        .expect_insert()
        .times(1)
        .returning(move |_| Err(PatrolRecordRepositoryError::duplicate(id)));

    let error = service(records)
        .create_record(new_record(id))
        .await
        .expect_err("duplicate must fail");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case::connection(
    PatrolRecordRepositoryError::connection("pool exhausted"),
    ErrorCode::ServiceUnavailable
)]
#[case::query(PatrolRecordRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_server_errors(
    #[case] repository_error: PatrolRecordRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut records = MockPatrolRecordRepository::new();
    let returned = repository_error.clone();
    records
        .expect_insert()
        .times(1)
        .returning(move |_| Err(returned.clone()));

    let error = service(records)
        .create_record(new_record(Uuid::new_v4()))
        .await
        .expect_err("must fail");
    assert_eq!(error.code(), expected);
}

#[rstest]
fn empty_filter_translates_to_no_predicates() {
    assert!(predicates_for(&RecordFilter::default()).is_empty());
}

#[rstest]
fn full_filter_translates_every_field() {
    let filter = RecordFilter {
        checkpoint: Some("3".to_owned()),
        guard_name: Some("jan".to_owned()),
        start_time: Some(100),
        end_time: Some(200),
        has_notes: Some(true),
    };
    let predicates = predicates_for(&filter);
    assert_eq!(
        predicates,
        vec![
            RecordPredicate::Equals(TextField::Checkpoint, "3".to_owned()),
            RecordPredicate::Contains(TextField::GuardName, "jan".to_owned()),
            RecordPredicate::GreaterOrEqual(TimeField::ClientTime, 100),
            RecordPredicate::LessOrEqual(TimeField::ClientTime, 200),
            RecordPredicate::NotEquals(TextField::Note, String::new()),
        ]
    );
}

#[rstest]
fn has_notes_false_adds_nothing() {
    let filter = RecordFilter {
        has_notes: Some(false),
        ..RecordFilter::default()
    };
    assert!(predicates_for(&filter).is_empty());
}

#[rstest]
#[tokio::test]
async fn list_records_wraps_the_page_envelope() {
    let mut records = MockPatrolRecordRepository::new();
    records
        .expect_query_paged()
        .withf(|predicates, page| predicates.is_empty() && page.page() == 3)
        .times(1)
        .returning(|_, _| {
            Ok(RecordPage {
                records: vec![stored_record(Uuid::new_v4(), 500)],
                total: 25,
            })
        });

    let request = ListRecordsRequest {
        filter: RecordFilter::default(),
        page: PageRequest::new(3, 10).expect("valid page"),
    };
    let envelope = service(records)
        .list_records(request)
        .await
        .expect("listing succeeds");
    assert_eq!(envelope.total, 25);
    assert_eq!(envelope.total_pages, 3);
    assert_eq!(envelope.current_page, 3);
    assert_eq!(envelope.page_size, 1);
}

#[rstest]
#[tokio::test]
async fn get_record_maps_absence_to_not_found() {
    let mut records = MockPatrolRecordRepository::new();
    records.expect_get_by_id().times(1).returning(|_| Ok(None));

    let error = service(records)
        .get_record(Uuid::new_v4())
        .await
        .expect_err("absent record must be not found");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_image_delegates_to_the_image_service() {
    let mut store = MockImageStore::new();
    store
        .expect_get()
        .times(1)
        .returning(|_| Ok(Some(vec![0xFF, 0xD8])));
    let images = Arc::new(ImageService::new(
        Arc::new(store),
        Arc::new(MockCameraSnapshotSource::new()),
        CameraMap::empty(),
    ));
    let patrol = PatrolService::new(Arc::new(MockPatrolRecordRepository::new()), images);

    let bytes = patrol
        .get_image(&ImageId::new("img-9").expect("valid image id"))
        .await
        .expect("lookup succeeds")
        .expect("blob present");
    assert_eq!(bytes, vec![0xFF, 0xD8]);
}
