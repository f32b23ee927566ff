use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tests::{
    assert_err, assert_ok, assert_some,
    fixtures::{Incident, Journal},
    TrellisTest,
};
use trellis::{driver::Operation, Config, Row, Value};

fn printer_offline() -> Incident {
    Incident {
        short_description: "Printer offline".to_string(),
        priority: Some(2),
        ..Default::default()
    }
}

fn stored(test: &TrellisTest, incident: &Incident) -> Row {
    let rec_id = assert_some!(incident.rec_id.as_deref());
    assert_some!(test.memory.record("Incident", rec_id))
}

async fn seed_open_incident(test: &TrellisTest) -> String {
    assert_ok!(test.memory.insert(
        "Incident",
        [
            ("IncidentID", Value::from("2001")),
            ("ShortDescription", Value::from("Slow network")),
            ("Description", Value::from("Original")),
            ("Status", Value::from("Open")),
            ("Priority", Value::from(3)),
        ],
    ))
}

#[tokio::test]
async fn create_writes_fields_and_assigns_the_record_id() {
    let test = TrellisTest::new().await;
    let mut incident = printer_offline();

    let summary = assert_ok!(test.client.create(&mut incident).await);

    let rec_id = assert_some!(incident.rec_id.clone());
    let stored = assert_some!(test.memory.record("Incident", &rec_id));
    assert_eq!(stored["ShortDescription"], Value::from("Printer offline"));
    assert_eq!(stored["Priority"], Value::from(2));
    assert_eq!(stored["Status"], Value::from("New"));
    assert_eq!(stored["Urgent"], Value::Bool(false));
    assert_eq!(stored["Description"], Value::Null);

    assert_eq!(
        summary.written,
        ["ShortDescription", "Priority", "Status", "Urgent"]
    );
    assert!(summary.skipped.is_empty());
}

#[tokio::test]
async fn every_set_is_read_back() {
    let mut test = TrellisTest::new().await;
    let mut incident = printer_offline();

    let summary = assert_ok!(test.client.create(&mut incident).await);

    let reads = test.log().count(|op| matches!(op, Operation::GetField(_)));
    assert_eq!(reads, summary.written.len());
}

#[tokio::test]
async fn throwing_validator_fails_the_write() {
    let mut test = TrellisTest::new().await;
    let mut incident = Incident {
        short_description: "   ".to_string(),
        ..Default::default()
    };

    let err = assert_err!(test.client.create(&mut incident).await);

    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "custom validation failed for short_description: a summary is required"
    );
    assert_eq!(incident.rec_id, None);
    assert!(test.memory.records("Incident").is_empty());
    assert!(test.log().has_delete_record());
}

#[tokio::test]
async fn skipping_validator_leaves_the_field_out() {
    let test = TrellisTest::new().await;
    let mut incident = Incident {
        priority: Some(9),
        ..printer_offline()
    };

    let summary = assert_ok!(test.client.create(&mut incident).await);

    assert_eq!(summary.skipped, ["Priority"]);
    assert!(summary.was_skipped("Priority"));
    assert!(!summary.was_written("Priority"));

    let stored = stored(&test, &incident);
    assert_eq!(stored["Priority"], Value::Null);
}

#[tokio::test]
async fn dropped_write_is_retried_once() {
    let mut test = TrellisTest::new().await;
    test.memory.drop_writes("Status", 1);
    let mut incident = printer_offline();

    assert_ok!(test.client.create(&mut incident).await);

    assert_eq!(test.log().count_set_field("Status"), 2);
    let stored = stored(&test, &incident);
    assert_eq!(stored["Status"], Value::from("New"));
}

#[tokio::test]
async fn write_dropped_twice_is_not_verified() {
    let mut test = TrellisTest::new().await;
    test.memory.drop_writes("Status", 2);
    let mut incident = printer_offline();

    let err = assert_err!(test.client.create(&mut incident).await);

    assert!(err.is_write());
    assert!(err
        .to_string()
        .contains("attempted to set `Status` to `New` twice"));
    assert_eq!(test.log().count_set_field("Status"), 2);
    assert!(test.memory.records("Incident").is_empty());
}

#[tokio::test]
async fn verification_can_be_disabled() {
    let mut test = TrellisTest::with_config(Config {
        verify_writes: false,
        ..Config::default()
    })
    .await;
    test.memory.drop_writes("Status", 1);
    let mut incident = printer_offline();

    assert_ok!(test.client.create(&mut incident).await);

    assert!(!test.log().has_get_field());
    let stored = stored(&test, &incident);
    assert_eq!(stored["Status"], Value::Null);
}

#[tokio::test]
async fn rejected_set_fails_the_write() {
    let test = TrellisTest::new().await;
    test.memory.reject_value("Status", "Escalated");
    let mut incident = Incident {
        status: Some("Escalated".to_string()),
        ..printer_offline()
    };

    let err = assert_err!(test.client.create(&mut incident).await);

    assert!(err.is_write());
    assert!(err.to_string().contains("update of `Status` was rejected"));
    assert!(test.memory.records("Incident").is_empty());
}

#[tokio::test]
async fn failed_save_rolls_back_the_create() {
    let mut test = TrellisTest::new().await;
    test.memory.fail_saves(1);
    let mut incident = printer_offline();

    let err = assert_err!(test.client.create(&mut incident).await);

    assert!(err.is_write());
    assert_eq!(
        err.to_string(),
        "write error: saving `Incident` failed: the store is not accepting changes"
    );
    assert!(test.log().has_delete_record());
    assert!(test.memory.records("Incident").is_empty());
}

#[tokio::test]
async fn failed_rollback_keeps_the_original_error() {
    let test = TrellisTest::new().await;
    test.memory.fail_saves(1).fail_deletes(1);
    let mut incident = printer_offline();

    let err = assert_err!(test.client.create(&mut incident).await);

    assert!(err.to_string().contains("saving `Incident` failed"));
}

#[tokio::test]
async fn update_writes_changed_fields() {
    let test = TrellisTest::new().await;
    let rec_id = seed_open_incident(&test).await;

    let mut incident = assert_ok!(test.client.get(Incident::query().for_record_id(&rec_id)).await);
    incident.description = Some("Switch replaced".to_string());
    incident.status = Some("Resolved".to_string());

    let summary = assert_ok!(test.client.update(&mut incident).await);

    assert!(summary.was_written("Description"));
    let stored = assert_some!(test.memory.record("Incident", &rec_id));
    assert_eq!(stored["Description"], Value::from("Switch replaced"));
    assert_eq!(stored["Status"], Value::from("Resolved"));
    assert_eq!(stored["IncidentID"], Value::from("2001"));
    assert_eq!(test.memory.records("Incident").len(), 1);
}

#[tokio::test]
async fn failed_update_restores_the_snapshot() {
    let mut test = TrellisTest::new().await;
    let rec_id = seed_open_incident(&test).await;

    let mut incident = assert_ok!(test.client.get(Incident::query().for_record_id(&rec_id)).await);
    incident.description = Some("Changed".to_string());
    incident.priority = Some(1);

    test.memory.fail_saves(1);
    test.log().clear();

    let err = assert_err!(test.client.update(&mut incident).await);
    assert!(err.is_write());

    let saves = test.log().count(|op| matches!(op, Operation::Save(_)));
    assert_eq!(saves, 2);

    let stored = assert_some!(test.memory.record("Incident", &rec_id));
    assert_eq!(stored["Description"], Value::from("Original"));
    assert_eq!(stored["Priority"], Value::from(3));
    assert_eq!(stored["Urgent"], Value::Null);
}

#[tokio::test]
async fn update_rejected_midway_leaves_the_record_unchanged() {
    let test = TrellisTest::new().await;
    let rec_id = seed_open_incident(&test).await;
    test.memory.reject_value("Status", "Escalated");

    let mut incident = assert_ok!(test.client.get(Incident::query().for_record_id(&rec_id)).await);
    incident.description = Some("Changed".to_string());
    incident.status = Some("Escalated".to_string());

    assert_err!(test.client.update(&mut incident).await);

    let stored = assert_some!(test.memory.record("Incident", &rec_id));
    assert_eq!(stored["Description"], Value::from("Original"));
    assert_eq!(stored["Status"], Value::from("Open"));
}

#[tokio::test]
async fn update_requires_a_record_id() {
    let test = TrellisTest::new().await;
    let mut incident = printer_offline();

    let err = assert_err!(test.client.update(&mut incident).await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn update_of_a_deleted_record_is_not_found() {
    let test = TrellisTest::new().await;
    let rec_id = seed_open_incident(&test).await;
    let mut incident = assert_ok!(test.client.get(Incident::query().for_record_id(&rec_id)).await);

    assert_ok!(test.client.delete_by_type_and_id("Incident", &rec_id).await);

    let err = assert_err!(test.client.update(&mut incident).await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let test = TrellisTest::new().await;
    let mut incident = printer_offline();
    assert_ok!(test.client.create(&mut incident).await);

    assert_ok!(test.client.delete(&incident).await);
    assert!(test.memory.records("Incident").is_empty());

    assert_ok!(test.client.delete(&incident).await);
}

#[tokio::test]
async fn deleted_records_are_gone_from_queries() {
    let test = TrellisTest::new().await;
    let mut incident = printer_offline();
    assert_ok!(test.client.create(&mut incident).await);
    let rec_id = assert_some!(incident.rec_id.clone());

    assert_ok!(test.client.delete(&incident).await);

    let found = assert_ok!(test.client.execute(Incident::query().for_record_id(&rec_id)).await);
    assert!(found.is_empty());

    let err = assert_err!(test.client.get(Incident::query().for_record_id(&rec_id)).await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn dates_round_trip_through_a_date_field() {
    let test = TrellisTest::new().await;
    let due = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let mut incident = Incident {
        due_date: Some(due),
        ..printer_offline()
    };

    let summary = assert_ok!(test.client.create(&mut incident).await);
    assert!(summary.was_written("DueDate"));

    let rec_id = assert_some!(incident.rec_id.clone());
    let loaded = assert_ok!(test.client.get(Incident::query().for_record_id(rec_id)).await);
    assert_eq!(loaded.due_date, Some(due));
}

#[tokio::test]
async fn create_round_trips_in_order() {
    let mut test = TrellisTest::new().await;
    let mut journal = Journal {
        details: "Called the requester back".to_string(),
        ..Default::default()
    };

    assert_ok!(test.client.create(&mut journal).await);

    assert_eq!(
        test.log().names(),
        ["get_definition", "new_record", "set_field", "get_field", "save"]
    );

    // The definition is cached for the session
    test.log().clear();
    assert_ok!(test.client.create(&mut journal.clone()).await);
    assert_eq!(
        test.log().names(),
        ["new_record", "set_field", "get_field", "save"]
    );
}
