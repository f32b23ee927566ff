use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, assert_some, TrellisTest};
use trellis::{ArbitraryRecord, Clause, Filter, Value};

#[tokio::test]
async fn create_accepts_display_names() {
    let test = TrellisTest::new().await;
    let mut record = ArbitraryRecord::new("Incident")
        .field("Short Description", "Projector bulb")
        .field("Priority", 4)
        .field("Due Date", "2024-09-30");

    assert_ok!(test.client.create_arbitrary(&mut record).await);

    let rec_id = assert_some!(record.record_id.clone());
    let stored = assert_some!(test.memory.record("Incident", &rec_id));
    assert_eq!(stored["ShortDescription"], Value::from("Projector bulb"));
    assert_eq!(stored["Priority"], Value::from(4));
}

#[tokio::test]
async fn create_reports_missing_required_fields() {
    let test = TrellisTest::new().await;
    let mut record = ArbitraryRecord::new("Incident").field("Priority", 4);

    let err = assert_err!(test.client.create_arbitrary(&mut record).await);

    assert!(err.is_write());
    assert!(err.to_string().contains("`Short Description` is required"));
    assert_eq!(record.record_id, None);
}

#[tokio::test]
async fn unparseable_text_is_rejected() {
    let test = TrellisTest::new().await;
    let mut record = ArbitraryRecord::new("Incident")
        .field("ShortDescription", "Projector bulb")
        .field("Priority", "urgent");

    let err = assert_err!(test.client.create_arbitrary(&mut record).await);

    assert!(err.is_write());
    assert!(err.to_string().contains("`urgent` is not a valid number"));
    assert!(test.memory.records("Incident").is_empty());
}

#[tokio::test]
async fn unknown_field_is_a_mapping_error() {
    let test = TrellisTest::new().await;
    let mut record = ArbitraryRecord::new("Incident")
        .field("ShortDescription", "Projector bulb")
        .field("Severity", "high");

    let err = assert_err!(test.client.create_arbitrary(&mut record).await);
    assert!(err.is_mapping());
}

#[tokio::test]
async fn read_returns_every_field() {
    let test = TrellisTest::new().await;
    let rec_id = assert_ok!(test.memory.insert(
        "Customer",
        [("FullName", Value::from("Ada Lovelace")), ("VIP", Value::Bool(true))],
    ));

    let record = assert_ok!(test.client.read_arbitrary("customer", &rec_id).await);

    assert_eq!(record.record_id.as_deref(), Some(rec_id.as_str()));
    assert_eq!(record.get("fullname"), Some("Ada Lovelace"));
    assert_eq!(record.get("VIP"), Some("True"));
    assert_eq!(record.get("Email"), Some(""));
}

#[tokio::test]
async fn read_of_a_missing_record_is_not_found() {
    let test = TrellisTest::new().await;

    let err = assert_err!(test.client.read_arbitrary("Customer", "0000").await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn update_writes_only_the_given_fields() {
    let test = TrellisTest::new().await;
    let rec_id = assert_ok!(test.memory.insert(
        "Customer",
        [("FullName", "Ada Lovelace"), ("Email", "ada@example.com")],
    ));

    let mut record = ArbitraryRecord::new("Customer");
    record.record_id = Some(rec_id.clone());
    record.set("Email", "countess@example.com");

    assert_ok!(test.client.update_arbitrary(&record).await);

    let stored = assert_ok!(test.client.read_arbitrary("Customer", &rec_id).await);
    assert_eq!(stored.get("Email"), Some("countess@example.com"));
    assert_eq!(stored.get("FullName"), Some("Ada Lovelace"));
}

#[tokio::test]
async fn query_filters_by_internal_or_display_name() {
    let test = TrellisTest::new().await;
    for name in ["Ada Lovelace", "Alan Turing", "Grace Hopper"] {
        assert_ok!(test.memory.insert("Customer", [("FullName", name)]));
    }

    let filter = Filter::single(Clause::like("Full Name", "a%"));
    let records = assert_ok!(test.client.query_arbitrary("Customer", filter).await);

    let names: Vec<_> = records.iter().filter_map(|r| r.get("FullName")).collect();
    assert_eq!(names, ["Ada Lovelace", "Alan Turing"]);
}

#[tokio::test]
async fn delete_by_type_and_id_ignores_missing_records() {
    let test = TrellisTest::new().await;
    let rec_id = assert_ok!(test.memory.insert("Customer", [("FullName", "Ada Lovelace")]));

    assert_ok!(test.client.delete_by_type_and_id("Customer", &rec_id).await);
    assert_ok!(test.client.delete_by_type_and_id("Customer", &rec_id).await);
    assert!(test.memory.records("Customer").is_empty());
}

#[tokio::test]
async fn type_ids_come_from_the_definition() {
    let test = TrellisTest::new().await;

    let id = assert_ok!(test.client.business_object_type_id("journal").await);
    assert_eq!(id, "934ec7f2a7fa3ab2bd43de4b91");

    let err = assert_err!(test.client.business_object_type_id("Problem").await);
    assert!(err.is_mapping());
}
