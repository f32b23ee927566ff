use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use tests::{
    assert_err, assert_ok, assert_some,
    fixtures::{Customer, Incident, Journal},
    TrellisTest,
};
use trellis::{Handler, HandlerClient, Result, Value, WriteSummary};

#[tokio::test]
async fn handler_fills_defaults_before_writing() {
    let test = TrellisTest::new().await;
    let mut incident = Incident {
        short_description: "Badge reader broken".to_string(),
        ..Default::default()
    };

    assert_ok!(test.client.create(&mut incident).await);

    assert_eq!(incident.status.as_deref(), Some("New"));
    let rec_id = assert_some!(incident.rec_id.as_deref());
    let stored = assert_some!(test.memory.record("Incident", rec_id));
    assert_eq!(stored["Status"], Value::from("New"));
}

#[tokio::test]
async fn handler_keeps_explicit_values() {
    let test = TrellisTest::new().await;
    let mut incident = Incident {
        short_description: "Badge reader broken".to_string(),
        status: Some("Assigned".to_string()),
        ..Default::default()
    };

    assert_ok!(test.client.create(&mut incident).await);
    assert_eq!(incident.status.as_deref(), Some("Assigned"));
}

#[tokio::test]
async fn handler_dispatches_writes_of_other_types() {
    let test = TrellisTest::new().await;
    let mut incident = Incident {
        short_description: "Server room flooding".to_string(),
        urgent: true,
        ..Default::default()
    };

    assert_ok!(test.client.create(&mut incident).await);

    let rec_id = assert_some!(incident.rec_id.clone());
    let query = Incident::query()
        .for_record_id(&rec_id)
        .include(Incident::fields().journals());
    let loaded = assert_ok!(test.client.get(query).await);

    assert_eq!(loaded.journals.len(), 1);
    assert_eq!(loaded.journals[0].details, "Urgent: Server room flooding");
    assert_eq!(test.memory.records("Incident").len(), 1);
}

#[tokio::test]
async fn default_handler_writes_directly() {
    let test = TrellisTest::new().await;
    let mut journal = Journal {
        details: "Checked cabling".to_string(),
        ..Default::default()
    };

    let summary = assert_ok!(test.client.create(&mut journal).await);

    assert_eq!(summary.written, ["details"]);
    assert_eq!(test.memory.records("Journal").len(), 1);
}

#[tokio::test]
async fn customer_handler_normalizes_email() {
    let test = TrellisTest::new().await;
    let mut customer = Customer {
        full_name: "Ada Lovelace".to_string(),
        email: Some("  Ada@Example.COM ".to_string()),
        vip: Some(true),
        ..Default::default()
    };

    assert_ok!(test.client.create(&mut customer).await);

    let rec_id = assert_some!(customer.rec_id.as_deref());
    let stored = assert_some!(test.memory.record("Customer", rec_id));
    assert_eq!(stored["Email"], Value::from("ada@example.com"));
    assert_eq!(stored["VIP"], Value::Bool(true));
}

#[tokio::test]
async fn validator_without_message_names_the_property() {
    let test = TrellisTest::new().await;
    let mut customer = Customer {
        full_name: "Ada Lovelace".to_string(),
        email: Some("not an address".to_string()),
        ..Default::default()
    };

    let err = assert_err!(test.client.create(&mut customer).await);

    assert!(err.is_validation());
    assert_eq!(err.to_string(), "custom validation failed for email");
    assert!(test.memory.records("Customer").is_empty());
}

#[tokio::test]
async fn customer_handler_guards_delete() {
    let test = TrellisTest::new().await;
    let mut customer = Customer {
        full_name: "Grace Hopper".to_string(),
        ..Default::default()
    };
    assert_ok!(test.client.create(&mut customer).await);
    let customer_id = assert_some!(customer.rec_id.clone());

    let incident_id = assert_ok!(test.memory.insert(
        "Incident",
        [
            ("ShortDescription", "Compiler bug"),
            ("CustomerRecID", customer_id.as_str()),
        ],
    ));

    let err = assert_err!(test.client.delete(&customer).await);
    assert!(err.is_validation());
    assert!(err.to_string().contains("customer still owns incidents"));
    assert_eq!(test.memory.records("Customer").len(), 1);

    assert_ok!(test.client.delete_by_type_and_id("Incident", &incident_id).await);
    assert_ok!(test.client.delete(&customer).await);
    assert!(test.memory.records("Customer").is_empty());
}

static RELAYED_WRITES: AtomicUsize = AtomicUsize::new(0);

/// A journal whose handler sends its own writes back through `dispatch`.
#[derive(Debug, Default, trellis::BusinessObject)]
#[business_object(name = "Journal", handler = RelayHandler)]
struct RelayedJournal {
    #[record_id]
    rec_id: Option<String>,

    #[field]
    details: String,
}

#[derive(Debug, Default)]
struct RelayHandler;

#[async_trait]
impl Handler<RelayedJournal> for RelayHandler {
    async fn create(
        &self,
        model: &mut RelayedJournal,
        client: &HandlerClient<'_, RelayedJournal>,
    ) -> Result<WriteSummary> {
        RELAYED_WRITES.fetch_add(1, Ordering::SeqCst);
        client.dispatch().create(model).await
    }

    async fn delete(
        &self,
        model: &RelayedJournal,
        client: &HandlerClient<'_, RelayedJournal>,
    ) -> Result<()> {
        RELAYED_WRITES.fetch_add(1, Ordering::SeqCst);
        client.dispatch().delete(model).await
    }
}

#[tokio::test]
async fn dispatching_the_handlers_own_type_writes_directly() {
    let test = TrellisTest::new().await;
    let mut journal = RelayedJournal {
        details: "Rebooted switch".to_string(),
        ..Default::default()
    };

    assert_ok!(test.client.create(&mut journal).await);

    assert_eq!(RELAYED_WRITES.load(Ordering::SeqCst), 1);
    let rec_id = assert_some!(journal.rec_id.clone());
    let stored = assert_some!(test.memory.record("Journal", &rec_id));
    assert_eq!(stored["Details"], Value::from("Rebooted switch"));

    assert_ok!(test.client.delete(&journal).await);

    assert_eq!(RELAYED_WRITES.load(Ordering::SeqCst), 2);
    assert!(test.memory.records("Journal").is_empty());
}
