use pretty_assertions::assert_eq;
use tests::{
    assert_err, assert_len, assert_none, assert_ok, assert_some,
    fixtures::{Customer, Incident, Journal},
    TrellisTest,
};
use trellis::{BusinessObject, Operator, Value};

async fn create_incident(test: &TrellisTest, summary: &str) -> Incident {
    let mut incident = Incident {
        short_description: summary.to_string(),
        ..Default::default()
    };
    assert_ok!(test.client.create(&mut incident).await);
    incident
}

async fn create_customer(test: &TrellisTest, name: &str) -> Customer {
    let mut customer = Customer {
        full_name: name.to_string(),
        ..Default::default()
    };
    assert_ok!(test.client.create(&mut customer).await);
    customer
}

async fn requestor(test: &TrellisTest, incident_id: &str) -> Option<Customer> {
    let query = Incident::query()
        .for_record_id(incident_id)
        .include(Incident::fields().customer());
    assert_ok!(test.client.get(query).await).customer
}

#[tokio::test]
async fn link_child_to_parent_is_idempotent() {
    let mut test = TrellisTest::new().await;
    let incident = create_incident(&test, "Laptop stolen").await;
    let customer = create_customer(&test, "Ada Lovelace").await;
    let incident_id = assert_some!(incident.rec_id.clone());

    let relation = Incident::fields().customer();
    test.log().clear();

    assert_ok!(
        test.client
            .link_child_to_parent(relation, &customer, &incident_id)
            .await
    );
    assert!(test.log().has_link());

    test.log().clear();
    assert_ok!(
        test.client
            .link_child_to_parent(relation, &customer, &incident_id)
            .await
    );
    assert!(!test.log().has_link());

    let linked = assert_some!(requestor(&test, &incident_id).await);
    assert_eq!(linked.rec_id, customer.rec_id);
    assert_eq!(linked.full_name, "Ada Lovelace");
}

#[tokio::test]
async fn link_one_to_one_replaces_the_existing_child() {
    let test = TrellisTest::new().await;
    let incident = create_incident(&test, "Laptop stolen").await;
    let first = create_customer(&test, "Ada Lovelace").await;
    let second = create_customer(&test, "Grace Hopper").await;
    let incident_id = assert_some!(incident.rec_id.clone());
    let relation = Incident::fields().customer();

    assert_ok!(
        test.client
            .link_one_to_one(relation, &first, &incident_id)
            .await
    );
    assert_ok!(
        test.client
            .link_one_to_one(relation, &second, &incident_id)
            .await
    );

    let children = Incident::query().for_children(relation, &incident_id);
    let children = assert_ok!(test.client.execute(children).await);
    assert_len!(children, 1);
    assert_eq!(children[0].full_name, "Grace Hopper");
}

#[tokio::test]
async fn unlink_removes_the_relation() {
    let test = TrellisTest::new().await;
    let incident = create_incident(&test, "Laptop stolen").await;
    let customer = create_customer(&test, "Ada Lovelace").await;
    let incident_id = assert_some!(incident.rec_id.clone());
    let relation = Incident::fields().customer();

    assert_ok!(
        test.client
            .link_child_to_parent(relation, &customer, &incident_id)
            .await
    );
    assert_ok!(
        test.client
            .unlink_child_from_parent(relation, &customer, &incident_id)
            .await
    );

    assert_none!(requestor(&test, &incident_id).await);
    assert_eq!(test.memory.records("Customer").len(), 1);
}

#[tokio::test]
async fn foreign_key_relationships_set_the_child_field() {
    let test = TrellisTest::new().await;
    let customer = create_customer(&test, "Ada Lovelace").await;
    let first = create_incident(&test, "Laptop stolen").await;
    let second = create_incident(&test, "Phone cracked").await;
    let customer_id = assert_some!(customer.rec_id.clone());

    for incident in [&first, &second] {
        assert_ok!(
            test.client
                .link_child_to_parent(Customer::fields().incidents(), incident, &customer_id)
                .await
        );
    }

    let stored = assert_some!(test
        .memory
        .record("Incident", assert_some!(first.rec_id.as_deref())));
    assert_eq!(stored["CustomerRecID"], Value::from(customer_id.as_str()));

    let query = Customer::query()
        .for_record_id(&customer_id)
        .include(Customer::fields().incidents());
    let loaded = assert_ok!(test.client.get(query).await);

    let mut summaries: Vec<_> = loaded
        .incidents
        .iter()
        .map(|incident| incident.short_description.as_str())
        .collect();
    summaries.sort();
    assert_eq!(summaries, ["Laptop stolen", "Phone cracked"]);
}

#[tokio::test]
async fn linking_an_unsaved_child_fails() {
    let test = TrellisTest::new().await;
    let incident = create_incident(&test, "Laptop stolen").await;
    let customer = Customer {
        full_name: "Nobody".to_string(),
        ..Default::default()
    };

    let err = assert_err!(
        test.client
            .link_child_to_parent(
                Incident::fields().customer(),
                &customer,
                assert_some!(incident.rec_id.as_deref()),
            )
            .await
    );
    assert!(err.is_record_not_found());
}

#[derive(Debug, Default, trellis::BusinessObject)]
#[business_object(name = "Incident")]
struct MisnamedRelationship {
    #[record_id]
    rec_id: Option<String>,

    #[relationship("IncidentOwnsWidgets")]
    widgets: Vec<Journal>,
}

#[derive(Debug, Default, trellis::BusinessObject)]
#[business_object(name = "Incident")]
struct MistypedRelationship {
    #[record_id]
    rec_id: Option<String>,

    #[relationship("IncidentOwnsJournals")]
    journals: Vec<Customer>,
}

#[tokio::test]
async fn unknown_relationship_is_a_mapping_error() {
    let test = TrellisTest::new().await;
    create_incident(&test, "Laptop stolen").await;

    let query = MisnamedRelationship::query().include(MisnamedRelationship::fields().widgets());
    let err = assert_err!(test.client.execute(query).await);

    assert!(err.is_mapping());
    assert!(err.to_string().contains("IncidentOwnsWidgets"));
}

#[tokio::test]
async fn relationship_to_another_type_is_a_mapping_error() {
    let test = TrellisTest::new().await;
    create_incident(&test, "Laptop stolen").await;

    let query = MistypedRelationship::query().include(MistypedRelationship::fields().journals());
    let err = assert_err!(test.client.execute(query).await);

    assert!(err.is_mapping());
    assert_eq!(MistypedRelationship::TYPE_NAME, "Incident");
}

#[tokio::test]
async fn filter_related_matches_records_with_any_matching_child() {
    let test = TrellisTest::new().await;
    let printer = create_incident(&test, "Printer offline").await;
    let laptop = create_incident(&test, "Laptop stolen").await;
    create_incident(&test, "VPN drops").await;

    for (incident, details) in [
        (&printer, "Toner replaced"),
        (&printer, "Escalated to vendor"),
        (&laptop, "Reported to security"),
    ] {
        assert_ok!(test.memory.insert(
            "Journal",
            [
                ("Details", details),
                ("ParentRecID", assert_some!(incident.rec_id.as_deref())),
            ],
        ));
    }

    let query = assert_ok!(Incident::query().filter_related(
        Incident::fields().journals(),
        Journal::fields().details(),
        Operator::Contains,
        "vendor",
    ));
    let matched = assert_ok!(test.client.execute(query).await);

    assert_len!(matched, 1);
    assert_eq!(matched[0].rec_id, printer.rec_id);

    let query = assert_ok!(Incident::query().filter(Incident::fields().status().eq("New")))
        .and_related(
            Incident::fields().journals(),
            Journal::fields().details(),
            Operator::NotEmpty,
            "",
        );
    let journaled = assert_ok!(test.client.execute(assert_ok!(query)).await);
    assert_len!(journaled, 2);
}

#[tokio::test]
async fn filter_related_follows_parent_relationships() {
    let test = TrellisTest::new().await;
    let grace = create_customer(&test, "Grace Hopper").await;
    create_customer(&test, "Alan Turing").await;

    assert_ok!(test.memory.insert(
        "Incident",
        [
            ("ShortDescription", Value::from("Compiler crash")),
            ("Priority", Value::from(1)),
            ("CustomerRecID", Value::from(assert_some!(grace.rec_id.as_deref()))),
        ],
    ));

    let query = assert_ok!(Customer::query().filter_related(
        Customer::fields().incidents(),
        Incident::fields().priority(),
        Operator::LessOrEqual,
        2,
    ));
    let customers = assert_ok!(test.client.execute(query).await);

    assert_len!(customers, 1);
    assert_eq!(customers[0].full_name, "Grace Hopper");
}

#[test]
fn filter_related_is_always_and() {
    let fields = Incident::fields();
    let query = assert_ok!(Incident::query().filter_related(
        fields.journals(),
        Journal::fields().details(),
        Operator::Contains,
        "vendor",
    ));

    let clause = &query.clauses()[0];
    assert_eq!(clause.relationship.as_deref(), Some("IncidentOwnsJournals"));
    assert_eq!(clause.property, "Details");

    let err = assert_err!(query.or(fields.status().eq("New")));
    assert!(err.is_mixed_conjunction());
}

#[tokio::test]
async fn filter_related_through_an_unknown_relationship_is_a_mapping_error() {
    let test = TrellisTest::new().await;
    create_incident(&test, "Laptop stolen").await;

    let query = assert_ok!(MisnamedRelationship::query().filter_related(
        MisnamedRelationship::fields().widgets(),
        Journal::fields().details(),
        Operator::Equal,
        "anything",
    ));
    let err = assert_err!(test.client.execute(query).await);

    assert!(err.is_mapping());
    assert!(err.to_string().contains("IncidentOwnsWidgets"));
}
