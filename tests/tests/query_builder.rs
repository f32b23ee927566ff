use pretty_assertions::assert_eq;
use tests::{
    assert_err, assert_none, assert_ok, assert_some,
    fixtures::{self, Customer, Incident, Journal},
    TrellisTest,
};
use trellis::{
    driver::Operation, schema::RECORD_ID_FIELD, Clause, Config, Conjunction, Operator, Value,
};

async fn seed_incidents(test: &TrellisTest) -> Vec<String> {
    let rows = [
        ("1001", "Printer offline", "New", 2),
        ("1002", "VPN drops", "Open", 1),
        ("1003", "New laptop", "Open", 4),
        ("1004", "Password reset", "Closed", 3),
        ("1005", "Monitor flicker", "New", 5),
    ];

    let mut ids = vec![];
    for (number, summary, status, priority) in rows {
        let id = assert_ok!(test.memory.insert(
            "Incident",
            [
                ("IncidentID", Value::from(number)),
                ("ShortDescription", Value::from(summary)),
                ("Status", Value::from(status)),
                ("Priority", Value::from(priority)),
            ],
        ));
        ids.push(id);
    }
    ids
}

#[test]
fn for_key_ors_every_key_field() {
    let query = Incident::query().for_key("1002");

    assert_eq!(query.top_count(), Some(1));
    assert_eq!(query.conjunction(), Conjunction::Or);

    let names: Vec<_> = query.clauses().iter().map(|c| c.property.as_str()).collect();
    assert_eq!(names, [RECORD_ID_FIELD, "IncidentID"]);
    assert!(query.clauses().iter().all(|c| c.value == "1002"));
}

#[test]
fn for_key_replaces_earlier_clauses() {
    let query = assert_ok!(Incident::query().filter(Incident::fields().status().eq("New")))
        .end_clause()
        .for_key("1002");

    assert_eq!(query.clauses().len(), 2);
    assert!(query.clauses().iter().all(|c| c.property != "Status"));
}

#[test]
fn for_record_id_matches_one_record() {
    let query = Incident::query().for_record_id("9A1F");

    assert_eq!(query.top_count(), Some(1));
    assert_eq!(query.clauses(), [Clause::eq(RECORD_ID_FIELD, "9A1F")]);
}

#[test]
fn filter_by_supports_operators_without_syntax() {
    let fields = Incident::fields();
    let query = assert_ok!(Incident::query().filter_by(
        fields.short_description(),
        Operator::Contains,
        "printer"
    ));
    let query = assert_ok!(query.and_by(fields.description(), Operator::Empty, "ignored"));
    let query = query.end_clause();

    assert_eq!(query.clauses()[0].operator, Operator::Contains);
    assert_eq!(query.clauses()[1], Clause::empty("Description"));
}

#[test]
fn include_records_the_relationship() {
    let query = Incident::query()
        .include(Incident::fields().journals())
        .include(Incident::fields().customer());

    let includes = query.includes();
    assert_eq!(includes.len(), 2);
    assert_eq!(includes[0].relationship, "IncidentOwnsJournals");
    assert_eq!(includes[0].target, "Journal");
    assert!(includes[0].collection);
    assert_eq!(includes[1].property, "customer");
    assert!(!includes[1].collection);
}

#[tokio::test]
async fn execute_returns_matching_records() {
    let test = TrellisTest::new().await;
    seed_incidents(&test).await;

    let query = assert_ok!(Incident::query().filter(Incident::fields().status().eq("open")));
    let open = assert_ok!(test.client.execute(query).await);
    let mut summaries: Vec<_> = open.iter().map(|i| i.short_description.as_str()).collect();
    summaries.sort();
    assert_eq!(summaries, ["New laptop", "VPN drops"]);

    let fields = Incident::fields();
    let clauses = assert_ok!(Incident::query().filter(fields.priority().eq(1)));
    let clauses = assert_ok!(clauses.or(fields.priority().eq(5)));
    let records = assert_ok!(test.client.execute(clauses).await);
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn records_load_typed_fields() {
    let test = TrellisTest::new().await;
    let ids = seed_incidents(&test).await;

    let incident = assert_ok!(test.client.get(Incident::query().for_key("1003")).await);

    assert_eq!(incident.rec_id.as_deref(), Some(ids[2].as_str()));
    assert_eq!(incident.incident_id.as_deref(), Some("1003"));
    assert_eq!(incident.priority, Some(4));
    assert_eq!(incident.status.as_deref(), Some("Open"));
    assert!(!incident.urgent);
    assert!(incident.journals.is_empty());
    assert!(incident.notes.is_empty());
}

#[tokio::test]
async fn for_key_finds_records_by_record_id_too() {
    let test = TrellisTest::new().await;
    let ids = seed_incidents(&test).await;

    let incident = assert_ok!(test.client.get(Incident::query().for_key(&ids[4])).await);
    assert_eq!(incident.incident_id.as_deref(), Some("1005"));
}

#[tokio::test]
async fn first_returns_none_when_nothing_matches() {
    let test = TrellisTest::new().await;
    seed_incidents(&test).await;

    let missing = assert_ok!(test.client.first(Incident::query().for_key("9999")).await);
    assert_none!(missing);

    let err = assert_err!(test.client.get(Incident::query().for_key("9999")).await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn unbounded_queries_page_through_results() {
    let mut test = TrellisTest::with_config(Config {
        page_size: 2,
        ..Config::default()
    })
    .await;
    seed_incidents(&test).await;
    test.log().clear();

    let all = assert_ok!(test.client.execute(Incident::query()).await);

    assert_eq!(all.len(), 5);
    assert_eq!(test.log().count_queries(), 3);

    let pages: Vec<_> = test.log().with_ops(|ops| {
        ops.iter()
            .filter_map(|op| match &op.operation {
                Operation::QueryRecords(query) => query.page.map(|page| page.number),
                _ => None,
            })
            .collect()
    });
    assert_eq!(pages, [1, 2, 3]);
}

#[tokio::test]
async fn single_record_queries_do_not_page() {
    let mut test = TrellisTest::with_config(Config {
        page_size: 1,
        ..Config::default()
    })
    .await;
    seed_incidents(&test).await;
    test.log().clear();

    let first = assert_ok!(test.client.first(Incident::query()).await);
    assert_some!(first);
    assert_eq!(test.log().count_queries(), 1);
}

#[tokio::test]
async fn include_resolves_relationships_per_record() {
    let test = TrellisTest::new().await;
    let ids = seed_incidents(&test).await;

    for details in ["Called the user", "Replaced toner"] {
        assert_ok!(test.memory.insert(
            "Journal",
            [("Details", details), ("ParentRecID", ids[0].as_str())],
        ));
    }

    let query = assert_ok!(Incident::query().filter(Incident::fields().incident_id().eq("1001")))
        .end_clause()
        .include(Incident::fields().journals());
    let incidents = assert_ok!(test.client.execute(query).await);

    assert_eq!(incidents.len(), 1);
    let details: Vec<_> = incidents[0]
        .journals
        .iter()
        .map(|journal| journal.details.as_str())
        .collect();
    assert_eq!(details, ["Called the user", "Replaced toner"]);
    assert!(incidents[0]
        .journals
        .iter()
        .all(|journal| journal.parent_rec_id.as_deref() == Some(ids[0].as_str())));
}

#[tokio::test]
async fn for_children_scopes_to_the_parent() {
    let test = TrellisTest::new().await;
    let customer = assert_ok!(test.memory.insert("Customer", [("FullName", "Grace Hopper")]));
    let other = assert_ok!(test.memory.insert("Customer", [("FullName", "Alan Turing")]));

    for (summary, owner) in [("Mine", &customer), ("Also mine", &customer), ("Theirs", &other)] {
        assert_ok!(test.memory.insert(
            "Incident",
            [("ShortDescription", summary), ("CustomerRecID", owner.as_str())],
        ));
    }

    let query = Customer::query().for_children(Customer::fields().incidents(), &customer);
    let owned = assert_ok!(test.client.execute(query).await);

    let mut summaries: Vec<_> = owned.iter().map(|i| i.short_description.clone()).collect();
    summaries.sort();
    assert_eq!(summaries, ["Also mine", "Mine"]);
}

#[tokio::test]
async fn query_failures_are_read_errors() {
    let test = TrellisTest::new().await;
    seed_incidents(&test).await;
    test.memory.fail_queries(1);

    let err = assert_err!(test.client.execute(Incident::query()).await);
    assert!(err.is_read());
    assert!(err.to_string().contains("the search service is unavailable"));
    assert!(err.root().is_driver_operation_failed());

    // The failure is not sticky
    assert_ok!(test.client.execute(Journal::query()).await);
}

#[tokio::test]
async fn for_business_object_reads_another_type_with_the_same_fields() {
    let test = TrellisTest::new().await;
    seed_incidents(&test).await;

    let mut service_request = fixtures::incident_def();
    service_request.name = "ServiceRequest".into();
    service_request.relationships.clear();
    test.memory.define(service_request);

    let request_id = assert_ok!(test.memory.insert(
        "ServiceRequest",
        [
            ("ShortDescription", Value::from("New starter laptop")),
            ("Status", Value::from("Open")),
        ],
    ));

    let query = Incident::query().for_business_object("ServiceRequest");
    assert_eq!(query.type_name(), "ServiceRequest");

    let requests = assert_ok!(test.client.execute(query).await);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].rec_id.as_deref(), Some(request_id.as_str()));
    assert_eq!(requests[0].short_description, "New starter laptop");

    let query = assert_ok!(Incident::query().filter(Incident::fields().status().eq("Open")))
        .end_clause()
        .for_business_object("Problem");
    let err = assert_err!(test.client.execute(query).await);
    assert!(err.is_mapping());
    assert_eq!(Incident::query().type_name(), "Incident");
}
