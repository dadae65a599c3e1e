use portfolio_admin::framework::mock::{
    create_mock_transport, expect_create, expect_delete, expect_list, expect_update,
    MockTransport,
};
use portfolio_admin::framework::{
    feedback_channel, CollectionActor, CollectionClient, CollectionContext, CollectionError,
    CollectionStatus, Notification, NotificationLevel, Notifications, ValidationError,
};
use portfolio_admin::model::{ImageSource, Project, ProjectFields, Skill, SkillFields};
use portfolio_admin::transport::{Transport, TransportError};
use std::sync::Arc;

// =============================================================================
// Helpers
// =============================================================================

fn skill(id: &str, name: &str) -> Skill {
    Skill {
        id: id.into(),
        name: name.into(),
        category: "Backend".into(),
        level: None,
    }
}

fn project(id: &str, title: &str) -> Project {
    Project {
        id: id.into(),
        title: title.into(),
        description: "x".into(),
        image: format!("/uploads/{}.png", id),
        live_url: String::new(),
        github_url: String::new(),
        tech_stack: vec!["Rust".into()],
        featured: false,
    }
}

fn start<T: portfolio_admin::framework::RemoteEntity>(
    transport: Arc<dyn Transport<T>>,
) -> (CollectionClient<T>, Notifications) {
    let (feedback, notifications) = feedback_channel();
    let (actor, client) = CollectionActor::<T>::new(16);
    tokio::spawn(actor.run(CollectionContext::new(transport, feedback)));
    (client, notifications)
}

fn drain(notifications: &mut Notifications) -> Vec<Notification> {
    std::iter::from_fn(|| notifications.try_recv().ok()).collect()
}

// =============================================================================
// Consistency with the server
// =============================================================================

#[tokio::test]
async fn mutations_leave_items_equal_to_server_collection() {
    let mut mock = MockTransport::<Skill>::new();
    mock.expect_list().return_ok(vec![]);
    mock.expect_create().return_ok(Some(skill("s1", "Rust")));
    // Second create is accepted without an echo; the collection reconciles.
    mock.expect_create().return_ok(None);
    mock.expect_list()
        .return_ok(vec![skill("s1", "Rust"), skill("s2", "Go")]);
    mock.expect_update("s1".to_string())
        .return_ok(Some(skill("s1", "Rust 2024")));
    mock.expect_delete("s2".to_string()).return_ok(());
    mock.expect_list().return_ok(vec![skill("s1", "Rust 2024")]);

    let (client, mut notifications) = start(mock.transport());
    client.load().await.unwrap();

    let created = client.create(SkillFields::new("Rust", "Backend")).await.unwrap();
    assert_eq!(created, Some(skill("s1", "Rust")));

    let created = client.create(SkillFields::new("Go", "Backend")).await.unwrap();
    assert_eq!(created, None);
    let mut watcher = client.subscribe();
    watcher
        .wait_for(|s| s.status == CollectionStatus::Ready && s.contains(&"s2".to_string()))
        .await
        .unwrap();

    client
        .update("s1".into(), SkillFields::new("Rust 2024", "Backend"))
        .await
        .unwrap();
    client.delete("s2".into()).await.unwrap();

    let before_reload = client.items();
    let server = client.load().await.unwrap();
    assert_eq!(before_reload, server);
    assert!(client.snapshot().pending.is_empty());

    // create, create, update, delete
    let notes = drain(&mut notifications);
    assert_eq!(notes.len(), 4);
    assert!(notes.iter().all(|n| n.level == NotificationLevel::Success));
    assert_eq!(notes[0].message, "Skill added successfully!");
    mock.verify();
}

// =============================================================================
// Local rejections
// =============================================================================

#[tokio::test]
async fn create_with_missing_field_makes_no_call() {
    let mock = MockTransport::<Skill>::new();
    let (client, mut notifications) = start(mock.transport());

    let result = client.create(SkillFields::new("Rust", "")).await;

    assert_eq!(
        result,
        Err(CollectionError::Validation(ValidationError::new(
            "category",
            "Category is required"
        )))
    );
    assert_eq!(mock.call_count(), 0);
    let notes = drain(&mut notifications);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn update_of_absent_id_makes_no_call() {
    let mut mock = MockTransport::<Skill>::new();
    mock.expect_list().return_ok(vec![skill("s1", "Rust")]);
    let (client, mut notifications) = start(mock.transport());
    client.load().await.unwrap();

    let result = client
        .update("missing".into(), SkillFields::new("Go", "Backend"))
        .await;

    assert_eq!(result, Err(CollectionError::NotFound("missing".into())));
    assert_eq!(mock.call_count(), 1);
    assert_eq!(drain(&mut notifications).len(), 1);

    let result = client.delete("missing".into()).await;
    assert!(matches!(result, Err(CollectionError::NotFound(_))));
    assert_eq!(mock.call_count(), 1);
    mock.verify();
}

#[tokio::test]
async fn not_found_is_checked_before_validation() {
    let mock = MockTransport::<Skill>::new();
    let (client, _notifications) = start(mock.transport());

    let result = client.update("nope".into(), SkillFields::new("", "")).await;
    assert!(matches!(result, Err(CollectionError::NotFound(_))));
}

// =============================================================================
// Per-id serialization
// =============================================================================

#[tokio::test]
async fn concurrent_updates_on_same_id_conflict() {
    let (transport, mut requests) = create_mock_transport::<Skill>(10);
    let (client, mut notifications) = start(transport);

    let loader = client.clone();
    let load = tokio::spawn(async move { loader.load().await });
    let respond = expect_list(&mut requests).await.expect("list call");
    respond.send(Ok(vec![skill("s1", "Rust")])).unwrap();
    load.await.unwrap().unwrap();

    // First update reaches the transport and stays open.
    let first_client = client.clone();
    let first = tokio::spawn(async move {
        first_client
            .update("s1".into(), SkillFields::new("Rust 1", "Backend"))
            .await
    });
    let (id, fields, respond) = expect_update(&mut requests).await.expect("update call");
    assert_eq!(id, "s1");
    assert_eq!(fields.name, "Rust 1");
    assert!(client.snapshot().is_pending(&"s1".to_string()));

    // Second update on the same id is rejected without a call.
    let second = client
        .update("s1".into(), SkillFields::new("Rust 2", "Backend"))
        .await;
    assert_eq!(second, Err(CollectionError::Conflict("s1".into())));
    assert!(requests.try_recv().is_err());

    respond.send(Ok(Some(skill("s1", "Rust 1")))).unwrap();
    let updated = first.await.unwrap().unwrap();
    assert_eq!(updated.name, "Rust 1");
    assert_eq!(client.items(), vec![skill("s1", "Rust 1")]);
    assert!(!client.snapshot().is_pending(&"s1".to_string()));

    let levels: Vec<_> = drain(&mut notifications).into_iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![NotificationLevel::Error, NotificationLevel::Success]);
}

#[tokio::test]
async fn distinct_ids_settle_independently() {
    let (transport, mut requests) = create_mock_transport::<Skill>(10);
    let (client, _notifications) = start(transport);

    let loader = client.clone();
    let load = tokio::spawn(async move { loader.load().await });
    expect_list(&mut requests)
        .await
        .unwrap()
        .send(Ok(vec![skill("s1", "Rust"), skill("s2", "Go")]))
        .unwrap();
    load.await.unwrap().unwrap();

    let c = client.clone();
    let slow = tokio::spawn(async move {
        c.update("s1".into(), SkillFields::new("Rust!", "Backend"))
            .await
    });
    let (_, _, slow_respond) = expect_update(&mut requests).await.unwrap();

    let c = client.clone();
    let fast = tokio::spawn(async move { c.delete("s2".into()).await });
    let (id, fast_respond) = expect_delete(&mut requests).await.unwrap();
    assert_eq!(id, "s2");

    // The delete settles while the update is still open.
    fast_respond.send(Ok(())).unwrap();
    fast.await.unwrap().unwrap();
    assert_eq!(client.items(), vec![skill("s1", "Rust")]);

    slow_respond.send(Ok(Some(skill("s1", "Rust!")))).unwrap();
    slow.await.unwrap().unwrap();
    assert_eq!(client.items(), vec![skill("s1", "Rust!")]);
}

// =============================================================================
// Failures never change items
// =============================================================================

#[tokio::test]
async fn failed_delete_keeps_item_and_notifies_once() {
    let mut mock = MockTransport::<Skill>::new();
    mock.expect_list()
        .return_ok(vec![skill("s1", "Rust"), skill("s2", "Go")]);
    mock.expect_delete("s1".to_string())
        .return_err(TransportError::server(500, "Something went wrong"));

    let (client, mut notifications) = start(mock.transport());
    client.load().await.unwrap();

    let result = client.delete("s1".into()).await;

    assert!(matches!(
        result,
        Err(CollectionError::Transport(TransportError::Server { status: 500, .. }))
    ));
    assert!(client.snapshot().contains(&"s1".to_string()));
    assert_eq!(client.items().len(), 2);
    assert_eq!(
        client.snapshot().last_error.as_deref(),
        Some("Something went wrong")
    );

    let notes = drain(&mut notifications);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, "Failed to delete skill: Something went wrong");
    mock.verify();
}

#[tokio::test]
async fn delete_waits_for_server_confirmation() {
    let (transport, mut requests) = create_mock_transport::<Skill>(10);
    let (client, _notifications) = start(transport);

    let loader = client.clone();
    let load = tokio::spawn(async move { loader.load().await });
    expect_list(&mut requests)
        .await
        .unwrap()
        .send(Ok(vec![skill("s1", "Rust")]))
        .unwrap();
    load.await.unwrap().unwrap();

    let c = client.clone();
    let delete = tokio::spawn(async move { c.delete("s1".into()).await });
    let (_, respond) = expect_delete(&mut requests).await.unwrap();

    // Still listed while the server has not answered.
    assert!(client.snapshot().contains(&"s1".to_string()));

    respond.send(Ok(())).unwrap();
    delete.await.unwrap().unwrap();
    assert!(client.items().is_empty());
}

#[tokio::test]
async fn failed_create_leaves_items_unchanged() {
    let (transport, mut requests) = create_mock_transport::<Skill>(10);
    let (client, mut notifications) = start(transport);

    let c = client.clone();
    let create = tokio::spawn(async move { c.create(SkillFields::new("Rust", "Backend")).await });
    let (_, respond) = expect_create(&mut requests).await.unwrap();
    assert_eq!(client.snapshot().pending_creates(), 1);

    respond
        .send(Err(TransportError::Network("connection refused".into())))
        .unwrap();
    let result = create.await.unwrap();

    assert!(matches!(
        result,
        Err(CollectionError::Transport(TransportError::Network(_)))
    ));
    assert!(client.items().is_empty());
    assert_eq!(client.snapshot().pending_creates(), 0);
    assert_eq!(drain(&mut notifications).len(), 1);
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn failed_reconcile_after_create_reads_as_refresh() {
    let mut mock = MockTransport::<Skill>::new();
    mock.expect_create().return_ok(None);
    mock.expect_list()
        .return_err(TransportError::Network("connection reset".into()));

    let (client, mut notifications) = start(mock.transport());
    let created = client.create(SkillFields::new("Rust", "Backend")).await.unwrap();
    assert_eq!(created, None);

    let mut watcher = client.subscribe();
    watcher
        .wait_for(|s| s.status == CollectionStatus::Error)
        .await
        .unwrap();

    let notes = drain(&mut notifications);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].level, NotificationLevel::Success);
    assert_eq!(notes[0].message, "Skill added successfully!");
    assert_eq!(notes[1].level, NotificationLevel::Error);
    assert!(notes[1]
        .message
        .starts_with("Saved, but could not refresh skills:"));
    mock.verify();
}

#[tokio::test]
async fn update_with_echo_replaces_entry() {
    let mut mock = MockTransport::<Project>::new();
    mock.expect_list()
        .return_ok(vec![project("1", "A"), project("2", "B")]);
    mock.expect_update("2".to_string())
        .return_ok(Some(project("2", "B2")));

    let (client, mut notifications) = start(mock.transport());
    client.load().await.unwrap();

    let fields = ProjectFields::from(&project("2", "B"));
    let fields = ProjectFields {
        title: "B2".into(),
        ..fields
    };
    client.update("2".into(), fields).await.unwrap();

    assert_eq!(client.items(), vec![project("1", "A"), project("2", "B2")]);
    let notes = drain(&mut notifications);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Project updated successfully!");
    mock.verify();
}

#[tokio::test]
async fn create_with_empty_title_is_rejected_locally() {
    let mut mock = MockTransport::<Project>::new();
    mock.expect_list().return_ok(vec![project("1", "A")]);
    let (client, mut notifications) = start(mock.transport());
    client.load().await.unwrap();

    let fields = ProjectFields::new("", "x")
        .tech("Rust")
        .image(ImageSource::Existing("/uploads/a.png".into()));
    let result = client.create(fields).await;

    assert!(matches!(result, Err(CollectionError::Validation(_))));
    assert_eq!(mock.call_count(), 1);
    assert_eq!(client.items(), vec![project("1", "A")]);
    let notes = drain(&mut notifications);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Please fill in all required fields");
}

#[tokio::test]
async fn failing_load_keeps_previous_items() {
    let mut mock = MockTransport::<Skill>::new();
    let server = vec![skill("1", "a"), skill("2", "b"), skill("3", "c")];
    mock.expect_list().return_ok(server.clone());
    mock.expect_list()
        .return_err(TransportError::Network("offline".into()));

    let (client, mut notifications) = start(mock.transport());
    client.load().await.unwrap();
    assert_eq!(client.status(), CollectionStatus::Ready);

    assert!(client.load().await.is_err());

    let snapshot = client.snapshot();
    assert_eq!(snapshot.items, server);
    assert_eq!(snapshot.status, CollectionStatus::Error);
    assert!(snapshot.last_error.is_some());
    assert_eq!(drain(&mut notifications).len(), 1);
}

#[tokio::test]
async fn only_latest_load_is_applied() {
    let (transport, mut requests) = create_mock_transport::<Skill>(10);
    let (client, _notifications) = start(transport);

    let c = client.clone();
    let older = tokio::spawn(async move { c.load().await });
    let older_respond = expect_list(&mut requests).await.unwrap();

    let c = client.clone();
    let newer = tokio::spawn(async move { c.load().await });
    let newer_respond = expect_list(&mut requests).await.unwrap();

    newer_respond.send(Ok(vec![skill("new", "n")])).unwrap();
    newer.await.unwrap().unwrap();

    older_respond.send(Ok(vec![skill("old", "o")])).unwrap();
    let stale = older.await.unwrap().unwrap();
    assert_eq!(stale, vec![skill("old", "o")]);

    assert_eq!(client.items(), vec![skill("new", "n")]);
    assert_eq!(client.status(), CollectionStatus::Ready);
}

#[tokio::test]
async fn bodyless_update_is_provisional_until_reload() {
    let mut mock = MockTransport::<Skill>::new();
    mock.expect_list().return_ok(vec![skill("s1", "Rust")]);
    mock.expect_update("s1".to_string()).return_ok(None);
    mock.expect_list().return_ok(vec![skill("s1", "Rust (server)")]);

    let (client, _notifications) = start(mock.transport());
    client.load().await.unwrap();

    let merged = client
        .update("s1".into(), SkillFields::new("Rust (local)", "Backend"))
        .await
        .unwrap();
    assert_eq!(merged.name, "Rust (local)");
    assert!(client.snapshot().is_provisional(&"s1".to_string()));

    client.load().await.unwrap();
    assert!(client.snapshot().provisional.is_empty());
    assert_eq!(client.items(), vec![skill("s1", "Rust (server)")]);
    mock.verify();
}

#[tokio::test]
async fn teardown_discards_in_flight_results() {
    let (transport, mut requests) = create_mock_transport::<Skill>(10);
    let (client, _notifications) = start(transport);

    let loader = client.clone();
    let load = tokio::spawn(async move { loader.load().await });
    expect_list(&mut requests)
        .await
        .unwrap()
        .send(Ok(vec![skill("s1", "Rust")]))
        .unwrap();
    load.await.unwrap().unwrap();

    let c = client.clone();
    let update = tokio::spawn(async move {
        c.update("s1".into(), SkillFields::new("Go", "Backend"))
            .await
    });
    let (_, _, respond) = expect_update(&mut requests).await.unwrap();

    client.teardown().await.unwrap();

    // The server still answers, but nobody applies it.
    let _ = respond.send(Ok(Some(skill("s1", "Go"))));
    assert_eq!(update.await.unwrap(), Err(CollectionError::Dropped));
    assert_eq!(client.items(), vec![skill("s1", "Rust")]);

    assert_eq!(client.load().await, Err(CollectionError::Closed));
}
