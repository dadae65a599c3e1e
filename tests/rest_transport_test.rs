use portfolio_admin::clients::AuthClient;
use portfolio_admin::contact_actor::ContactAction;
use portfolio_admin::framework::{
    feedback_channel, CollectionActor, CollectionContext, CollectionStatus, NotificationLevel,
};
use portfolio_admin::model::{
    ContactMessage, ImageSource, Project, ProjectFields, Skill, SkillFields,
};
use portfolio_admin::session::{Credentials, Registration, Role, Session, SessionEvent};
use portfolio_admin::transport::rest::ApiClient;
use portfolio_admin::transport::{FileUpload, RestTransport, Transport, TransportError};
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer, session: Session) -> ApiClient {
    ApiClient::with_client(
        reqwest::Client::new(),
        &format!("{}/api", server.uri()),
        session,
    )
}

fn skills(server: &MockServer, session: Session) -> RestTransport<Skill> {
    RestTransport::new(api(server, session))
}

#[tokio::test]
async fn list_sends_bearer_token_and_decodes_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"_id": "s1", "name": "Rust", "category": "Backend", "level": 90},
            {"id": "s2", "name": "Go", "category": "Backend"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login").with_token("tok"));
    let items = transport.list().await.expect("list ok");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "s1");
    assert_eq!(items[0].level, Some(90));
    assert_eq!(items[1].level, None);
}

#[tokio::test]
async fn create_returns_echoed_entity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/skills"))
        .and(body_json(serde_json::json!({"name": "Rust", "category": "Backend"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!(
            {"id": "s9", "name": "Rust", "category": "Backend"}
        )))
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let created = transport
        .create(&SkillFields::new("Rust", "Backend"))
        .await
        .unwrap();

    assert_eq!(created.map(|s| s.id), Some("s9".to_string()));
}

#[tokio::test]
async fn update_without_json_body_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/skills/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let updated = transport
        .update(&"s1".to_string(), &SkillFields::new("Rust", "Backend"))
        .await
        .unwrap();

    assert_eq!(updated, None);
}

#[tokio::test]
async fn accepted_create_with_acknowledgement_body_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/skills"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"message": "Skill created"})),
        )
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let created = transport
        .create(&SkillFields::new("Rust", "Backend"))
        .await
        .unwrap();

    assert_eq!(created, None);
}

#[tokio::test]
async fn acknowledged_create_reloads_instead_of_failing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/skills"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"message": "Skill created"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "s1", "name": "Rust", "category": "Backend"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let transport: Arc<dyn Transport<Skill>> =
        Arc::new(skills(&server, Session::new("/login")));
    let (feedback, mut notifications) = feedback_channel();
    let (actor, client) = CollectionActor::<Skill>::new(8);
    tokio::spawn(actor.run(CollectionContext::new(transport, feedback)));

    let created = client
        .create(SkillFields::new("Rust", "Backend"))
        .await
        .unwrap();
    assert_eq!(created, None);

    let mut watcher = client.subscribe();
    watcher
        .wait_for(|s| s.status == CollectionStatus::Ready && s.contains(&"s1".to_string()))
        .await
        .unwrap();

    let note = notifications.try_recv().unwrap();
    assert_eq!(note.level, NotificationLevel::Success);
    assert_eq!(note.message, "Skill added successfully!");
    assert!(notifications.try_recv().is_err());
}

#[tokio::test]
async fn update_with_acknowledgement_body_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/skills/s1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Updated"})),
        )
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let updated = transport
        .update(&"s1".to_string(), &SkillFields::new("Rust", "Backend"))
        .await
        .unwrap();

    assert_eq!(updated, None);
}

#[tokio::test]
async fn list_with_unexpected_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
        )
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let err = transport.list().await.unwrap_err();

    assert!(matches!(err, TransportError::InvalidResponse(_)));
}

#[tokio::test]
async fn json_error_body_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/skills"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Skill already exists",
            "errors": {"name": "duplicate"}
        })))
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let err = transport
        .create(&SkillFields::new("Rust", "Backend"))
        .await
        .unwrap_err();

    match err {
        TransportError::Server {
            status,
            message,
            errors,
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Skill already exists");
            assert_eq!(errors.get("name").map(String::as_str), Some("duplicate"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/skills/s1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let err = transport.delete(&"s1".to_string()).await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn json_error_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/skills/s1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    let err = transport.delete(&"s1".to_string()).await.unwrap_err();

    assert_eq!(err.to_string(), "Something went wrong");
}

#[tokio::test]
async fn unauthorized_invalidates_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Token expired"})),
        )
        .mount(&server)
        .await;

    let session = Session::new("/login").with_token("stale");
    let mut events = session.subscribe();
    let transport = skills(&server, session.clone());

    let err = transport.list().await.unwrap_err();

    assert_eq!(err, TransportError::Unauthorized);
    assert!(!session.is_authenticated());
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::LoginRequired {
            redirect_to: "/login".into()
        }
    );
}

#[tokio::test]
async fn fetch_maps_404_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/skills/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not found"})),
        )
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    assert_eq!(transport.fetch(&"gone".to_string()).await, Ok(None));
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/skills/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let transport = skills(&server, Session::new("/login"));
    assert_eq!(transport.delete(&"s1".to_string()).await, Ok(()));
}

#[tokio::test]
async fn mark_as_read_hits_action_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/contact/m1/read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "m1", "name": "Ada", "email": "ada@example.com",
            "message": "Hi", "service": "Consulting", "read": true,
            "createdAt": "2024-05-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport: RestTransport<ContactMessage> =
        RestTransport::new(api(&server, Session::new("/login")));
    let message = transport
        .action(&"m1".to_string(), &ContactAction::MarkAsRead)
        .await
        .unwrap()
        .expect("echoed message");

    assert!(message.read);
    assert!(message.created_at.is_some());
}

#[tokio::test]
async fn project_is_sent_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"techStack\""))
        .and(body_string_contains("filename=\"shot.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "p1", "title": "Site", "description": "d",
            "image": "/uploads/shot.png", "techStack": ["Rust"], "featured": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport: RestTransport<Project> =
        RestTransport::new(api(&server, Session::new("/login")));
    let fields = ProjectFields::new("Site", "d")
        .tech("Rust")
        .featured(true)
        .image(ImageSource::Upload(FileUpload {
            file_name: "shot.png".into(),
            content_type: "image/png".into(),
            bytes: b"fake-png-bytes".to_vec(),
        }));

    let created = transport.create(&fields).await.unwrap().unwrap();
    assert_eq!(created.tech_stack, vec!["Rust"]);
    assert!(created.featured);
}

#[tokio::test]
async fn login_stores_token_for_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(serde_json::json!({"email": "admin@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {"id": "u1", "name": "Admin", "email": "admin@example.com", "role": "ADMIN"},
            "token": "fresh"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new("/login");
    let api = api(&server, session.clone());
    let auth = AuthClient::new(api.clone());

    let user = auth
        .login(&Credentials {
            email: "admin@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(user.role, Role::Admin);
    assert!(session.is_admin());

    let transport: RestTransport<Skill> = RestTransport::new(api);
    assert_eq!(transport.list().await, Ok(vec![]));

    auth.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn register_signs_in_when_token_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(serde_json::json!({
            "name": "Ada", "email": "ada@example.com", "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "user": {"_id": "u2", "name": "Ada", "email": "ada@example.com", "role": "USER"},
            "token": "new-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new("/login");
    let auth = AuthClient::new(api(&server, session.clone()));
    let user = auth
        .register(&Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap()
        .expect("registered user");

    assert_eq!(user.id, "u2");
    assert_eq!(user.role, Role::User);
    assert_eq!(session.token().as_deref(), Some("new-token"));
    assert!(!session.is_admin());
}

#[tokio::test]
async fn register_without_token_leaves_session_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"message": "Registered"})),
        )
        .mount(&server)
        .await;

    let session = Session::new("/login");
    let auth = AuthClient::new(api(&server, session.clone()));
    let user = auth
        .register(&Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(user, None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn collection_over_rest_reports_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/skills/s1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "s1", "name": "Rust", "category": "Backend"}
        ])))
        .mount(&server)
        .await;

    let session = Session::new("/login").with_token("tok");
    let transport: Arc<dyn Transport<Skill>> = Arc::new(skills(&server, session.clone()));
    let (feedback, mut notifications) = feedback_channel();
    let (actor, client) = CollectionActor::<Skill>::new(8);
    tokio::spawn(actor.run(CollectionContext::new(transport, feedback)));

    client.load().await.unwrap();
    let err = client.delete("s1".into()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(client.items().len(), 1);
    assert!(!session.is_authenticated());
    let note = notifications.try_recv().unwrap();
    assert_eq!(note.level, NotificationLevel::Error);
    assert_eq!(
        note.message,
        "Failed to delete skill: Session expired, please log in again"
    );
}
