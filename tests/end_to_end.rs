//! Full round trip: form controller -> HTTP client -> API -> record store

use checkin::api::{serve_on, ApiConfig, AppState};
use checkin::client::{ClientConfig, ClientError, StoreClient};
use checkin::form::{
    Field, PageView, SubmissionController, SubmissionState, SubmitOutcome,
};
use checkin::store::{open_store, LogIterator, StoreBackend, StoreConfig, StoredEntry};
use tempfile::TempDir;
use tokio::sync::oneshot;

struct TestServer {
    url: String,
    store_config: StoreConfig,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
    _dir: TempDir,
}

impl TestServer {
    async fn start(backend: StoreBackend) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store_config = StoreConfig::new(dir.path()).backend(backend);
        let store = open_store(&store_config).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let (tx, rx) = oneshot::channel::<()>();
        let state = AppState::new(store, ApiConfig::default());
        let handle = tokio::spawn(async move {
            serve_on(listener, state, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            url,
            store_config,
            shutdown: Some(tx),
            handle,
            _dir: dir,
        }
    }

    fn client(&self) -> StoreClient {
        StoreClient::new(ClientConfig::new(self.url.clone())).unwrap()
    }

    fn logged_entries(&self) -> Vec<StoredEntry> {
        if !self.store_config.log_path().exists() {
            return Vec::new();
        }
        LogIterator::new(self.store_config.log_path())
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

#[tokio::test]
async fn test_complete_form_is_stored_and_thanked() {
    let server = TestServer::start(StoreBackend::Log).await;

    let mut form = SubmissionController::new(server.client());
    form.set_name("Samina");
    form.set_food("Yes");
    form.set_mood(8);
    form.set_water("3 cups");

    let token = match form.submit().await {
        SubmitOutcome::Created(token) => token,
        other => panic!("expected Created, got {:?}", other),
    };

    assert!(token.is_truthy());
    assert!(matches!(form.state(), SubmissionState::Success { .. }));
    assert_eq!(PageView::new(&form.state(), form.values()), PageView::ThankYou);
    assert!(form.notice().is_none());

    let stored = server.logged_entries();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, token);
    assert_eq!(stored[0].entry.name, "Samina");
    assert_eq!(stored[0].entry.food, "Yes");
    assert_eq!(stored[0].entry.mood, 8);
    assert_eq!(stored[0].entry.water, "3 cups");

    server.stop().await;
}

#[tokio::test]
async fn test_missing_name_never_reaches_store() {
    let server = TestServer::start(StoreBackend::Log).await;

    let mut form = SubmissionController::new(server.client());
    form.set_food("No");
    form.set_mood(5);
    form.set_water("1 glass");

    match form.submit().await {
        SubmitOutcome::Invalid(report) => {
            assert_eq!(report.failed_fields(), vec![Field::Name]);
        }
        other => panic!("expected Invalid, got {:?}", other),
    }

    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(form.notice().map(|n| n.is_destructive()).unwrap_or(false));
    assert!(server.logged_entries().is_empty());

    // Fixing the name lets the same form go through
    form.set_name("Samina");
    assert!(matches!(form.submit().await, SubmitOutcome::Created(_)));
    assert_eq!(server.logged_entries().len(), 1);

    server.stop().await;
}

#[tokio::test]
async fn test_two_respondents_get_two_entries_on_sqlite() {
    let server = TestServer::start(StoreBackend::Sqlite).await;

    let mut first = SubmissionController::new(server.client());
    first.set_name("Samina");
    first.set_food("Yes");
    first.set_mood(8);
    first.set_water("3 cups");

    let mut second = SubmissionController::new(server.client());
    second.set_name("Samina");
    second.set_food("Yes");
    second.set_mood(8);
    second.set_water("3 cups");

    let a = match first.submit().await {
        SubmitOutcome::Created(token) => token,
        other => panic!("expected Created, got {:?}", other),
    };
    let b = match second.submit().await {
        SubmitOutcome::Created(token) => token,
        other => panic!("expected Created, got {:?}", other),
    };
    assert_ne!(a, b);

    let health = server.client().health().await.unwrap();
    assert_eq!(health.backend.as_deref(), Some("sqlite"));
    assert_eq!(health.entries, Some(2));

    server.stop().await;
}

#[tokio::test]
async fn test_server_gone_returns_form_to_idle() {
    let server = TestServer::start(StoreBackend::Log).await;
    let client = server.client();
    server.stop().await;

    let mut form = SubmissionController::new(client);
    form.set_name("Samina");
    form.set_food("Yes");
    form.set_mood(8);
    form.set_water("3 cups");

    assert!(matches!(form.submit().await, SubmitOutcome::Failed(_)));
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(form.state().is_submit_enabled());
    assert!(form.notice().is_some());
}

#[tokio::test]
async fn test_health_check_follows_server_lifetime() {
    let server = TestServer::start(StoreBackend::Log).await;
    let live = server.client();
    let after_stop = server.client();

    live.health_check().await.unwrap();

    server.stop().await;

    let err = after_stop.health_check().await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable));
}
