//! One fetch-decode-publish cycle against a fixed todo URL.
//!
//! # Design
//! The use-case is the only writer of its [`FetchState`]; observers get
//! read-only `watch::Receiver`s. Each invocation performs exactly two state
//! updates: raise the loading flag, then clear it together with the outcome.
//! If the future is dropped in between, a guard publishes a network failure
//! so the flag never stays raised. Nothing is cached and nothing is retried.

use std::sync::Arc;

use scopeguard::ScopeGuard;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::{build_request, parse_todo};
use crate::error::{ApiError, ErrorKind};
use crate::state::{FetchOutcome, FetchState};
use crate::transport::Transport;
use crate::types::TodoItem;

/// Outcome message published when a fetch is dropped before completing.
pub const DROPPED_MESSAGE: &str = "request dropped before completion";

/// Fetches one todo per invocation and publishes a [`FetchState`] to subscribers.
pub struct FetchTodoUseCase<T> {
    transport: T,
    url: String,
    state: watch::Sender<FetchState>,
}

impl<T: Transport> FetchTodoUseCase<T> {
    pub fn new(transport: T, url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            transport,
            url: url.into(),
            state,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Subscribe to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Issue one request and publish its outcome.
    ///
    /// Overlapping calls are allowed; each completion clears the loading
    /// flag and the last one to finish determines the published outcome.
    /// Dropping the returned future mid-flight clears the flag and publishes
    /// a network failure carrying [`DROPPED_MESSAGE`].
    pub async fn fetch(&self) -> Result<TodoItem, ApiError> {
        self.state.send_modify(|state| state.is_loading = true);
        tracing::debug!(url = %self.url, "fetching todo");

        let url = &self.url;
        let pending = scopeguard::guard(&self.state, move |state| {
            tracing::warn!(url = %url, "fetch dropped before completion");
            state.send_modify(|state| {
                state.is_loading = false;
                state.outcome = Some(FetchOutcome::Failed {
                    kind: ErrorKind::Network,
                    message: DROPPED_MESSAGE.to_string(),
                });
            });
        });

        let result = match self.transport.execute(build_request(&self.url)).await {
            Ok(response) => parse_todo(response),
            Err(err) => Err(err),
        };

        let outcome = match &result {
            Ok(todo) => {
                tracing::info!(id = todo.id, user_id = todo.user_id, "todo loaded");
                FetchOutcome::Loaded(todo.clone())
            }
            Err(err) => {
                tracing::warn!(url = %self.url, kind = ?err.kind(), "fetch failed: {err}");
                FetchOutcome::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        };
        ScopeGuard::into_inner(pending).send_modify(|state| {
            state.is_loading = false;
            state.outcome = Some(outcome);
        });

        result
    }

    /// Run [`Self::fetch`] on the current tokio runtime.
    pub fn spawn_fetch(self: &Arc<Self>) -> JoinHandle<Result<TodoItem, ApiError>>
    where
        T: 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.fetch().await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use tokio::sync::Notify;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse};

    const URL: &str = "https://jsonplaceholder.typicode.com/todos/1";
    const FIXTURE: &str = r#"{"userId":1,"id":1,"title":"delectus aut autem","completed":false}"#;

    /// Replies with a canned result, optionally holding the reply until
    /// `gate` is notified.
    struct ScriptedTransport {
        reply: Result<HttpResponse, ApiError>,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
        urls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(reply: Result<HttpResponse, ApiError>) -> Self {
            Self {
                reply,
                gate: None,
                calls: AtomicUsize::new(0),
                urls: Mutex::new(Vec::new()),
            }
        }

        fn ok(status: u16, body: &str) -> Self {
            Self::new(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }))
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }
    }

    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(request.url);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply.clone()
        }
    }

    fn expected_todo() -> TodoItem {
        TodoItem {
            user_id: 1,
            id: 1,
            title: "delectus aut autem".to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn success_delivers_value_and_clears_flag() {
        let use_case = FetchTodoUseCase::new(ScriptedTransport::ok(200, FIXTURE), URL);

        let todo = use_case.fetch().await.unwrap();
        assert_eq!(todo, expected_todo());

        let state = use_case.state();
        assert!(!state.is_loading);
        assert_eq!(state.todo(), Some(&expected_todo()));
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn requests_the_configured_url() {
        let use_case = FetchTodoUseCase::new(ScriptedTransport::ok(200, FIXTURE), URL);
        use_case.fetch().await.unwrap();
        assert_eq!(*use_case.transport.urls.lock().unwrap(), vec![URL.to_string()]);
        assert_eq!(use_case.url(), URL);
    }

    #[tokio::test]
    async fn empty_object_reports_decoding_failure() {
        let use_case = FetchTodoUseCase::new(ScriptedTransport::ok(200, "{}"), URL);

        let err = use_case.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);

        let state = use_case.state();
        assert!(!state.is_loading);
        assert!(state.todo().is_none());
        assert!(matches!(
            state.outcome,
            Some(FetchOutcome::Failed {
                kind: ErrorKind::Decoding,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn transport_failure_reports_network_failure() {
        let transport =
            ScriptedTransport::new(Err(ApiError::Network("connection refused".to_string())));
        let use_case = FetchTodoUseCase::new(transport, URL);

        let err = use_case.fetch().await.unwrap_err();
        assert_eq!(err, ApiError::Network("connection refused".to_string()));

        let state = use_case.state();
        assert!(!state.is_loading);
        assert!(state.todo().is_none());
        assert_eq!(state.error(), Some("network error: connection refused"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_network_failure() {
        let use_case = FetchTodoUseCase::new(ScriptedTransport::ok(503, "unavailable"), URL);
        let err = use_case.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(use_case.state().error(), Some("HTTP 503: unavailable"));
    }

    #[tokio::test]
    async fn failure_is_not_retried() {
        let transport = ScriptedTransport::new(Err(ApiError::Network("down".to_string())));
        let use_case = FetchTodoUseCase::new(transport, URL);
        let _ = use_case.fetch().await;
        assert_eq!(use_case.transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn every_invocation_hits_the_transport() {
        let use_case = FetchTodoUseCase::new(ScriptedTransport::ok(200, FIXTURE), URL);
        use_case.fetch().await.unwrap();
        use_case.fetch().await.unwrap();
        assert_eq!(use_case.transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn flag_is_raised_only_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let transport = ScriptedTransport::ok(200, FIXTURE).gated(Arc::clone(&gate));
        let use_case = Arc::new(FetchTodoUseCase::new(transport, URL));
        let mut rx = use_case.subscribe();
        assert!(!rx.borrow_and_update().is_loading);

        let handle = use_case.spawn_fetch();

        rx.changed().await.unwrap();
        {
            let state = rx.borrow_and_update();
            assert!(state.is_loading);
            assert!(state.outcome.is_none());
        }

        gate.notify_one();
        let todo = handle.await.unwrap().unwrap();
        assert_eq!(todo, expected_todo());

        rx.changed().await.unwrap();
        let state = rx.borrow_and_update().clone();
        assert!(!state.is_loading);
        assert_eq!(state.todo(), Some(&expected_todo()));
    }

    #[tokio::test]
    async fn previous_outcome_stays_visible_while_reloading() {
        let gate = Arc::new(Notify::new());
        let transport = ScriptedTransport::ok(200, FIXTURE).gated(Arc::clone(&gate));
        let use_case = Arc::new(FetchTodoUseCase::new(transport, URL));

        gate.notify_one();
        use_case.fetch().await.unwrap();

        let mut rx = use_case.subscribe();
        let handle = use_case.spawn_fetch();
        rx.changed().await.unwrap();
        {
            let state = rx.borrow_and_update();
            assert!(state.is_loading);
            assert_eq!(state.todo(), Some(&expected_todo()));
        }

        gate.notify_one();
        handle.await.unwrap().unwrap();
        assert!(!use_case.state().is_loading);
    }

    /// Never replies.
    struct StalledTransport;

    impl Transport for StalledTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            std::future::pending().await
        }
    }

    /// The n-th call waits on the n-th gate, then returns the n-th body.
    struct SequencedTransport {
        steps: Vec<(Arc<Notify>, HttpResponse)>,
        calls: AtomicUsize,
    }

    impl Transport for SequencedTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            let (gate, response) = &self.steps[index];
            gate.notified().await;
            Ok(response.clone())
        }
    }

    fn todo_body(id: i64, title: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: format!(r#"{{"userId":1,"id":{id},"title":"{title}","completed":false}}"#),
        }
    }

    #[tokio::test]
    async fn dropped_fetch_clears_flag_and_reports_failure() {
        let use_case = FetchTodoUseCase::new(StalledTransport, URL);

        let elapsed =
            tokio::time::timeout(std::time::Duration::from_millis(20), use_case.fetch()).await;
        assert!(elapsed.is_err());

        let state = use_case.state();
        assert!(!state.is_loading);
        assert!(state.todo().is_none());
        assert_eq!(state.error(), Some(DROPPED_MESSAGE));
        assert!(matches!(
            state.outcome,
            Some(FetchOutcome::Failed {
                kind: ErrorKind::Network,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn aborted_spawn_clears_flag() {
        let use_case = Arc::new(FetchTodoUseCase::new(StalledTransport, URL));
        let mut rx = use_case.subscribe();

        let handle = use_case.spawn_fetch();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading);

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        let state = use_case.state();
        assert!(!state.is_loading);
        assert_eq!(state.error(), Some(DROPPED_MESSAGE));
    }

    #[tokio::test]
    async fn overlapping_fetches_publish_last_response() {
        let first_gate = Arc::new(Notify::new());
        let second_gate = Arc::new(Notify::new());
        let transport = SequencedTransport {
            steps: vec![
                (Arc::clone(&first_gate), todo_body(1, "first")),
                (Arc::clone(&second_gate), todo_body(2, "second")),
            ],
            calls: AtomicUsize::new(0),
        };
        let use_case = Arc::new(FetchTodoUseCase::new(transport, URL));
        let mut rx = use_case.subscribe();

        let first = use_case.spawn_fetch();
        rx.changed().await.unwrap();
        let second = use_case.spawn_fetch();
        while use_case.transport.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        assert!(use_case.state().is_loading);

        // Release in reverse order: the second request answers first.
        second_gate.notify_one();
        let second_todo = second.await.unwrap().unwrap();
        assert_eq!(second_todo.title, "second");
        let state = use_case.state();
        assert!(!state.is_loading);
        assert_eq!(state.todo(), Some(&second_todo));

        first_gate.notify_one();
        let first_todo = first.await.unwrap().unwrap();
        assert_eq!(first_todo.title, "first");

        let state = use_case.state();
        assert!(!state.is_loading);
        assert_eq!(state.todo(), Some(&first_todo));
    }
}
