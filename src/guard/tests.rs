use super::*;
use crate::config::DEFAULT_TITLE;
use crate::request::{HttpError, MockHttpClient};
use crate::session::TokenStore;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

/// Records every title the guard writes
#[derive(Clone, Default)]
struct RecordingDocument {
    titles: Rc<RefCell<Vec<String>>>,
}

impl RecordingDocument {
    fn last(&self) -> Option<String> {
        self.titles.borrow().last().cloned()
    }

    fn all(&self) -> Vec<String> {
        self.titles.borrow().clone()
    }
}

impl DocumentTitle for RecordingDocument {
    fn set_title(&self, title: &str) {
        self.titles.borrow_mut().push(title.to_string());
    }
}

/// Captures log records per thread; `#[tokio::test]` runs on the test thread
struct CapturingLogger;

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|logs| {
            logs.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

/// Installs the logger (once per process) and clears this thread's records
fn capture_logs() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    CAPTURED.with(|logs| logs.borrow_mut().clear());
}

fn error_logs() -> Vec<String> {
    CAPTURED.with(|logs| {
        logs.borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

fn assert_single_refresh_failure_logged() {
    let errors = error_logs();
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(errors[0].contains("Auth refresh failed"), "{}", errors[0]);
}

const REFRESH_URL: &str = "/auth/refresh";

struct TestEnv {
    guard: NavigationGuard<MockHttpClient, RecordingDocument>,
    document: RecordingDocument,
    tokens: TokenStore,
}

impl TestEnv {
    fn client(&self) -> &MockHttpClient {
        self.guard.session().client()
    }
}

fn setup_env(client: MockHttpClient) -> TestEnv {
    setup_env_with_config(client, NavigationConfig::default())
}

fn setup_env_with_config(client: MockHttpClient, config: NavigationConfig) -> TestEnv {
    let tokens = TokenStore::new();
    let document = RecordingDocument::default();
    let session = AuthSession::new(client, tokens.clone(), &config);
    let guard = NavigationGuard::new(session, document.clone(), &config);
    TestEnv {
        guard,
        document,
        tokens,
    }
}

fn sign_in_redirect(original: &str) -> NavigationDecision {
    NavigationDecision::Redirect(
        Location::for_route(AppRoute::SignIn).with_query("redirect", original),
    )
}

// =========================================================
// Tests
// =========================================================

#[tokio::test]
async fn test_public_routes_always_proceed() {
    let env = setup_env(MockHttpClient::new());

    for route in AppRoute::all().filter(|r| !r.requires_auth()) {
        let decision = env.guard.before_each(&Location::for_route(route)).await;
        assert_eq!(decision, NavigationDecision::Proceed, "{:?}", route);
        let expected = route.title().unwrap_or(DEFAULT_TITLE);
        assert_eq!(env.document.last().as_deref(), Some(expected));
    }

    assert_eq!(env.client().request_count(), 0);
}

#[tokio::test]
async fn test_untitled_route_uses_configured_default_title() {
    let config = NavigationConfig {
        default_title: "Riverside Garage".to_string(),
        ..NavigationConfig::default()
    };
    let env = setup_env_with_config(MockHttpClient::new(), config);

    env.guard.before_each(&Location::parse("/")).await;
    assert_eq!(env.document.last().as_deref(), Some("Riverside Garage"));

    env.guard.before_each(&Location::parse("/sign-up")).await;
    assert_eq!(env.document.last().as_deref(), Some("Sign Up"));
}

#[tokio::test]
async fn test_custom_redirect_param_is_used() {
    let client = MockHttpClient::new();
    client.mock_response(REFRESH_URL, 401, json!({}));
    let config = NavigationConfig {
        redirect_param: "next".to_string(),
        ..NavigationConfig::default()
    };
    let env = setup_env_with_config(client, config);

    assert_eq!(env.guard.redirect_param(), "next");
    let decision = env.guard.before_each(&Location::parse("/inbox")).await;
    assert_eq!(
        decision,
        NavigationDecision::Redirect(
            Location::for_route(AppRoute::SignIn).with_query("next", "/inbox")
        )
    );
}

#[tokio::test]
async fn test_guarded_route_with_token_skips_network() {
    let env = setup_env(MockHttpClient::new());
    env.tokens.set("existing");

    let decision = env.guard.before_each(&Location::parse("/inbox")).await;

    assert_eq!(decision, NavigationDecision::Proceed);
    assert_eq!(env.document.last().as_deref(), Some("Inbox"));
    assert_eq!(env.client().request_count(), 0);
}

#[tokio::test]
async fn test_guarded_route_refresh_success() {
    let client = MockHttpClient::new();
    client.mock_response(REFRESH_URL, 200, json!({ "access_token": "X" }));
    let env = setup_env(client);
    capture_logs();

    let decision = env.guard.before_each(&Location::parse("/dashboard")).await;

    assert_eq!(decision, NavigationDecision::Proceed);
    assert!(error_logs().is_empty());
    assert_eq!(env.tokens.get().as_deref(), Some("X"));
    assert_eq!(env.document.last().as_deref(), Some("Dashboard"));
    assert_eq!(env.client().request_count(), 1);

    // 令牌已在内存中，后续导航不再请求
    env.guard.before_each(&Location::parse("/parking")).await;
    assert_eq!(env.client().request_count(), 1);
}

#[tokio::test]
async fn test_missing_token_redirects_with_original_path() {
    let client = MockHttpClient::new();
    client.mock_response(REFRESH_URL, 200, json!({ "status": "ok" }));
    let env = setup_env(client);
    capture_logs();

    let decision = env
        .guard
        .before_each(&Location::parse("/tickets?page=2"))
        .await;

    assert_eq!(decision, sign_in_redirect("/tickets?page=2"));
    assert!(env.tokens.get().is_none());
    assert_single_refresh_failure_logged();
    // 标题仍设置为原目标的标题，随后的登录页导航会覆盖它
    assert_eq!(env.document.last().as_deref(), Some("Tickets"));
}

#[tokio::test]
async fn test_failed_request_redirects() {
    let client = MockHttpClient::new();
    client.mock_failure(REFRESH_URL, HttpError::NetworkError("offline".into()));
    let env = setup_env(client);
    capture_logs();

    let decision = env.guard.before_each(&Location::parse("/settings")).await;
    assert_eq!(decision, sign_in_redirect("/settings"));
    assert_single_refresh_failure_logged();
}

#[tokio::test]
async fn test_non_success_status_redirects() {
    let client = MockHttpClient::new();
    client.mock_response(REFRESH_URL, 401, json!({ "access_token": "ignored" }));
    let env = setup_env(client);
    capture_logs();

    let decision = env.guard.before_each(&Location::parse("/inbox#latest")).await;
    assert_eq!(decision, sign_in_redirect("/inbox#latest"));
    assert!(env.tokens.get().is_none());
    assert_single_refresh_failure_logged();
}

#[tokio::test]
async fn test_unknown_paths_resolve_to_not_found_regardless_of_auth() {
    let env = setup_env(MockHttpClient::new());

    let anonymous = env.guard.resolve(Location::parse("/no/such/page")).await;
    assert_eq!(anonymous.route, AppRoute::NotFound);
    assert!(!anonymous.redirected);

    env.tokens.set("t");
    let signed_in = env.guard.resolve(Location::parse("/dashboard/extra")).await;
    assert_eq!(signed_in.route, AppRoute::NotFound);
    assert_eq!(env.document.last().as_deref(), Some("Not Found"));
    assert_eq!(env.client().request_count(), 0);
}

#[tokio::test]
async fn test_resolve_follows_redirect_to_sign_in() {
    let client = MockHttpClient::new();
    client.mock_response(REFRESH_URL, 403, json!({}));
    let env = setup_env(client);

    let resolution = env.guard.resolve(Location::parse("/parking?lot=B")).await;

    assert_eq!(resolution.route, AppRoute::SignIn);
    assert!(resolution.redirected);
    assert_eq!(
        resolution.location.query("redirect").as_deref(),
        Some("/parking?lot=B")
    );
    assert_eq!(env.document.all(), vec!["Parking", "Sign In"]);
    assert_eq!(env.client().request_count(), 1);
}

#[tokio::test]
async fn test_overlapping_guarded_navigations_share_refresh() {
    let client = MockHttpClient::new();
    client.mock_response(REFRESH_URL, 200, json!({ "access_token": "shared" }));
    let release = client.hold();
    let env = setup_env(client);

    let dashboard = Location::parse("/dashboard");
    let tickets = Location::parse("/tickets");
    let (a, b, _) = futures::join!(
        env.guard.resolve(dashboard),
        env.guard.resolve(tickets),
        async move {
            assert!(release.send(()).is_ok());
        }
    );

    assert_eq!(a.route, AppRoute::Dashboard);
    assert_eq!(b.route, AppRoute::Tickets);
    assert!(!a.redirected && !b.redirected);
    assert_eq!(env.tokens.get().as_deref(), Some("shared"));
    assert_eq!(env.client().request_count(), 1);
}
