use super::*;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

// =========================================================
// Shared Mock Components
// =========================================================

/// In-memory session used to drive token-dependent behaviour
struct MemorySession {
    token: Mutex<Option<String>>,
    resets: AtomicU32,
}

impl MemorySession {
    fn new(token: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            token: Mutex::new(token.map(str::to_string)),
            resets: AtomicU32::new(0),
        })
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save_token(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn reset_token(&self) {
        *self.token.lock().unwrap() = None;
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transport that records the outgoing request and replies with a canned body
struct MockTransport {
    canned_body: String,
    last_request: Mutex<Option<HttpRequest>>,
}

impl MockTransport {
    fn new(body: &str) -> Arc<Self> {
        Arc::new(Self {
            canned_body: body.to_string(),
            last_request: Mutex::new(None),
        })
    }

    fn last(&self) -> HttpRequest {
        self.last_request.lock().unwrap().clone().expect("request sent")
    }

    fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
        req.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<TransportResponse, String> {
        *self.last_request.lock().unwrap() = Some(req);
        Ok(TransportResponse {
            status: 200,
            body: self.canned_body.clone(),
        })
    }
}

/// Transport that fails at the network level
struct FailingTransport;

#[async_trait(?Send)]
impl HttpTransport for FailingTransport {
    async fn send(&self, _req: HttpRequest) -> Result<TransportResponse, String> {
        Err("connection refused".to_string())
    }
}

fn context(
    mode: RenderMode,
    session: Arc<MemorySession>,
    transport: Arc<MockTransport>,
) -> ApiContext {
    ApiContext::with_parts("https://api.example.com", mode, session, transport)
}

const OK_BODY: &str = r#"{ "status": 200, "data": { "token": "t" } }"#;

// =========================================================
// URL & encoding helpers
// =========================================================

#[test]
fn resolve_url_joins_relative_paths_onto_base() {
    assert_eq!(
        resolve_url("https://api.example.com", "/charts/zipcode/cities", true),
        "https://api.example.com/charts/zipcode/cities"
    );
    assert_eq!(
        resolve_url("https://api.example.com/", "charts", true),
        "https://api.example.com/charts"
    );
}

#[test]
fn resolve_url_passes_absolute_urls_through() {
    assert_eq!(
        resolve_url("https://api.example.com", "https://ai.example.com/auth/status", true),
        "https://ai.example.com/auth/status"
    );
    // direct variant: no base resolution at all
    assert_eq!(resolve_url("https://api.example.com", "/x", false), "/x");
}

#[test]
fn append_query_encodes_and_chains() {
    assert_eq!(append_query("/a", &[]), "/a");
    assert_eq!(
        append_query("/a", &[("q", "main st"), ("page", "2")]),
        "/a?q=main%20st&page=2"
    );
    assert_eq!(append_query("/a?x=1", &[("y", "2")]), "/a?x=1&y=2");
}

#[test]
fn form_urlencoded_treats_none_as_empty() {
    assert_eq!(
        encode_form_urlencoded(&[("name", Some("a b")), ("note", None)]),
        "name=a%20b&note="
    );
}

// =========================================================
// Token injection
// =========================================================

#[tokio::test]
async fn bearer_header_attached_when_token_present_for_all_verbs() {
    let session = MemorySession::new(Some("tok-1"));
    let transport = MockTransport::new(OK_BODY);
    let ctx = context(RenderMode::Client, session, transport.clone());

    ctx.client().get("/a", &[]).await.unwrap();
    assert_eq!(
        MockTransport::header(&transport.last(), "Authorization"),
        Some("Bearer tok-1")
    );

    ctx.client().post("/a", &[("k", "v")]).await.unwrap();
    assert_eq!(
        MockTransport::header(&transport.last(), "Authorization"),
        Some("Bearer tok-1")
    );

    ctx.client().put("/a", &[("k", Some("v"))]).await.unwrap();
    assert_eq!(
        MockTransport::header(&transport.last(), "Authorization"),
        Some("Bearer tok-1")
    );

    ctx.client().delete("/a", &serde_json::json!({})).await.unwrap();
    assert_eq!(
        MockTransport::header(&transport.last(), "Authorization"),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn bearer_header_absent_without_token() {
    let session = MemorySession::new(None);
    let transport = MockTransport::new(OK_BODY);
    let ctx = context(RenderMode::Client, session, transport.clone());

    ctx.client().get("/a", &[]).await.unwrap();
    assert_eq!(MockTransport::header(&transport.last(), "Authorization"), None);
}

#[tokio::test]
async fn server_variants_never_carry_the_token() {
    let session = MemorySession::new(Some("tok-1"));
    let transport = MockTransport::new(OK_BODY);
    let ctx = context(RenderMode::Client, session, transport.clone());

    ctx.server().get("/a", &[]).await.unwrap();
    assert_eq!(MockTransport::header(&transport.last(), "Authorization"), None);

    ctx.server_json().post("/a", &serde_json::json!({})).await.unwrap();
    assert_eq!(MockTransport::header(&transport.last(), "Authorization"), None);
}

// =========================================================
// URL resolution & body encoding per variant
// =========================================================

#[tokio::test]
async fn client_variant_resolves_against_base_url() {
    let transport = MockTransport::new(OK_BODY);
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport.clone());

    ctx.client().get("/charts/zipcode/cities", &[("state", "CA")]).await.unwrap();
    let req = transport.last();
    assert_eq!(req.url, "https://api.example.com/charts/zipcode/cities?state=CA");
    assert_eq!(req.method, HttpMethod::Get);
}

#[tokio::test]
async fn direct_variant_passes_urls_through() {
    let transport = MockTransport::new(OK_BODY);
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport.clone());

    ctx.direct()
        .get("https://ai.example.com/auth/status", &[])
        .await
        .unwrap();
    assert_eq!(transport.last().url, "https://ai.example.com/auth/status");
}

#[tokio::test]
async fn post_encodes_multipart_and_put_encodes_urlencoded() {
    let transport = MockTransport::new(OK_BODY);
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport.clone());

    ctx.client().post("/a", &[("name", "x"), ("zip", "90210")]).await.unwrap();
    let req = transport.last();
    match req.body.clone() {
        Some(Body::Multipart(fields)) => {
            assert_eq!(
                fields,
                vec![
                    ("name".to_string(), "x".to_string()),
                    ("zip".to_string(), "90210".to_string())
                ]
            );
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
    // multipart 不手动设置 Content-Type
    assert_eq!(MockTransport::header(&req, "Content-Type"), None);

    ctx.client().put("/a", &[("name", Some("x")), ("note", None)]).await.unwrap();
    let req = transport.last();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(
        MockTransport::header(&req, "Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    match req.body {
        Some(Body::UrlEncoded(text)) => assert_eq!(text, "name=x&note="),
        other => panic!("expected urlencoded body, got {:?}", other),
    }
}

#[tokio::test]
async fn json_bodies_set_json_content_type() {
    let transport = MockTransport::new(OK_BODY);
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport.clone());

    ctx.direct()
        .post("https://x.example.com/a", &serde_json::json!({ "q": 1 }))
        .await
        .unwrap();
    let req = transport.last();
    assert_eq!(
        MockTransport::header(&req, "Content-Type"),
        Some("application/json")
    );
    match req.body {
        Some(Body::Json(text)) => assert_eq!(text, r#"{"q":1}"#),
        other => panic!("expected json body, got {:?}", other),
    }
}

// =========================================================
// Envelope handling
// =========================================================

#[tokio::test]
async fn success_envelope_is_returned_unchanged() {
    let body = r#"{ "status": 200, "message": "ok", "data": { "a": [1, 2, 3] } }"#;
    let transport = MockTransport::new(body);
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport);

    let envelope = ctx.client().get("/a", &[]).await.unwrap();
    assert_eq!(envelope.outcome(), Some(200));
    assert_eq!(envelope.message.as_deref(), Some("ok"));
    assert_eq!(envelope.data, Some(serde_json::json!({ "a": [1, 2, 3] })));
}

#[tokio::test]
async fn legacy_code_field_counts_as_success_on_direct_variant() {
    let transport = MockTransport::new(r#"{ "code": 200, "data": 1 }"#);
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport);

    let envelope = ctx.direct().get("https://x.example.com/a", &[]).await.unwrap();
    assert!(envelope.is_ok());
}

#[tokio::test]
async fn business_failure_maps_to_api_error_with_fallback_message() {
    let transport = MockTransport::new(r#"{ "status": 400 }"#);
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport);

    let err = ctx.client().get("/a", &[]).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            code: 400,
            message: "Server error".to_string()
        }
    );
}

#[tokio::test]
async fn session_expiry_resets_token_and_fires_hook() {
    let session = MemorySession::new(Some("tok-1"));
    let transport = MockTransport::new(r#"{ "status": 1002 }"#);
    let navigated = Arc::new(AtomicBool::new(false));

    let hook_flag = navigated.clone();
    let ctx = context(RenderMode::Client, session.clone(), transport)
        .on_session_expired(move || hook_flag.store(true, Ordering::SeqCst));

    let err = ctx.client().get("/a", &[]).await.unwrap_err();
    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(session.token.lock().unwrap().clone(), None);
    assert_eq!(session.resets.load(Ordering::SeqCst), 1);
    // the hook is what the app wires to the /login navigation
    assert!(navigated.load(Ordering::SeqCst));
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let transport = MockTransport::new("<html>oops</html>");
    let ctx = context(RenderMode::Client, MemorySession::new(None), transport);

    match ctx.client().get("/a", &[]).await.unwrap_err() {
        ApiError::Parse(_) => {}
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn network_failure_maps_to_network_error() {
    let ctx = ApiContext::with_parts(
        "https://api.example.com",
        RenderMode::Client,
        MemorySession::new(None),
        Arc::new(FailingTransport),
    );

    match ctx.client().get("/a", &[]).await.unwrap_err() {
        ApiError::Network(msg) => assert_eq!(msg, "connection refused"),
        other => panic!("expected network error, got {:?}", other),
    }
}

// =========================================================
// Render-mode behaviour
// =========================================================

#[tokio::test]
async fn server_variant_failures_fold_to_500_in_server_mode() {
    let transport = MockTransport::new(r#"{ "status": 400, "message": "nope" }"#);
    let ctx = context(RenderMode::Server, MemorySession::new(None), transport);

    let err = ctx.server().get("/a", &[]).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status_code: 500,
            message: "nope".to_string()
        }
    );
}

#[tokio::test]
async fn client_variant_keeps_envelope_error_even_in_server_mode() {
    let transport = MockTransport::new(r#"{ "status": 400, "message": "nope" }"#);
    let ctx = context(RenderMode::Server, MemorySession::new(None), transport);

    let err = ctx.client().get("/a", &[]).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            code: 400,
            message: "nope".to_string()
        }
    );
}
