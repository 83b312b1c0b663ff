// End-to-end tests for the tenant guard + context middleware chain,
// driven through the router with `tower::ServiceExt::oneshot`. No
// database is required: the handlers only read the ambient context.

use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use labsys_api::database::models::CreatePaciente;
use labsys_api::middleware::{
    tenant_context_middleware, tenant_guard_middleware, Principal, TenantCheck, NO_TENANT_MESSAGE,
};
use labsys_api::tenant;

async fn context_handler() -> Json<Value> {
    // Yield first so interleaved requests would expose any context leak
    tokio::task::yield_now().await;
    Json(json!({
        "tenant_id": tenant::current_tenant_id(),
        "user_id": tenant::current_user_id(),
    }))
}

/// Stamps an insert payload the way the patient write path does, without
/// touching a database, and echoes the resulting tenant id.
async fn stamp_handler(Json(mut payload): Json<CreatePaciente>) -> Json<Value> {
    tenant::stamp_on_insert(&mut payload);
    Json(json!({ "tenant_id": payload.tenant_id }))
}

fn principal(tenant_id: Option<Uuid>) -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        tenant_id,
        email: "teste@lab.com.br".to_string(),
    }
}

/// Mirrors the production layering: guard outside context scope, with the
/// principal (normally attached by the JWT middleware) and the optional
/// skip flag layered outside the guard.
fn test_app(principal: Option<Principal>, skip: bool) -> Router {
    let mut router = Router::new()
        .route("/ctx", get(context_handler))
        .route("/stamp", post(stamp_handler))
        .layer(middleware::from_fn(tenant_context_middleware))
        .layer(middleware::from_fn(tenant_guard_middleware));

    if skip {
        router = router.layer(Extension(TenantCheck::Skip));
    }
    if let Some(p) = principal {
        router = router.layer(Extension(p));
    }
    router
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn paciente_payload(tenant_id: Option<Uuid>) -> Value {
    json!({
        "tenant_id": tenant_id,
        "codigo_interno": "PAC000123",
        "nome": "Maria da Silva",
        "nome_social": null,
        "sexo": "F",
        "data_nascimento": "1980-04-12",
        "nome_mae": "Joana da Silva",
        "rg": "12.345.678-9",
        "cpf": "12345678901",
        "email": "maria@exemplo.com.br",
        "contatos": "11999990000"
    })
}

#[tokio::test]
async fn principal_without_tenant_is_rejected() {
    let app = test_app(Some(principal(None)), false);

    let response = app
        .oneshot(Request::get("/ctx").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], NO_TENANT_MESSAGE);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn rejected_request_never_reaches_the_handler() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    async fn counting_handler() -> &'static str {
        CALLS.fetch_add(1, Ordering::SeqCst);
        "ok"
    }

    let app = Router::new()
        .route("/counted", get(counting_handler))
        .layer(middleware::from_fn(tenant_context_middleware))
        .layer(middleware::from_fn(tenant_guard_middleware))
        .layer(Extension(principal(None)));

    let response = app
        .oneshot(Request::get("/counted").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn skip_flag_allows_principal_without_tenant() {
    let app = test_app(Some(principal(None)), true);

    let response = app
        .oneshot(Request::get("/ctx").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tenant_id"], Value::Null);
}

#[tokio::test]
async fn missing_principal_is_allowed_through() {
    // Unauthenticated access is the auth layer's concern, not the guard's
    let app = test_app(None, false);

    let response = app
        .oneshot(Request::get("/ctx").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tenant_id"], Value::Null);
    assert_eq!(body["user_id"], Value::Null);
}

#[tokio::test]
async fn context_exposes_principal_identifiers_downstream() {
    let tenant_id = Uuid::new_v4();
    let p = principal(Some(tenant_id));
    let user_id = p.user_id;
    let app = test_app(Some(p), false);

    let response = app
        .oneshot(Request::get("/ctx").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tenant_id"], json!(tenant_id));
    assert_eq!(body["user_id"], json!(user_id));
}

#[tokio::test]
async fn insert_payload_is_stamped_with_context_tenant() {
    let tenant_id = Uuid::new_v4();
    let app = test_app(Some(principal(Some(tenant_id))), false);

    let request = Request::post("/stamp")
        .header("content-type", "application/json")
        .body(Body::from(paciente_payload(None).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tenant_id"], json!(tenant_id));
}

#[tokio::test]
async fn explicit_tenant_in_payload_is_not_overwritten() {
    let context_tenant = Uuid::new_v4();
    let explicit_tenant = Uuid::new_v4();
    let app = test_app(Some(principal(Some(context_tenant))), false);

    let request = Request::post("/stamp")
        .header("content-type", "application/json")
        .body(Body::from(paciente_payload(Some(explicit_tenant)).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["tenant_id"], json!(explicit_tenant));
}

#[tokio::test]
async fn concurrent_requests_keep_their_own_tenant() {
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();

    let app_a = test_app(Some(principal(Some(tenant_a))), false);
    let app_b = test_app(Some(principal(Some(tenant_b))), false);

    // Drive both requests concurrently; the handler yields before reading
    // the context, so the tasks interleave on the runtime.
    let (res_a, res_b) = tokio::join!(
        app_a.oneshot(Request::get("/ctx").body(Body::empty()).unwrap()),
        app_b.oneshot(Request::get("/ctx").body(Body::empty()).unwrap()),
    );

    let body_a = body_json(res_a.unwrap()).await;
    let body_b = body_json(res_b.unwrap()).await;

    assert_eq!(body_a["tenant_id"], json!(tenant_a));
    assert_eq!(body_b["tenant_id"], json!(tenant_b));
}

#[tokio::test]
async fn downstream_status_passes_through_untransformed() {
    async fn teapot() -> StatusCode {
        StatusCode::IM_A_TEAPOT
    }

    let app = Router::new()
        .route("/teapot", get(teapot))
        .layer(middleware::from_fn(tenant_context_middleware))
        .layer(middleware::from_fn(tenant_guard_middleware))
        .layer(Extension(principal(Some(Uuid::new_v4()))));

    let response = app
        .oneshot(Request::get("/teapot").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
}
