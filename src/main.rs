use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use labsys_api::database::manager::DatabaseManager;
use labsys_api::handlers;
use labsys_api::middleware::{
    jwt_auth_middleware, tenant_context_middleware, tenant_guard_middleware, TenantCheck,
};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labsys_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = labsys_api::config::config();
    tracing::info!("Starting labsys-api in {:?} mode", config.environment);

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("labsys-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/login", post(handlers::auth::login))
        // Authenticated API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Authenticated routes. Outer-to-inner per request: JWT auth attaches the
/// principal, the tenant guard checks it, then the context middleware opens
/// the request-scoped tenant context around the handler.
fn api_routes() -> Router {
    Router::new()
        .merge(with_tenant_scope(paciente_routes()))
        .merge(with_tenant_scope(whoami_routes()))
        // Tenant administration opts out of the tenant requirement. The skip
        // flag is layered outside the guard so the guard sees it.
        .merge(with_tenant_scope(tenant_admin_routes()).layer(Extension(TenantCheck::Skip)))
        .layer(middleware::from_fn(jwt_auth_middleware))
}

/// Tenant guard + context scope shared by every authenticated route group
fn with_tenant_scope(router: Router) -> Router {
    router
        .layer(middleware::from_fn(tenant_context_middleware))
        .layer(middleware::from_fn(tenant_guard_middleware))
}

fn paciente_routes() -> Router {
    use handlers::pacientes;

    Router::new()
        .route("/api/pacientes", get(pacientes::list).post(pacientes::create))
        .route("/api/pacientes/:id", get(pacientes::get))
}

fn whoami_routes() -> Router {
    Router::new().route("/api/auth/whoami", get(handlers::auth::whoami))
}

fn tenant_admin_routes() -> Router {
    use handlers::tenants;

    Router::new()
        .route("/api/tenants", get(tenants::list).post(tenants::create))
        .route("/api/tenants/ativos", get(tenants::list_ativos))
        .route("/api/tenants/estatisticas", get(tenants::statistics))
        .route("/api/tenants/slug/:slug", get(tenants::get_by_slug))
        .route(
            "/api/tenants/:id",
            get(tenants::get)
                .patch(tenants::update)
                .delete(tenants::remove),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "labsys-api",
            "version": version,
            "description": "Multi-tenant ERP backend for clinical laboratories",
            "endpoints": {
                "home": "/ (public)",
                "login": "/auth/login (public)",
                "whoami": "/api/auth/whoami (protected)",
                "pacientes": "/api/pacientes[/:id] (protected, tenant required)",
                "tenants": "/api/tenants[/:id] (protected, tenant check skipped)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
