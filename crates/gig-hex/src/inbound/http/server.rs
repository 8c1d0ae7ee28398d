use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::LOCATION, StatusCode},
    routing::{get, post},
    serve, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::account_service::AccountService;
use crate::application::order_service::OrderService;
use crate::errors::{AppError, MessageBody};
use gig_types::domain::order::{Order, OrderDetails};
use gig_types::ports::GigRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

/// Per-process service context handed to every handler.
pub struct AppState<R: GigRepository> {
    pub orders: Arc<OrderService<R>>,
    pub accounts: Arc<AccountService<R>>,
}

impl<R: GigRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            orders: self.orders.clone(),
            accounts: self.accounts.clone(),
        }
    }
}

#[derive(Clone)]
pub struct HttpServer<R: GigRepository> {
    pub state: AppState<R>,
    pub config: HttpServerConfig,
}

/// Absent keys deserialize to `None` so the handler can answer 400 itself.
#[derive(Deserialize, Default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl<R: GigRepository> HttpServer<R> {
    pub async fn new(
        orders: OrderService<R>,
        accounts: AccountService<R>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState {
                orders: Arc::new(orders),
                accounts: Arc::new(accounts),
            },
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health", get(health))
            .route("/register", post(register::<R>))
            .route("/login", post(login::<R>))
            .route("/order", post(create_order::<R>))
            .route("/orders", get(list_orders::<R>))
            .route("/view_orders", get(view_orders))
            .route(
                "/order/{id}",
                get(get_order::<R>)
                    .put(update_order::<R>)
                    .delete(delete_order::<R>),
            )
            .layer(cors)
            .layer(trace_layer)
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

fn message(text: &str) -> Json<MessageBody> {
    Json(MessageBody {
        message: text.into(),
    })
}

/// Order ids are integers; anything else names no order.
fn parse_order_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::order_not_found())
}

/// A body missing any order key is a server fault, not a client validation error.
fn order_payload(
    payload: Result<Json<OrderDetails>, JsonRejection>,
) -> Result<OrderDetails, AppError> {
    payload.map(|Json(details)| details).map_err(|rej| {
        AppError::Internal(anyhow::anyhow!(
            "unusable order payload: {}",
            rej.body_text()
        ))
    })
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn register<R: GigRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    let Json(payload) = payload.map_err(|rej| {
        tracing::debug!(reason = %rej.body_text(), "unreadable registration body");
        AppError::Validation("Username, email, and password are required".into())
    })?;
    state
        .accounts
        .register(
            payload.username.as_deref().unwrap_or_default(),
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::CREATED, message("User registered successfully")))
}

async fn login<R: GigRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<MessageBody>, AppError> {
    let Json(payload) = payload.map_err(|rej| {
        tracing::debug!(reason = %rej.body_text(), "unreadable login body");
        AppError::invalid_credentials()
    })?;
    state
        .accounts
        .login(
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(message("Login successful"))
}

async fn create_order<R: GigRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<OrderDetails>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state.orders.create_order(order_payload(payload)?).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders<R: GigRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Order>>, AppError> {
    let list = state.orders.list_orders().await?;
    Ok(Json(list))
}

/// 302 Found to the order list.
async fn view_orders() -> (StatusCode, [(axum::http::HeaderName, &'static str); 1]) {
    (StatusCode::FOUND, [(LOCATION, "/orders")])
}

async fn get_order<R: GigRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let order = state.orders.get_order(parse_order_id(&id)?).await?;
    Ok(Json(order))
}

async fn update_order<R: GigRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderDetails>, JsonRejection>,
) -> Result<Json<Order>, AppError> {
    let id = parse_order_id(&id)?;
    // Unknown id is 404 whatever the payload.
    state.orders.get_order(id).await?;
    let updated = state.orders.update_order(id, order_payload(payload)?).await?;
    Ok(Json(updated))
}

async fn delete_order<R: GigRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    state.orders.delete_order(parse_order_id(&id)?).await?;
    Ok(message("Order deleted successfully"))
}
