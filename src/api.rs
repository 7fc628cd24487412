use axum::{
    body::Body,
    extract::{Extension, Form, MatchedPath, Path, State},
    http::{
        header::{CONTENT_TYPE, RETRY_AFTER},
        HeaderName, Request, StatusCode,
    },
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::agent::{LocationOutcome, PhotoReminderAgent};
use crate::html::{notification_or_fallback, render_home, APP_JS};
use crate::messages::{
    AGENT_NOT_INITIALIZED, REMINDER_NOT_FOUND, TEST_REMINDER_MESSAGE, UNKNOWN_ERROR,
};
use crate::store::{Reminder, ReminderStore};
use crate::system_info::get_system_info;
use crate::text_utils::parse_preferences;

#[derive(Debug, Deserialize)]
struct LocationForm {
    latitude: f64,
    longitude: f64,
    preferences: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub success: bool,
    pub reminder: Reminder,
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemindersResponse {
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Serialize)]
struct DetailResponse {
    detail: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    /// Cap on `/process-location` calls per second; each one costs two API requests.
    pub rate_limit_per_second: Option<u64>,
}

/// Everything the handlers share.
#[derive(Clone)]
pub struct AppState {
    pub store: ReminderStore,
    pub agent: Option<PhotoReminderAgent>,
    pub initialization_error: Option<String>,
}

#[derive(Clone, Debug)]
struct RequestContext {
    request_id: String,
}

/// Sliding one-second window over the calls admitted to a single route.
#[derive(Debug)]
struct RateLimiter {
    route: &'static str,
    limit: u64,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    fn per_second(route: &'static str, limit: u64) -> Self {
        Self {
            route,
            limit,
            window: Duration::from_secs(1),
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Admit a call made at `now`, or return how long until a slot frees up.
    async fn admit(&self, now: Instant) -> Result<(), Duration> {
        let mut timestamps = self.timestamps.lock().await;
        while let Some(ts) = timestamps.front() {
            if now.duration_since(*ts) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
        if timestamps.len() as u64 >= self.limit {
            let wait = timestamps
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            return Err(wait);
        }
        timestamps.push_back(now);
        Ok(())
    }
}

const PROCESS_LOCATION_ROUTE: &str = "/process-location";

pub fn router(state: AppState, config: ApiConfig) -> Router {
    let request_id_layer = middleware::from_fn(assign_request_id);

    let mut process = Router::new()
        .route(PROCESS_LOCATION_ROUTE, post(process_location))
        .with_state(state.clone());
    if let Some(rate_limit) = config.rate_limit_per_second {
        tracing::info!(
            route = PROCESS_LOCATION_ROUTE,
            limit = rate_limit,
            "Rate limiting location updates"
        );
        let limiter = Arc::new(RateLimiter::per_second(PROCESS_LOCATION_ROUTE, rate_limit));
        process = process.layer(middleware::from_fn_with_state(limiter, rate_limit_requests));
    }

    Router::new()
        .route("/", get(home))
        .route("/dismiss-reminder/{reminder_id}", post(dismiss_reminder))
        .route("/test-reminder", get(test_reminder))
        .route("/api/reminders", get(list_reminders))
        .route("/info", get(info))
        .route("/static/js/app.js", get(app_js))
        .with_state(state)
        .merge(process)
        .layer(request_id_layer)
}

async fn home(State(state): State<AppState>) -> Response {
    let reminders = state.store.list().await;
    match render_home(&reminders, state.initialization_error.as_deref()) {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render home page");
            internal_error_response()
        }
    }
}

async fn process_location(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Form(form): Form<LocationForm>,
) -> Response {
    let Some(agent) = state.agent.as_ref() else {
        tracing::error!(request_id = %request.request_id, "Photo agent not initialized. Check API keys.");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DetailResponse {
                detail: AGENT_NOT_INITIALIZED,
            }),
        )
            .into_response();
    };

    let preferences = parse_preferences(&form.preferences);
    tracing::info!(
        request_id = %request.request_id,
        latitude = form.latitude,
        longitude = form.longitude,
        ?preferences,
        "Processing location"
    );

    let message = match agent
        .process_location(form.latitude, form.longitude, &preferences)
        .await
    {
        LocationOutcome::Reminder { message } => message,
        LocationOutcome::NotWorth { message } => return failure_response(Some(message)),
        LocationOutcome::Failed { error } => return failure_response(Some(error)),
    };

    let reminder = state
        .store
        .add(message, form.latitude, form.longitude, preferences)
        .await;
    tracing::debug!(
        request_id = %request.request_id,
        reminder_id = reminder.id,
        "Stored reminder"
    );
    reminder_response(reminder)
}

async fn dismiss_reminder(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Path(reminder_id): Path<i64>,
) -> Response {
    // Ids start at 1, so a negative id simply matches nothing.
    let removed = match u64::try_from(reminder_id) {
        Ok(id) => state.store.dismiss(id).await,
        Err(_) => false,
    };
    tracing::debug!(
        request_id = %request.request_id,
        reminder_id,
        removed,
        "Dismiss reminder"
    );
    if removed {
        (
            StatusCode::OK,
            Json(StatusResponse {
                success: true,
                message: None,
            }),
        )
            .into_response()
    } else {
        failure_response(Some(REMINDER_NOT_FOUND.to_string()))
    }
}

async fn test_reminder(State(state): State<AppState>) -> Response {
    let reminder = state
        .store
        .add(
            TEST_REMINDER_MESSAGE,
            40.7812,
            -73.9665,
            vec!["testing".to_string()],
        )
        .await;
    reminder_response(reminder)
}

async fn list_reminders(State(state): State<AppState>) -> Response {
    let reminders = state.store.list().await;
    (StatusCode::OK, Json(RemindersResponse { reminders })).into_response()
}

async fn info() -> String {
    get_system_info()
}

async fn app_js() -> Response {
    ([(CONTENT_TYPE, "application/javascript")], APP_JS).into_response()
}

fn reminder_response(reminder: Reminder) -> Response {
    let html = notification_or_fallback(&reminder);
    (
        StatusCode::OK,
        Json(ReminderResponse {
            success: true,
            reminder,
            html,
        }),
    )
        .into_response()
}

fn failure_response(message: Option<String>) -> Response {
    (
        StatusCode::OK,
        Json(StatusResponse {
            success: false,
            message: Some(message.unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
        }),
    )
        .into_response()
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal_error",
        }),
    )
        .into_response()
}

async fn assign_request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let started = Instant::now();
    let mut response = next.run(req).await;
    let status = response.status();
    if let Ok(value) = request_id.parse() {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    tracing::info!(
        request_id = %request_id,
        method = %method,
        route = %route,
        status = status.as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );
    response
}

async fn rate_limit_requests(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(wait) = limiter.admit(Instant::now()).await {
        let request_id = req
            .extensions()
            .get::<RequestContext>()
            .map(|ctx| ctx.request_id.as_str())
            .unwrap_or("unknown");
        let retry_after = (wait.as_secs() + u64::from(wait.subsec_nanos() > 0)).max(1);
        tracing::warn!(
            request_id,
            route = limiter.route,
            limit = limiter.limit,
            retry_after,
            "Location updates arriving faster than allowed"
        );
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(RETRY_AFTER, retry_after.to_string())],
            Json(ErrorResponse {
                error: "rate_limited",
            }),
        )
            .into_response();
    }
    next.run(req).await
}
