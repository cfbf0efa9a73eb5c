//! Content API handlers.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{ApiError, ErrorBody};
use super::{AppState, CACHE_CONTROL_NO_STORE, CACHE_CONTROL_PUBLIC};
use crate::content::ListFilter;
use crate::entity::{ContentItem, ContentKind};
use crate::sitemap::generate_sitemap;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SlugQuery {
    pub slug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedQuery {
    pub slug: Option<String>,
    pub limit: Option<usize>,
}

/// Response bodies keep their shape on error: data fields are left at
/// their defaults and the error fields are filled in.
pub trait Envelope: Serialize + Default {
    fn set_error(&mut self, error: ErrorBody);
}

#[derive(Debug, Default, Serialize)]
pub struct ListResponse {
    pub items: Vec<ContentItem>,
    pub total: usize,
    #[serde(flatten)]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Default, Serialize)]
pub struct ItemResponse {
    pub item: Option<ContentItem>,
    #[serde(flatten)]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Default, Serialize)]
pub struct NavigationResponse {
    pub previous: Option<ContentItem>,
    pub next: Option<ContentItem>,
    #[serde(flatten)]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Default, Serialize)]
pub struct RelatedResponse {
    pub related: Vec<ContentItem>,
    #[serde(flatten)]
    pub error: Option<ErrorBody>,
}

impl Envelope for ListResponse {
    fn set_error(&mut self, error: ErrorBody) {
        self.error = Some(error);
    }
}

impl Envelope for ItemResponse {
    fn set_error(&mut self, error: ErrorBody) {
        self.error = Some(error);
    }
}

impl Envelope for NavigationResponse {
    fn set_error(&mut self, error: ErrorBody) {
        self.error = Some(error);
    }
}

impl Envelope for RelatedResponse {
    fn set_error(&mut self, error: ErrorBody) {
        self.error = Some(error);
    }
}

fn reply<T: Serialize>(status: StatusCode, body: T) -> Response {
    let cache = if status.is_success() {
        CACHE_CONTROL_PUBLIC
    } else {
        CACHE_CONTROL_NO_STORE
    };
    (status, [(header::CACHE_CONTROL, cache)], Json(body)).into_response()
}

fn respond<T: Envelope>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(body) => reply(StatusCode::OK, body),
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                warn!(error = %err, "content request failed");
            } else {
                debug!(error = %err, status = %status, "content request rejected");
            }
            let mut body = T::default();
            body.set_error(err.body());
            reply(status, body)
        }
    }
}

fn parse_kind(raw: &str) -> Result<ContentKind, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidKind {
        provided: raw.to_string(),
    })
}

fn require_slug(slug: Option<String>) -> Result<String, ApiError> {
    slug.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingParameter { name: "slug" })
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::InvalidQuery {
            message: rejection.body_text(),
        })
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /api/{kind}
pub async fn list_items(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    respond(list_inner(&state, &kind, query).await)
}

async fn list_inner(
    state: &AppState,
    kind: &str,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ListResponse, ApiError> {
    let kind = parse_kind(kind)?;
    let params = query_params(query)?;
    let filter = ListFilter {
        tag: params.tag.filter(|t| !t.trim().is_empty()),
        featured: params.featured.unwrap_or(false),
        limit: params.limit,
    };
    let items = state.service.list(kind, &filter).await?;
    Ok(ListResponse {
        total: items.len(),
        items,
        error: None,
    })
}

/// GET /api/{kind}/item?slug=
pub async fn get_item(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<SlugQuery>, QueryRejection>,
) -> Response {
    respond(item_inner(&state, &kind, query).await)
}

async fn item_inner(
    state: &AppState,
    kind: &str,
    query: Result<Query<SlugQuery>, QueryRejection>,
) -> Result<ItemResponse, ApiError> {
    let kind = parse_kind(kind)?;
    let slug = require_slug(query_params(query)?.slug)?;
    let item = state.service.by_slug(kind, &slug).await?;
    match item {
        Some(item) => Ok(ItemResponse {
            item: Some(item),
            error: None,
        }),
        None => Err(ApiError::NotFound { kind, slug }),
    }
}

/// GET /api/{kind}/navigation?slug=
pub async fn get_navigation(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<SlugQuery>, QueryRejection>,
) -> Response {
    respond(navigation_inner(&state, &kind, query).await)
}

async fn navigation_inner(
    state: &AppState,
    kind: &str,
    query: Result<Query<SlugQuery>, QueryRejection>,
) -> Result<NavigationResponse, ApiError> {
    let kind = parse_kind(kind)?;
    let slug = require_slug(query_params(query)?.slug)?;
    match state.service.navigation(kind, &slug).await? {
        Some(nav) => Ok(NavigationResponse {
            previous: nav.previous,
            next: nav.next,
            error: None,
        }),
        None => Err(ApiError::NotFound { kind, slug }),
    }
}

/// GET /api/{kind}/related?slug=&limit=
pub async fn get_related(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<RelatedQuery>, QueryRejection>,
) -> Response {
    respond(related_inner(&state, &kind, query).await)
}

async fn related_inner(
    state: &AppState,
    kind: &str,
    query: Result<Query<RelatedQuery>, QueryRejection>,
) -> Result<RelatedResponse, ApiError> {
    let kind = parse_kind(kind)?;
    let params = query_params(query)?;
    let slug = require_slug(params.slug)?;
    match state.service.related(kind, &slug, params.limit).await? {
        Some(related) => Ok(RelatedResponse {
            related,
            error: None,
        }),
        None => Err(ApiError::NotFound { kind, slug }),
    }
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let xml = generate_sitemap(&state.config, &state.service).await;
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL_PUBLIC),
        ],
        xml,
    )
        .into_response()
}
