use crate::error::ApiError;
use crate::state::SharedState;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::Json;
use chrono::Utc;
use review_core::{compute_stats, parse_date_param, sort_reviews, ReviewFilter, SortKey, SortOrder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "reviewdeck API",
        "documentation": "/api",
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "reviewdeck API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn api_info(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "name": "reviewdeck API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API for managing property reviews from Hostaway",
        "endpoints": {
            "GET /api/reviews": "Get all reviews",
            "GET /api/reviews/search": "Search reviews with filters",
            "GET /api/reviews/stats": "Get review statistics",
            "GET /api/reviews/approved": "Get all approved reviews",
            "GET /api/reviews/{id}": "Get a specific review",
            "POST /api/reviews/{id}/approve": "Approve a review",
            "DELETE /api/reviews/{id}/approve": "Unapprove a review",
            "GET /health": "Health check",
        },
        "config": {
            "useMockData": state.config.hostaway.use_mock_data,
            "accountId": state.config.hostaway.account_id,
            "apiKeyConfigured": !state.config.hostaway.api_key.is_empty(),
        },
    }))
}

pub async fn get_all_reviews(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let reviews = state.fetch_normalized().await?;
    Ok(Json(json!({
        "status": "success",
        "count": reviews.len(),
        "reviews": reviews,
    })))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<String>,
    #[serde(rename = "minRating", skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub review_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

fn build_filter(params: &SearchParams) -> Result<ReviewFilter, ApiError> {
    let parse = |value: &Option<String>, name: &str| match value {
        Some(raw) => parse_date_param(raw)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid {} value: {}", name, raw))),
        None => Ok(None),
    };

    Ok(ReviewFilter {
        listing: params.listing.clone(),
        min_rating: params.min_rating,
        review_type: params.review_type.clone(),
        status: params.status.clone(),
        start_date: parse(&params.start_date, "startDate")?,
        end_date: parse(&params.end_date, "endDate")?,
        search: params.search.clone(),
    })
}

fn parse_sort(params: &SearchParams) -> Result<Option<(SortKey, SortOrder)>, ApiError> {
    let key = match params.sort_by.as_deref() {
        None => return Ok(None),
        Some("date") => SortKey::Date,
        Some("rating") => SortKey::Rating,
        Some("name") => SortKey::GuestName,
        Some("listing") => SortKey::ListingName,
        Some(other) => {
            return Err(ApiError::bad_request(format!("Invalid sortBy value: {}", other)));
        }
    };
    let order = match params.sort_order.as_deref() {
        None | Some("desc") => SortOrder::Desc,
        Some("asc") => SortOrder::Asc,
        Some(other) => {
            return Err(ApiError::bad_request(format!(
                "Invalid sortOrder value: {}",
                other
            )));
        }
    };
    Ok(Some((key, order)))
}

pub async fn search_reviews(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let filter = build_filter(&params)?;
    let sort = parse_sort(&params)?;

    let mut reviews = filter.apply(state.fetch_normalized().await?);
    if let Some((key, order)) = sort {
        sort_reviews(&mut reviews, key, order);
    }

    Ok(Json(json!({
        "status": "success",
        "count": reviews.len(),
        "filters": params,
        "reviews": reviews,
    })))
}

pub async fn get_stats(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let reviews = state.fetch_normalized().await?;
    let stats = compute_stats(&reviews);
    Ok(Json(json!({
        "status": "success",
        "stats": stats,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ApprovedParams {
    #[serde(rename = "listingId")]
    pub listing_id: Option<i64>,
}

pub async fn get_approved(
    State(state): State<SharedState>,
    Query(params): Query<ApprovedParams>,
) -> Result<Json<Value>, ApiError> {
    let approved = state.ledger.approved(params.listing_id)?;
    Ok(Json(json!({
        "status": "success",
        "count": approved.len(),
        "reviews": approved,
    })))
}

pub async fn get_review_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let reviews = state.fetch_normalized().await?;
    let review = reviews
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(json!({
        "status": "success",
        "review": review,
    })))
}

pub async fn approve_review(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let reviews = state.fetch_normalized().await?;
    let entry = state.ledger.approve(&reviews, id)?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Review {} approved successfully", id),
        "review": entry,
    })))
}

pub async fn unapprove_review(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.ledger.unapprove(id)?;
    Ok(Json(json!({
        "status": "success",
        "message": format!("Review {} removed from approved list", id),
    })))
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("Endpoint not found: {}", uri.path()))
}
