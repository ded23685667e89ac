use axum::{extract::Path, response::IntoResponse, Json};
use http::StatusCode;
#[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
use mdb_dal::{
    movie::MovieRepository,
    review::{Review, ReviewPayload, ReviewRepository},
};
use tracing::debug;

use crate::{
    error::{ApiError, ApiResult},
    publish_api_docs,
    rest_api::Message,
    state::AppState,
    validate::ApiJson,
};

crate::repository_from_request!(ReviewRepository);

publish_api_docs!(
    list_movie_reviews,
    create_review,
    get_review,
    update_review,
    delete_review
);

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/movies/{id}/reviews/", tag = "Review", operation_id = "listMovieReviews",
    params(("id" = i64, Path, description = "Movie id")),
    responses((status = StatusCode::OK, description = "Reviews of the movie, newest first", body = Vec<Review>),
        (status = StatusCode::NOT_FOUND, description = "Movie not found", body = crate::error::ErrorBody))))]
pub async fn list_movie_reviews(
    Path(movie_id): Path<i64>,
    movies: MovieRepository,
    reviews: ReviewRepository,
) -> ApiResult<impl IntoResponse> {
    if !movies.exists(movie_id).await? {
        return Err(ApiError::ResourceNotFound("Movie".to_string()));
    }
    let records = reviews.list_for_movie(movie_id).await?;
    Ok((StatusCode::OK, Json(records)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "/movies/{id}/reviews/", tag = "Review", operation_id = "createReview",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = ReviewPayload,
    responses((status = StatusCode::OK, description = "Review created", body = Message),
        (status = StatusCode::BAD_REQUEST, description = "Invalid review", body = crate::error::ErrorBody),
        (status = StatusCode::NOT_FOUND, description = "Movie not found", body = crate::error::ErrorBody))))]
pub async fn create_review(
    Path(movie_id): Path<i64>,
    movies: MovieRepository,
    reviews: ReviewRepository,
    payload: Result<ApiJson<ReviewPayload>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    if !movies.exists(movie_id).await? {
        return Err(ApiError::ResourceNotFound("Movie".to_string()));
    }
    let review = payload?.into_inner().into_review()?;
    let record = reviews.create(movie_id, review).await?;
    debug!("Created review {} for movie {movie_id}", record.id);

    Ok((StatusCode::OK, Json(Message::CREATED)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/reviews/{id}/", tag = "Review", operation_id = "getReview",
    params(("id" = i64, Path, description = "Review id")),
    responses((status = StatusCode::OK, description = "Review", body = Review),
        (status = StatusCode::NOT_FOUND, description = "Review not found", body = crate::error::ErrorBody))))]
pub async fn get_review(
    Path(id): Path<i64>,
    reviews: ReviewRepository,
) -> ApiResult<impl IntoResponse> {
    let record = reviews.get(id).await?;
    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(put, path = "/reviews/{id}/", tag = "Review", operation_id = "updateReview",
    params(("id" = i64, Path, description = "Review id")),
    request_body = ReviewPayload,
    responses((status = StatusCode::OK, description = "Review replaced", body = Message),
        (status = StatusCode::BAD_REQUEST, description = "Invalid review", body = crate::error::ErrorBody),
        (status = StatusCode::NOT_FOUND, description = "Review not found", body = crate::error::ErrorBody))))]
pub async fn update_review(
    Path(id): Path<i64>,
    reviews: ReviewRepository,
    payload: Result<ApiJson<ReviewPayload>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    reviews.get(id).await?;
    let review = payload?.into_inner().into_review()?;
    reviews.update(id, review).await?;
    debug!("Updated review {id}");

    Ok((StatusCode::OK, Json(Message::UPDATED)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/reviews/{id}/", tag = "Review", operation_id = "deleteReview",
    params(("id" = i64, Path, description = "Review id")),
    responses((status = StatusCode::OK, description = "Review deleted", body = Message),
        (status = StatusCode::NOT_FOUND, description = "Review not found", body = crate::error::ErrorBody))))]
pub async fn delete_review(
    Path(id): Path<i64>,
    reviews: ReviewRepository,
) -> ApiResult<impl IntoResponse> {
    reviews.delete(id).await?;
    debug!("Deleted review {id}");

    Ok((StatusCode::OK, Json(Message::DELETED)))
}

pub fn router() -> axum::Router<AppState> {
    use axum::routing::get;
    axum::Router::new()
        .route(
            "/movies/{id}/reviews/",
            get(list_movie_reviews).post(create_review),
        )
        .route(
            "/reviews/{id}/",
            get(get_review).put(update_review).delete(delete_review),
        )
}
