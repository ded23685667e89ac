use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub mod genre;
pub mod macros;
pub mod movie;
pub mod review;

/// Confirmation of a write operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub message: Cow<'static, str>,
}

impl Message {
    pub const CREATED: Message = Message::new("created");
    pub const UPDATED: Message = Message::new("updated");
    pub const DELETED: Message = Message::new("deleted");

    pub const fn new(message: &'static str) -> Self {
        Message {
            message: Cow::Borrowed(message),
        }
    }
}

/// All catalog endpoints, paths are relative to API root
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .merge(genre::router())
        .merge(movie::router())
        .merge(review::router())
}

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    genre::api_docs()
        .merge_from(movie::api_docs())
        .merge_from(review::api_docs())
}
