/// Read only catalog endpoints - list of flat records and one detail record.
///
/// Expects `$entity`, `<$entity>Detail` and `<$entity>Repository` in scope,
/// repository must provide `list()` and `get_detail(id)`.
#[macro_export]
macro_rules! catalog_api {
    ($entity:ident, $list_path:tt, $detail_path:tt) => {
        type EntityRepository = paste::paste! {[<$entity Repository>]};
        crate::repository_from_request!(EntityRepository);
        pub mod catalog_api {
            use super::*;
            use crate::error::ApiResult;
            use axum::{extract::Path, response::IntoResponse, Json};
            use http::StatusCode;
            use tracing::debug;

            #[cfg(feature = "openapi")]
            type EntityDetail = paste::paste! {[<$entity Detail>]};

            #[cfg_attr(feature = "openapi",  utoipa::path(get, path = $list_path, tag = stringify!($entity), operation_id = concat!("list", stringify!($entity)),
            responses((status = StatusCode::OK, description = "List all", body = Vec<$entity>))))]
            pub async fn list(repository: EntityRepository) -> ApiResult<impl IntoResponse> {
                let records = repository.list().await?;
                debug!("Listed {} {}", records.len(), stringify!($entity));
                Ok((StatusCode::OK, Json(records)))
            }

            #[cfg_attr(feature = "openapi",  utoipa::path(get, path = $detail_path, tag = stringify!($entity), operation_id = concat!("get", stringify!($entity)),
            params(("id" = i64, Path, description = "Record id")),
            responses((status = StatusCode::OK, description = "Get one with relations", body = EntityDetail),
                (status = StatusCode::NOT_FOUND, description = "Not found", body = crate::error::ErrorBody))))]
            pub async fn get(
                Path(id): Path<i64>,
                repository: EntityRepository,
            ) -> ApiResult<impl IntoResponse> {
                let record = repository.get_detail(id).await?;

                Ok((StatusCode::OK, Json(record)))
            }

            #[cfg(feature = "openapi")]
            #[cfg_attr(feature = "openapi", derive(utoipa::OpenApi))]
            #[openapi(paths(list, get))]
            struct ApiDocs;

            #[cfg(feature = "openapi")]
            pub(super) fn api_docs() -> utoipa::openapi::OpenApi {
                use utoipa::OpenApi as _;
                ApiDocs::openapi()
            }
        }

        pub fn router() -> axum::Router<crate::state::AppState> {
            use axum::routing::get;
            axum::Router::new()
                .route($list_path, get(catalog_api::list))
                .route($detail_path, get(catalog_api::get))
        }
    };
}

#[macro_export]
macro_rules! publish_api_docs {
    () => {
        #[cfg(feature = "openapi")]
        pub fn api_docs() -> utoipa::openapi::OpenApi {
            catalog_api::api_docs()
        }
    };
    ($($end_point:path),+) => {
        #[cfg(feature = "openapi")]
        #[derive(utoipa::OpenApi)]
        #[openapi(paths($($end_point),+))]
        struct ModuleDocs;

        #[cfg(feature = "openapi")]
        pub fn api_docs() -> utoipa::openapi::OpenApi {
            use utoipa::OpenApi as _;
            ModuleDocs::openapi()
        }
    };
}
