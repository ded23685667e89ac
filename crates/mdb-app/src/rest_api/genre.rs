use crate::{catalog_api, publish_api_docs};
#[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
use mdb_dal::{
    genre::{Genre, GenreRepository},
    projection::GenreDetail,
};

catalog_api!(Genre, "/genres/", "/genres/{id}/");

publish_api_docs!();
