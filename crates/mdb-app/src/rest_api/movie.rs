use crate::{catalog_api, publish_api_docs};
#[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
use mdb_dal::{
    movie::MovieRepository,
    projection::{Movie, MovieDetail},
};

catalog_api!(Movie, "/movies/", "/movies/{id}/");

publish_api_docs!();
