use mdb_dal::Pool;
use mdb_types::config::BackendConfig;
use tracing::debug;

pub mod add_genre;
pub mod add_movie;
pub mod delete_movie;
pub mod list;
pub mod load;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

/// Opens catalog database, creating it with current schema when needed
pub(crate) async fn open_pool(backend: &BackendConfig) -> anyhow::Result<Pool> {
    backend.ensure_data_dir()?;
    let database_url = backend.database_url();
    debug!("Opening database {database_url}");
    let pool = mdb_dal::new_pool(&database_url).await?;
    mdb_dal::migrate(&pool).await?;
    Ok(pool)
}
