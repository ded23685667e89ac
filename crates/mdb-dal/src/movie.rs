use std::collections::BTreeSet;

use crate::{
    ChosenDB, Error,
    error::Result,
    genre::Genre,
    projection::{self, GenreLink, Movie, MovieDetail},
};
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::{Acquire, Executor, Pool};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateMovie {
    #[garde(length(chars, min = 1, max = 50))]
    pub title: String,
    #[garde(skip)]
    pub audience: i64,
    #[garde(length(chars, max = 200))]
    pub poster_url: String,
    #[garde(skip)]
    pub description: String,
    #[serde(default)]
    #[garde(skip)]
    pub genre: Vec<i64>,
}

/// Movie row without relations
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub audience: i64,
    pub poster_url: String,
    pub description: String,
}

const SELECT_MOVIE: &str = "SELECT id, title, audience, poster_url, description FROM movie";

pub type MovieRepository = MovieRepositoryImpl<Pool<ChosenDB>>;

pub struct MovieRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> MovieRepositoryImpl<E>
where
    for<'a> &'a E: Executor<'c, Database = ChosenDB> + Acquire<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn list(&self) -> Result<Vec<Movie>> {
        let records = sqlx::query_as::<_, MovieRecord>(&format!("{SELECT_MOVIE} ORDER BY id"))
            .fetch_all(&self.executor)
            .await?;
        let links = sqlx::query_as::<_, GenreLink>("SELECT movie_id, genre_id FROM movie_genre")
            .fetch_all(&self.executor)
            .await?;
        Ok(projection::movies_flat(records, links))
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM movie WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.executor)
            .await?;
        Ok(found.is_some())
    }

    async fn get_record(&self, id: i64) -> Result<MovieRecord> {
        sqlx::query_as::<_, MovieRecord>(&format!("{SELECT_MOVIE} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Movie".to_string()))
    }

    pub async fn get(&self, id: i64) -> Result<Movie> {
        let record = self.get_record(id).await?;
        let genre_ids =
            sqlx::query_scalar::<_, i64>("SELECT genre_id FROM movie_genre WHERE movie_id = ?")
                .bind(id)
                .fetch_all(&self.executor)
                .await?;
        Ok(projection::movie_flat(record, genre_ids))
    }

    pub async fn get_detail(&self, id: i64) -> Result<MovieDetail> {
        let record = self.get_record(id).await?;
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name FROM genre g
            JOIN movie_genre mg ON mg.genre_id = g.id
            WHERE mg.movie_id = ?
            ORDER BY g.id",
        )
        .bind(id)
        .fetch_all(&self.executor)
        .await?;
        Ok(projection::movie_detail(record, genres))
    }

    /// Inserts movie together with its genre links, all referenced genres must exist
    pub async fn create(&self, payload: CreateMovie) -> Result<MovieDetail> {
        let genres: BTreeSet<i64> = payload.genre.iter().copied().collect();
        let mut tx = self.executor.begin().await?;

        let result = sqlx::query(
            "INSERT INTO movie (title, audience, poster_url, description) VALUES (?, ?, ?, ?)",
        )
        .bind(&payload.title)
        .bind(payload.audience)
        .bind(&payload.poster_url)
        .bind(&payload.description)
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();

        for genre_id in genres {
            let found = sqlx::query_scalar::<_, i64>("SELECT id FROM genre WHERE id = ?")
                .bind(genre_id)
                .fetch_optional(&mut *tx)
                .await?;
            if found.is_none() {
                debug!("Rejecting movie {:?}, unknown genre {genre_id}", payload.title);
                return Err(Error::InvalidReference(format!("Genre {genre_id}")));
            }
            sqlx::query("INSERT INTO movie_genre (movie_id, genre_id) VALUES (?, ?)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        self.get_detail(id).await
    }

    /// Deletes movie, its reviews and genre links, returns number of deleted reviews
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let mut tx = self.executor.begin().await?;

        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM movie WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(Error::RecordNotFound("Movie".to_string()));
        }

        let reviews = sqlx::query("DELETE FROM review WHERE movie_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM movie_genre WHERE movie_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM movie WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!("Deleted movie {id} with {reviews} reviews");
        Ok(reviews)
    }
}
