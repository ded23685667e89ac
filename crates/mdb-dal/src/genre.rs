use crate::{
    Error,
    error::Result,
    movie::MovieRecord,
    projection::{self, GenreDetail, GenreLink},
};
use futures::TryStreamExt as _;
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateGenre {
    #[garde(length(chars, min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

pub type GenreRepository = GenreRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct GenreRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> GenreRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateGenre) -> Result<Genre> {
        let result = sqlx::query("INSERT INTO genre (name) VALUES (?)")
            .bind(&payload.name)
            .execute(&self.executor)
            .await?;

        let id = result.last_insert_rowid();
        self.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<Genre>> {
        let records = sqlx::query_as::<_, Genre>("SELECT id, name FROM genre ORDER BY id")
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    pub async fn get(&self, id: i64) -> Result<Genre> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genre WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Genre".to_string()))
    }

    pub async fn get_detail(&self, id: i64) -> Result<GenreDetail> {
        let genre = self.get(id).await?;

        let movies = sqlx::query_as::<_, MovieRecord>(
            "SELECT m.id, m.title, m.audience, m.poster_url, m.description
            FROM movie m
            JOIN movie_genre mg ON mg.movie_id = m.id
            WHERE mg.genre_id = ?
            ORDER BY m.id",
        )
        .bind(id)
        .fetch_all(&self.executor)
        .await?;

        let links = sqlx::query_as::<_, GenreLink>(
            "SELECT movie_id, genre_id FROM movie_genre
            WHERE movie_id IN (SELECT movie_id FROM movie_genre WHERE genre_id = ?)",
        )
        .bind(id)
        .fetch_all(&self.executor)
        .await?;

        Ok(projection::genre_detail(
            genre,
            projection::movies_flat(movies, links),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM genre WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Genre".to_string()))
        } else {
            Ok(())
        }
    }
}
