use crate::{ChosenDB, Error, error::Result};
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;

/// Review body as submitted by client.
///
/// Fields are optional only so that missing ones are reported by validation
/// together with other field errors. Any `movie` in the body is ignored, review
/// is always bound to the movie from the request path.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReviewPayload {
    #[garde(required, length(chars, max = 150))]
    pub content: Option<String>,
    #[garde(required)]
    pub score: Option<i64>,
}

/// Validated review content and score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub content: String,
    pub score: i64,
}

impl ReviewPayload {
    pub fn into_review(self) -> Result<NewReview, garde::Report> {
        self.validate()?;
        match (self.content, self.score) {
            (Some(content), Some(score)) => Ok(NewReview { content, score }),
            _ => {
                let mut report = garde::Report::new();
                report.append(
                    garde::Path::empty(),
                    garde::Error::new("content and score are required"),
                );
                Err(report)
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Review {
    pub id: i64,
    pub content: String,
    pub score: i64,
    pub movie: i64,
}

const SELECT_REVIEW: &str = "SELECT id, content, score, movie_id AS movie FROM review";

pub type ReviewRepository = ReviewRepositoryImpl<Pool<ChosenDB>>;

pub struct ReviewRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> ReviewRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Creates review bound to given movie
    pub async fn create(&self, movie_id: i64, review: NewReview) -> Result<Review> {
        let movie = sqlx::query_scalar::<_, i64>("SELECT id FROM movie WHERE id = ?")
            .bind(movie_id)
            .fetch_optional(&self.executor)
            .await?;
        if movie.is_none() {
            return Err(Error::RecordNotFound("Movie".to_string()));
        }

        let result = sqlx::query("INSERT INTO review (content, score, movie_id) VALUES (?, ?, ?)")
            .bind(&review.content)
            .bind(review.score)
            .bind(movie_id)
            .execute(&self.executor)
            .await?;

        let id = result.last_insert_rowid();
        self.get(id).await
    }

    /// Replaces content and score, movie stays unchanged
    pub async fn update(&self, id: i64, review: NewReview) -> Result<Review> {
        let result = sqlx::query("UPDATE review SET content = ?, score = ? WHERE id = ?")
            .bind(&review.content)
            .bind(review.score)
            .bind(id)
            .execute(&self.executor)
            .await?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound("Review".to_string()))
        } else {
            self.get(id).await
        }
    }

    pub async fn get(&self, id: i64) -> Result<Review> {
        sqlx::query_as::<_, Review>(&format!("{SELECT_REVIEW} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Review".to_string()))
    }

    /// Reviews of the movie, newest first
    pub async fn list_for_movie(&self, movie_id: i64) -> Result<Vec<Review>> {
        let records = sqlx::query_as::<_, Review>(&format!(
            "{SELECT_REVIEW} WHERE movie_id = ? ORDER BY id DESC LIMIT ?"
        ))
        .bind(movie_id)
        .bind(crate::MAX_LIMIT as i64)
        .fetch_all(&self.executor)
        .await?;
        Ok(records)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM review WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Review".to_string()))
        } else {
            Ok(())
        }
    }
}
