//! Bulk load of catalog data, used by administration tools.
//!
//! Fixture is JSON document like:
//! ```json
//! {
//!   "genres": [{"name": "drama"}],
//!   "movies": [{"title": "Heat", "audience": 1200, "poster_url": "", "description": "", "genres": ["drama"]}]
//! }
//! ```
//! Movies refer to genres by name, either from the same fixture or already stored.

use std::collections::BTreeSet;

use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Pool, error::Result, genre::CreateGenre};

#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct Fixture {
    #[serde(default)]
    #[garde(dive)]
    pub genres: Vec<CreateGenre>,
    #[serde(default)]
    #[garde(dive)]
    pub movies: Vec<FixtureMovie>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct FixtureMovie {
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
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub genres: usize,
    pub movies: usize,
}

impl Fixture {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::InvalidData(e.to_string()))
    }
}

/// Loads whole fixture in one transaction, nothing is stored if any item fails
pub async fn load_fixture(pool: &Pool, fixture: Fixture) -> Result<FixtureSummary> {
    fixture.validate()?;
    let mut tx = pool.begin().await?;
    let mut summary = FixtureSummary::default();

    for genre in &fixture.genres {
        sqlx::query("INSERT INTO genre (name) VALUES (?)")
            .bind(&genre.name)
            .execute(&mut *tx)
            .await?;
        summary.genres += 1;
    }

    for movie in &fixture.movies {
        let id = sqlx::query(
            "INSERT INTO movie (title, audience, poster_url, description) VALUES (?, ?, ?, ?)",
        )
        .bind(&movie.title)
        .bind(movie.audience)
        .bind(&movie.poster_url)
        .bind(&movie.description)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut genre_ids = BTreeSet::new();
        for name in &movie.genres {
            let genre_id = sqlx::query_scalar::<_, i64>(
                "SELECT id FROM genre WHERE name = ? ORDER BY id LIMIT 1",
            )
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::InvalidReference(format!("Genre {name}")))?;
            genre_ids.insert(genre_id);
        }
        for genre_id in genre_ids {
            sqlx::query("INSERT INTO movie_genre (movie_id, genre_id) VALUES (?, ?)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }
        debug!("Loaded movie {} as {id}", movie.title);
        summary.movies += 1;
    }

    tx.commit().await?;
    info!(
        "Fixture loaded: {} genres, {} movies",
        summary.genres, summary.movies
    );
    Ok(summary)
}
