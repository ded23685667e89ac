use anyhow::Result;
use mdb_dal::{
    genre::{CreateGenre, GenreRepository},
    movie::{CreateMovie, MovieRepository},
    review::{NewReview, ReviewRepository},
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::info;

/// Catalog used by e2e tests:
///
/// genres 1 crime, 2 sci-fi, 3 drama, 4 musical;
/// movies 1 Alien (sci-fi, drama), 2 Heat (crime, drama), 3 Blade Runner (crime, sci-fi, drama);
/// reviews 1 and 2 for Alien, 3 for Heat
pub async fn seed_catalog(database_url: &str) -> Result<()> {
    let pool = mdb_dal::new_pool(database_url).await?;
    let genres = GenreRepository::new(pool.clone());
    for name in ["crime", "sci-fi", "drama", "musical"] {
        genres
            .create(CreateGenre {
                name: name.to_string(),
            })
            .await?;
    }

    let movies = MovieRepository::new(pool.clone());
    for (title, audience, genre) in [
        ("Alien", 1500, vec![2, 3]),
        ("Heat", 1200, vec![3, 1]),
        ("Blade Runner", 900, vec![1, 2, 3]),
    ] {
        movies
            .create(CreateMovie {
                title: title.to_string(),
                audience,
                poster_url: format!(
                    "https://posters.example.com/{}.jpg",
                    title.to_lowercase().replace(' ', "-")
                ),
                description: format!("About {title}"),
                genre,
            })
            .await?;
    }

    let reviews = ReviewRepository::new(pool.clone());
    for (movie, content, score) in [(1, "Scary", 8), (1, "Classic", 10), (2, "Long", 7)] {
        reviews
            .create(
                movie,
                NewReview {
                    content: content.to_string(),
                    score,
                },
            )
            .await?;
    }
    pool.close().await;
    info!("Catalog seeded");
    Ok(())
}

pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    base_url: &Url,
    path: &str,
) -> Result<(StatusCode, T)> {
    let url = base_url.join(path)?;
    let response = client.get(url).send().await?;
    info!("Response: {:#?}", response);
    let status = response.status();
    Ok((status, response.json().await?))
}

pub async fn send_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    method: reqwest::Method,
    base_url: &Url,
    path: &str,
    payload: Option<&serde_json::Value>,
) -> Result<(StatusCode, T)> {
    let url = base_url.join(path)?;
    let mut request = client.request(method, url);
    if let Some(payload) = payload {
        request = request.json(payload);
    }
    let response = request.send().await?;
    info!("Response: {:#?}", response);
    let status = response.status();
    Ok((status, response.json().await?))
}
