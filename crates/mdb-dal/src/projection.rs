//! Response shapes of the catalog.
//!
//! Flat shapes render relations as bare ids, detail shapes embed related records.
//! Apart from the relational field both variants carry the same data, so a detail
//! shape can always be reduced to its flat counterpart.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{genre::Genre, movie::MovieRecord};

/// Movie with genres as list of ids
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub audience: i64,
    pub poster_url: String,
    pub description: String,
    pub genre: Vec<i64>,
}

/// Movie with embedded genres
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub audience: i64,
    pub poster_url: String,
    pub description: String,
    pub genre: Vec<Genre>,
}

/// Genre with all movies tagged by it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenreDetail {
    pub id: i64,
    pub name: String,
    pub movies: Vec<Movie>,
}

/// Row of movie - genre join table
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct GenreLink {
    pub movie_id: i64,
    pub genre_id: i64,
}

pub fn movie_flat(record: MovieRecord, genre_ids: impl IntoIterator<Item = i64>) -> Movie {
    let genre: BTreeSet<i64> = genre_ids.into_iter().collect();
    Movie {
        id: record.id,
        title: record.title,
        audience: record.audience,
        poster_url: record.poster_url,
        description: record.description,
        genre: genre.into_iter().collect(),
    }
}

pub fn movie_detail(record: MovieRecord, genres: impl IntoIterator<Item = Genre>) -> MovieDetail {
    let mut genre: Vec<Genre> = genres.into_iter().collect();
    genre.sort_by_key(|g| g.id);
    genre.dedup_by_key(|g| g.id);
    MovieDetail {
        id: record.id,
        title: record.title,
        audience: record.audience,
        poster_url: record.poster_url,
        description: record.description,
        genre,
    }
}

pub fn genre_detail(genre: Genre, movies: impl IntoIterator<Item = Movie>) -> GenreDetail {
    let mut movies: Vec<Movie> = movies.into_iter().collect();
    movies.sort_by_key(|m| m.id);
    movies.dedup_by_key(|m| m.id);
    GenreDetail {
        id: genre.id,
        name: genre.name,
        movies,
    }
}

/// Groups join table rows into movie id -> sorted unique genre ids
pub fn group_genre_links(links: impl IntoIterator<Item = GenreLink>) -> HashMap<i64, Vec<i64>> {
    let mut grouped: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    for link in links {
        grouped.entry(link.movie_id).or_default().insert(link.genre_id);
    }
    grouped
        .into_iter()
        .map(|(movie_id, genres)| (movie_id, genres.into_iter().collect()))
        .collect()
}

/// Flat shapes for movie records, movies without any link get empty genre list
pub fn movies_flat(
    records: impl IntoIterator<Item = MovieRecord>,
    links: impl IntoIterator<Item = GenreLink>,
) -> Vec<Movie> {
    let mut grouped = group_genre_links(links);
    records
        .into_iter()
        .map(|record| {
            let genre = grouped.remove(&record.id).unwrap_or_default();
            movie_flat(record, genre)
        })
        .collect()
}

impl From<MovieDetail> for Movie {
    fn from(detail: MovieDetail) -> Self {
        Movie {
            id: detail.id,
            title: detail.title,
            audience: detail.audience,
            poster_url: detail.poster_url,
            description: detail.description,
            genre: detail.genre.into_iter().map(|g| g.id).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            audience: 1000 * id,
            poster_url: format!("https://posters.example.com/{id}.jpg"),
            description: format!("About {title}"),
        }
    }

    fn genre(id: i64, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    fn link(movie_id: i64, genre_id: i64) -> GenreLink {
        GenreLink { movie_id, genre_id }
    }

    #[test]
    fn test_movie_flat_renders_genre_ids() {
        let movie = movie_flat(record(1, "Alien"), [3, 1, 3]);
        assert_eq!(movie.genre, vec![1, 3]);
        assert_eq!(movie.title, "Alien");
        assert_eq!(movie.audience, 1000);
    }

    #[test]
    fn test_movie_detail_embeds_genres() {
        let detail = movie_detail(
            record(2, "Heat"),
            [genre(5, "crime"), genre(2, "drama"), genre(5, "crime")],
        );
        assert_eq!(detail.genre, vec![genre(2, "drama"), genre(5, "crime")]);
        assert_eq!(detail.poster_url, "https://posters.example.com/2.jpg");
    }

    #[test]
    fn test_flat_and_detail_agree() {
        let genres = [genre(1, "sci-fi"), genre(4, "horror")];
        let detail = movie_detail(record(7, "Alien"), genres.clone());
        let flat = movie_flat(record(7, "Alien"), genres.iter().map(|g| g.id));
        assert_eq!(Movie::from(detail.clone()), flat);

        let detail_json = serde_json::to_value(&detail).unwrap();
        let flat_json = serde_json::to_value(&flat).unwrap();
        for key in ["id", "title", "audience", "poster_url", "description"] {
            assert_eq!(detail_json[key], flat_json[key]);
        }
        assert_eq!(detail_json["genre"][1]["name"], "horror");
        assert_eq!(flat_json["genre"], serde_json::json!([1, 4]));
    }

    #[test]
    fn test_genre_detail() {
        let movies = movies_flat(
            [record(3, "Heat"), record(1, "Alien")],
            [link(1, 1), link(1, 2), link(3, 2)],
        );
        let detail = genre_detail(genre(2, "drama"), movies);
        assert_eq!(detail.name, "drama");
        let ids: Vec<i64> = detail.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(detail.movies[0].genre, vec![1, 2]);
        assert_eq!(detail.movies[1].genre, vec![2]);
    }

    #[test]
    fn test_movies_without_genres() {
        let movies = movies_flat([record(1, "Alien"), record(2, "Heat")], [link(2, 9)]);
        assert!(movies[0].genre.is_empty());
        assert_eq!(movies[1].genre, vec![9]);
    }

    #[test]
    fn test_group_genre_links() {
        let grouped = group_genre_links([link(1, 3), link(1, 1), link(2, 1), link(1, 3)]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&1], vec![1, 3]);
        assert_eq!(grouped[&2], vec![1]);
    }
}
