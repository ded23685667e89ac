#![allow(dead_code)]

use futures::TryStreamExt as _;
use sqlx::Executor;

pub const TEST_DATA: &str = r#"
INSERT INTO genre (id, name) VALUES (1, 'crime');
INSERT INTO genre (id, name) VALUES (2, 'sci-fi');
INSERT INTO genre (id, name) VALUES (3, 'drama');
INSERT INTO genre (id, name) VALUES (4, 'musical');

INSERT INTO movie (id, title, audience, poster_url, description)
VALUES (1, 'Alien', 1200000, 'https://posters.example.com/alien.jpg', 'In space no one can hear you scream');
INSERT INTO movie (id, title, audience, poster_url, description)
VALUES (2, 'Heat', 800000, 'https://posters.example.com/heat.jpg', 'Cops and robbers in LA');
INSERT INTO movie (id, title, audience, poster_url, description)
VALUES (5, 'Blade Runner', 950000, 'https://posters.example.com/blade-runner.jpg', 'Replicants');

INSERT INTO movie_genre (movie_id, genre_id) VALUES (1, 2);
INSERT INTO movie_genre (movie_id, genre_id) VALUES (2, 1);
INSERT INTO movie_genre (movie_id, genre_id) VALUES (2, 3);
INSERT INTO movie_genre (movie_id, genre_id) VALUES (5, 2);
INSERT INTO movie_genre (movie_id, genre_id) VALUES (5, 1);
INSERT INTO movie_genre (movie_id, genre_id) VALUES (5, 3);

INSERT INTO review (id, content, score, movie_id) VALUES (1, 'Scary', 8, 1);
INSERT INTO review (id, content, score, movie_id) VALUES (2, 'Long but good', 7, 2);
INSERT INTO review (id, content, score, movie_id) VALUES (3, 'Classic', 10, 1);
"#;

pub async fn init_db() -> mdb_dal::Pool {
    let conn = mdb_dal::new_pool_with_connections("sqlite::memory:", 1)
        .await
        .unwrap();
    mdb_dal::migrate(&conn).await.unwrap();

    conn.execute_many(TEST_DATA)
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    conn
}
