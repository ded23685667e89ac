use clap::Parser as _;
use mdb_cli::{config::CliConfig, run::run};
use mdb_dal::{genre::GenreRepository, movie::MovieRepository};

async fn exec(data_dir: &str, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["mdb-cli", args[0], "--data-dir", data_dir];
    full.extend_from_slice(&args[1..]);
    run(CliConfig::try_parse_from(full)?).await
}

#[tokio::test]
async fn test_catalog_administration() {
    let dir = tempfile::TempDir::new().unwrap();
    let data_dir = dir.path().to_str().unwrap();

    exec(data_dir, &["add-genre", "--name", "drama"]).await.unwrap();
    exec(data_dir, &["add-genre", "--name", "crime"]).await.unwrap();
    exec(
        data_dir,
        &["add-movie", "--title", "Heat", "--audience", "1200", "--genre", "1,2"],
    )
    .await
    .unwrap();

    // unknown genre rejects whole movie
    assert!(exec(data_dir, &["add-movie", "--title", "Alien", "--genre", "9"])
        .await
        .is_err());
    // too long name
    let long_name = "x".repeat(51);
    assert!(exec(data_dir, &["add-genre", "--name", &long_name])
        .await
        .is_err());

    let fixture = dir.path().join("fixture.json");
    std::fs::write(
        &fixture,
        r#"{"genres": [{"name": "sci-fi"}],
            "movies": [{"title": "Alien", "audience": 900, "poster_url": "", "description": "", "genres": ["sci-fi", "drama"]}]}"#,
    )
    .unwrap();
    exec(data_dir, &["load", fixture.to_str().unwrap()])
        .await
        .unwrap();
    exec(data_dir, &["list"]).await.unwrap();

    let pool = mdb_dal::new_pool(&format!("sqlite://{data_dir}/mdb.db"))
        .await
        .unwrap();
    assert_eq!(GenreRepository::new(pool.clone()).list().await.unwrap().len(), 3);
    let movies = MovieRepository::new(pool.clone()).list().await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].genre, vec![1, 2]);
    assert_eq!(movies[1].genre, vec![1, 3]);

    exec(data_dir, &["delete-movie", "1"]).await.unwrap();
    assert!(exec(data_dir, &["delete-movie", "1"]).await.is_err());
    assert_eq!(MovieRepository::new(pool).list().await.unwrap().len(), 1);
}
