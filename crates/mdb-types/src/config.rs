use clap::Parser;
use std::path::PathBuf;

pub const DATABASE_FILE: &str = "mdb.db";

#[derive(Debug, Clone, Parser)]
pub struct BackendConfig {
    #[arg(
        long,
        env = "MDB_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db or similar, default is sqlite://[data-dir]/mdb.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "MDB_DATA_DIR",
        help = "Data directory (database etc.), default is system default like ~/.local/share/mdb",
        default_value_t = default_data_dir()
    )]
    data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("mdb"))
        .unwrap_or_else(|| PathBuf::from("mdb"))
        .to_string_lossy()
        .to_string()
}

impl BackendConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(|| {
            format!(
                "sqlite://{}",
                self.data_dir().join(DATABASE_FILE).to_string_lossy()
            )
        })
    }

    /// Creates data directory if it does not exist yet
    pub fn ensure_data_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self.data_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        } else if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("Data directory {} is not a directory", dir.display()),
            ));
        }
        Ok(dir)
    }
}
