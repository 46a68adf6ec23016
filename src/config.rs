use crate::error::ConfigurationError;
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn default_mongodb_uri() -> String {
    env::var("MONGODB_URI").unwrap_or("mongodb://localhost:27017".to_string())
}

fn default_mongodb_db() -> String {
    env::var("MONGODB_DB_NAME").unwrap_or("lessonlink".to_string())
}

fn default_jwt_secret() -> String {
    env::var("ACCESS_TOKEN_SECRET").unwrap_or("lessonlink-dev-secret".to_string())
}

fn default_payment_secret_key() -> String {
    env::var("PAYMENT_SECRET_KEY").unwrap_or_default()
}

fn default_payment_api_base() -> String {
    env::var("PAYMENT_API_BASE").unwrap_or("https://api.stripe.com/v1".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    file_path: PathBuf,

    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,
    #[serde(default = "default_mongodb_db")]
    pub mongodb_db: String,

    /// Process-wide token signing secret; no rotation.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    #[serde(default = "default_payment_secret_key")]
    pub payment_secret_key: String,
    #[serde(default = "default_payment_api_base")]
    pub payment_api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: config_dir().join("settings.yml"),
            mongodb_uri: default_mongodb_uri(),
            mongodb_db: default_mongodb_db(),
            jwt_secret: default_jwt_secret(),
            payment_secret_key: default_payment_secret_key(),
            payment_api_base: default_payment_api_base(),
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or("./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        let dir = config_dir();
        let config_file = ["settings.yml", "settings.yaml"]
            .iter()
            .map(|name| dir.join(name))
            .find(|it| Path::exists(it))
            .ok_or_else(|| ConfigurationError::NotFound(dir))?;

        let file = File::open(config_file)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigurationError> {
        let file = File::create(&self.file_path)?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }
}
