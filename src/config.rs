use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_HISTORY_WINDOW: usize = 10;
const HISTORY_FILE: &str = "skills-trainer-history.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub history_path: PathBuf,
    pub history_window: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var("CHAMP_TRAINER_DATA_DIR") {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(AppError::ConfigError(
                    "CHAMP_TRAINER_DATA_DIR is set but empty".to_string(),
                ))
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from("data"),
        };

        let history_path = env::var("CHAMP_TRAINER_HISTORY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_history_path());

        let history_window = match env::var("CHAMP_TRAINER_HISTORY_WINDOW") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::ConfigError(format!(
                    "CHAMP_TRAINER_HISTORY_WINDOW must be a number, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_HISTORY_WINDOW,
        };

        Ok(Config {
            data_dir,
            history_path,
            history_window,
        })
    }

    pub fn default_history_path() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("champ_trainer")
            .join(HISTORY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_history_path_names_the_single_slot() {
        let path = Config::default_history_path();
        assert!(path.ends_with("champ_trainer/skills-trainer-history.json"));
    }
}
