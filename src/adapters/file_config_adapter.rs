//! INI file configuration adapter.

use std::path::Path;

use configparser::ini::Ini;

use crate::domain::error::SignalError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SignalError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| SignalError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SignalError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SignalError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL: &str = r#"
[market]
source = csv
data_dir = /srv/market
quote = eur
universe_size = 60

[planner]
preset = Swing Smart
account_size = 25000.5
execution_mode = Paper

[preset]
stop_loss_pct = 3.5

[logging]
level = debug
"#;

    #[test]
    fn from_string_reads_all_sections() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(adapter.get_string("market", "source"), Some("csv".to_string()));
        assert_eq!(adapter.get_string("market", "data_dir"), Some("/srv/market".to_string()));
        assert_eq!(adapter.get_int("market", "universe_size", 0), 60);
        assert_eq!(adapter.get_string("planner", "preset"), Some("Swing Smart".to_string()));
        assert_eq!(adapter.get_double("planner", "account_size", 0.0), 25000.5);
        assert_eq!(adapter.get_double("preset", "stop_loss_pct", 0.0), 3.5);
        assert_eq!(adapter.get_string("logging", "level"), Some("debug".to_string()));
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[market]\nquote = usd\n").unwrap();
        assert_eq!(adapter.get_string("market", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[market]\nheatmap_size = many\n").unwrap();
        assert_eq!(adapter.get_int("market", "heatmap_size", 8), 8);
        assert_eq!(adapter.get_int("market", "universe_size", 40), 40);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[planner]\naccount_size = plenty\n").unwrap();
        assert_eq!(adapter.get_double("planner", "account_size", 99.9), 99.9);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[logging]\nlevel = warn\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("logging", "level"), Some("warn".to_string()));
    }

    #[test]
    fn from_file_missing_file_is_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/signalpro.ini").unwrap_err();
        assert!(matches!(
            err,
            SignalError::ConfigParse { file, .. } if file.ends_with("signalpro.ini")
        ));
    }
}
