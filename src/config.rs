use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::air::Conditions;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 사람이 읽는 표 형식
    #[default]
    Text,
    /// TOML 문서
    Toml,
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CLI 인자가 없을 때 사용하는 기준 공기 상태
    pub reference: Conditions,
    /// 언어 코드(ko/en/auto). 없으면 시스템 로케일을 따른다.
    pub language: Option<String>,
    pub output: OutputFormat,
    /// 계산 전에 물리 범위 검사를 수행할지 여부
    pub strict: bool,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference: Conditions::default(),
            language: None,
            output: OutputFormat::Text,
            strict: false,
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        Config::from_toml_str(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "created default config");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// TOML 문자열에서 설정을 읽는다. 빠진 항목은 기본값으로 채운다.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// 설정을 로드했던 파일(없으면 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        save_config(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = Config::from_toml_str("").expect("parse");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.reference.pressure_pa, 101_325.0);
    }

    #[test]
    fn partial_reference_keeps_other_defaults() {
        let cfg = Config::from_toml_str(
            "output = \"toml\"\n[reference]\nhumidity_pct = 45.0\n",
        )
        .expect("parse");
        assert_eq!(cfg.output, OutputFormat::Toml);
        assert_eq!(cfg.reference.humidity_pct, 45.0);
        assert_eq!(cfg.reference.temperature_c, 20.0);
        assert!(!cfg.strict);
    }

    #[test]
    fn missing_file_is_created_and_save_writes_back_to_it() {
        let dir = std::env::temp_dir().join(format!("humid_air_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let mut cfg = load_or_default(&path).expect("load missing");
        assert!(path.exists());
        assert_eq!(cfg.reference, Conditions::default());
        assert_eq!(load_or_default(&path).expect("reload defaults"), cfg);

        cfg.reference.humidity_pct = 55.0;
        cfg.language = Some("ko".to_string());
        cfg.save().expect("save");

        let reloaded = load_or_default(&path).expect("reload");
        assert_eq!(reloaded.reference.humidity_pct, 55.0);
        assert_eq!(reloaded.language.as_deref(), Some("ko"));
        assert_eq!(reloaded.output, OutputFormat::Text);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let err = Config::from_toml_str("output = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }
}
