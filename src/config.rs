use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;
use crate::pdf::DEFAULT_PDF_ENDPOINT;
use crate::ui::coordinator::NavBarPolicy;

const APP_DIR: &str = "washingtonia";

/// 配置文件 (~/.config/washingtonia/config.toml)，所有字段可省略
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// RUST_LOG 未设置时使用的过滤规则
    pub log_level: String,
    pub pdf_endpoint: String,
    /// 只读的商品种子文件
    pub catalog: Option<PathBuf>,
    pub nav_bar_policy: NavBarPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pdf_endpoint: DEFAULT_PDF_ENDPOINT.to_string(),
            catalog: None,
            nav_bar_policy: NavBarPolicy::default(),
        }
    }
}

/// 从 TOML 文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// 默认配置文件路径
pub fn default_config_path() -> Result<PathBuf, AppError> {
    let dir = dirs::config_dir().ok_or(AppError::DataDir("配置"))?;
    Ok(dir.join(APP_DIR).join("config.toml"))
}

/// 日志目录 (~/.local/share/washingtonia/)
pub fn data_dir() -> Result<PathBuf, AppError> {
    let dir = dirs::data_dir()
        .ok_or(AppError::DataDir("数据"))?
        .join(APP_DIR);

    fs::create_dir_all(&dir)?;

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pdf_endpoint, "/api/generate-pdf");
        assert_eq!(config.nav_bar_policy, NavBarPolicy::LastWriter);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
log_level = "debug"
nav_bar_policy = "counted"
catalog = "/tmp/catalog.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.nav_bar_policy, NavBarPolicy::Counted);
        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/catalog.toml")));
        assert_eq!(config.pdf_endpoint, DEFAULT_PDF_ENDPOINT);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(toml::from_str::<Config>(r#"nav_bar_policy = "stack""#).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = load_config(Path::new("/nonexistent/washingtonia/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
