use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 启动阶段可能出现的错误（核心操作本身不会失败）
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    #[error("配置文件 {} 无效: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("商品目录文件 {} 无效: {source}", .path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("无效的页面地址: {0}")]
    InvalidLocation(#[from] url::ParseError),

    #[error("无法获取用户{0}目录")]
    DataDir(&'static str),
}

/// 价格字符串校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("价格 {0:?} 不含数字")]
    NoDigits(String),

    #[error("价格 {0:?} 超出 u64 范围")]
    Overflow(String),
}
