//! 启动参数中的页面地址
//!
//! 管理员口令来自 `--admin-token`，或来自 `--location` 地址查询串中的 `adminToken`。

use url::Url;

use crate::error::AppError;

const BASE: &str = "http://localhost/";
const TOKEN_PARAM: &str = "adminToken";

/// 解析页面地址；相对地址（如 `/?adminToken=...`）按 localhost 补全
pub fn parse_location(location: &str) -> Result<Url, AppError> {
    let base = Url::parse(BASE)?;
    Ok(base.join(location)?)
}

/// 取出地址中的 adminToken 参数
pub fn token_from_location(location: &str) -> Result<Option<String>, AppError> {
    let url = parse_location(location)?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned()))
}

/// 显式口令优先，其次是地址中的参数
pub fn admin_token(
    explicit: Option<&str>,
    location: Option<&str>,
) -> Result<Option<String>, AppError> {
    if let Some(token) = explicit {
        return Ok(Some(token.to_string()));
    }
    match location {
        Some(location) => token_from_location(location),
        None => Ok(None),
    }
}
