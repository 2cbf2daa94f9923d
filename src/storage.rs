use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;
use crate::models::{Catalog, Product, warn_if_unpriced};

/// 商品种子文件结构：若干 [[products]] 表
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// 从 TOML 文件读取商品目录（只读，从不写回）
pub fn load_catalog(path: &Path) -> Result<Catalog, AppError> {
    let content = fs::read_to_string(path)?;
    let file: CatalogFile = toml::from_str(&content).map_err(|source| AppError::CatalogParse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Catalog::from_products(dedup_ids(file.products)))
}

/// 重复的 id 只保留第一次出现的商品
fn dedup_ids(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| {
            let fresh = seen.insert(p.id);
            if fresh {
                warn_if_unpriced(p);
            } else {
                warn!(product_id = p.id, "duplicate product id in catalog, skipped");
            }
            fresh
        })
        .collect()
}
