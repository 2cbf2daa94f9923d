//! 商品说明书 PDF 链接
//!
//! 只按约定拼出外部文档服务的地址和建议文件名，不发起任何请求。

use crate::models::Product;

pub const DEFAULT_PDF_ENDPOINT: &str = "/api/generate-pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSheetLink {
    pub href: String,
    pub filename: String,
}

impl ProductSheetLink {
    pub fn for_product(endpoint: &str, product: &Product) -> Self {
        Self {
            href: format!("{}?productId={}", endpoint, product.id),
            filename: format!("{}-fiche-produit.pdf", slugify(&product.title)),
        }
    }
}

/// 转小写，连续空白替换为一个 "-"
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    #[test]
    fn test_link_for_product() {
        let catalog = Catalog::seeded();
        let product = catalog.get(2).unwrap();
        let link = ProductSheetLink::for_product(DEFAULT_PDF_ENDPOINT, product);

        assert_eq!(link.href, "/api/generate-pdf?productId=2");
        assert_eq!(link.filename, "huile-d'olive-extra-vierge-fiche-produit.pdf");
    }

    #[test]
    fn test_slugify_whitespace_runs() {
        assert_eq!(slugify("Miel  de\tFleurs"), "miel-de-fleurs");
    }
}
