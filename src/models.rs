use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PriceError;

/// 商品图片的默认占位地址
pub const DEFAULT_IMAGE: &str = "/placeholder.svg?height=300&width=400";

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn default_rating() -> f32 {
    5.0
}

/// 商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: String, // "<整数> DH"
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub certification: String,
    #[serde(default = "default_rating")]
    pub rating: f32,
}

impl Product {
    /// 价格对应的整数值（解析失败为 0）
    pub fn unit_price(&self) -> u64 {
        parse_price(&self.price)
    }

    /// 满星数（0..=5）
    pub fn full_stars(&self) -> usize {
        self.rating.clamp(0.0, 5.0).floor() as usize
    }
}

/// 新商品表单的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    LongDescription,
    Price,
    Rating,
    Origin,
    Certification,
    Image,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        DraftField::Title,
        DraftField::Description,
        DraftField::LongDescription,
        DraftField::Price,
        DraftField::Rating,
        DraftField::Origin,
        DraftField::Certification,
        DraftField::Image,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Nom du produit",
            DraftField::Description => "Description courte",
            DraftField::LongDescription => "Description détaillée",
            DraftField::Price => "Prix",
            DraftField::Rating => "Note (0-5)",
            DraftField::Origin => "Origine",
            DraftField::Certification => "Certification",
            DraftField::Image => "URL de l'image",
        }
    }
}

/// 尚未分配 id 的商品（添加商品表单的内容）
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub long_description: String,
    pub origin: String,
    pub certification: String,
    pub rating: f32,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            image: default_image(),
            long_description: String::new(),
            origin: String::new(),
            certification: String::new(),
            rating: default_rating(),
        }
    }
}

impl ProductDraft {
    pub fn get(&self, field: DraftField) -> String {
        match field {
            DraftField::Title => self.title.clone(),
            DraftField::Description => self.description.clone(),
            DraftField::LongDescription => self.long_description.clone(),
            DraftField::Price => self.price.clone(),
            DraftField::Rating => self.rating.to_string(),
            DraftField::Origin => self.origin.clone(),
            DraftField::Certification => self.certification.clone(),
            DraftField::Image => self.image.clone(),
        }
    }

    /// 写入字段；评分无法解析时保留原值
    pub fn set(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Title => self.title = value.to_string(),
            DraftField::Description => self.description = value.to_string(),
            DraftField::LongDescription => self.long_description = value.to_string(),
            DraftField::Price => self.price = value.to_string(),
            DraftField::Rating => {
                if let Ok(rating) = value.trim().replace(',', ".").parse::<f32>() {
                    if rating.is_finite() {
                        self.rating = rating.clamp(0.0, 5.0);
                    }
                }
            }
            DraftField::Origin => self.origin = value.to_string(),
            DraftField::Certification => self.certification = value.to_string(),
            DraftField::Image => self.image = value.to_string(),
        }
    }

    pub fn into_product(self, id: u32) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            image: self.image,
            long_description: self.long_description,
            origin: self.origin,
            certification: self.certification,
            rating: self.rating,
        }
    }
}

/// 严格解析价格：去掉所有非数字字符后按十进制解析
pub fn parse_price_checked(price: &str) -> Result<u64, PriceError> {
    let digits: String = price.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(PriceError::NoDigits(price.to_string()));
    }
    digits
        .parse::<u64>()
        .map_err(|_| PriceError::Overflow(price.to_string()))
}

/// 宽松解析价格，无法解析时记为 0
///
/// 渲染时每帧都会调用，不记录日志；告警在商品进入目录时由 [`warn_if_unpriced`] 发出。
pub fn parse_price(price: &str) -> u64 {
    parse_price_checked(price).unwrap_or(0)
}

/// 商品价格无法解析时告警一次
pub fn warn_if_unpriced(product: &Product) {
    if let Err(e) = parse_price_checked(&product.price) {
        warn!(product_id = product.id, error = %e, "price degraded to 0");
    }
}

/// 购物车中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> u64 {
        self.product
            .unit_price()
            .saturating_mul(u64::from(self.quantity))
    }
}

/// 购物车：按加入顺序保存，每个商品 id 只有一行
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入商品；已存在则数量加一
    pub fn add(&mut self, product: Product) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product,
                quantity: 1,
            }),
        }
    }

    /// 移除商品所在的整行，不存在时什么也不做
    pub fn remove(&mut self, product_id: u32) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.subtotal()))
    }

    /// 徽标上显示的商品件数
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// 商品目录（只能追加）
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// 内置的三个示例商品
    pub fn seeded() -> Self {
        Self::from_products(vec![
            Product {
                id: 1,
                title: "Fruits & Légumes Bio".to_string(),
                description: "Produits frais certifiés biologiques, cultivés sans pesticides ni engrais chimiques.".to_string(),
                price: "80 DH".to_string(),
                image: default_image(),
                long_description: "Nos fruits et légumes biologiques sont cultivés selon des méthodes respectueuses de l'environnement, sans utilisation de pesticides ou d'engrais chimiques. Récoltés à maturité optimale, ils vous garantissent une fraîcheur et une saveur incomparables.".to_string(),
                origin: "Régions agricoles du Maroc".to_string(),
                certification: "Certification Bio Maroc".to_string(),
                rating: 4.8,
            },
            Product {
                id: 2,
                title: "Huile d'Olive Extra Vierge".to_string(),
                description: "Huile d'olive pressée à froid, riche en antioxydants et au goût authentique.".to_string(),
                price: "120 DH".to_string(),
                image: default_image(),
                long_description: "Notre huile d'olive extra vierge est obtenue par première pression à froid d'olives soigneusement sélectionnées dans les oliveraies traditionnelles du Maroc. Avec son goût fruité et sa légère amertume caractéristique, elle sublimera tous vos plats.".to_string(),
                origin: "Oliveraies de l'Atlas".to_string(),
                certification: "AOC Huile d'Olive du Maroc".to_string(),
                rating: 5.0,
            },
            Product {
                id: 3,
                title: "Miel de Fleurs Sauvages".to_string(),
                description: "Miel 100% naturel, récolté dans les régions préservées de l'Atlas.".to_string(),
                price: "150 DH".to_string(),
                image: default_image(),
                long_description: "Notre miel de fleurs sauvages est récolté dans les régions préservées de l'Atlas marocain, où les abeilles butinent une grande diversité de fleurs sauvages. Ce miel 100% naturel et non pasteurisé conserve toutes ses propriétés nutritionnelles.".to_string(),
                origin: "Montagnes de l'Atlas".to_string(),
                certification: "Produit Naturel du Terroir".to_string(),
                rating: 4.9,
            },
        ])
    }

    /// 下一个可用 id：最大 id + 1，空目录为 1
    pub fn next_id(&self) -> u32 {
        self.products
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// 添加新商品，返回分配的 id
    pub fn add_product(&mut self, draft: ProductDraft) -> u32 {
        let id = self.next_id();
        let product = draft.into_product(id);
        warn_if_unpriced(&product);
        self.products.push(product);
        id
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// 页面上的六个栏目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    About,
    Services,
    Products,
    Blog,
    Contact,
    Partners,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::About,
        SectionId::Services,
        SectionId::Products,
        SectionId::Blog,
        SectionId::Contact,
        SectionId::Partners,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SectionId::About => "about",
            SectionId::Services => "services",
            SectionId::Products => "products",
            SectionId::Blog => "blog",
            SectionId::Contact => "contact",
            SectionId::Partners => "partners",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::About => "À Propos",
            SectionId::Services => "Services",
            SectionId::Products => "Produits",
            SectionId::Blog => "Blog",
            SectionId::Contact => "Contact",
            SectionId::Partners => "Partenaires",
        }
    }

    /// 导航栏序号（从 0 开始）
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// 可在编辑模式下修改的文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    HeroTitle,
    HeroSubtitle,
    WelcomeTitle,
    WelcomeText,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::HeroTitle,
        TextField::HeroSubtitle,
        TextField::WelcomeTitle,
        TextField::WelcomeText,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TextField::HeroTitle => "Titre principal",
            TextField::HeroSubtitle => "Sous-titre",
            TextField::WelcomeTitle => "Titre d'accueil",
            TextField::WelcomeText => "Texte d'accueil",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditableTexts {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub welcome_title: String,
    pub welcome_text: String,
}

impl Default for EditableTexts {
    fn default() -> Self {
        Self {
            hero_title: "Washingtonia".to_string(),
            hero_subtitle: "Votre partenaire spécialisé dans le conseil agricole, la commercialisation de produits et la prestation de services agricoles de qualité.".to_string(),
            welcome_title: "Bienvenue chez Washingtonia".to_string(),
            welcome_text: "Cliquez sur l'un des boutons ci-dessus pour découvrir nos services, produits et plus encore.".to_string(),
        }
    }
}

impl EditableTexts {
    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::HeroTitle => &self.hero_title,
            TextField::HeroSubtitle => &self.hero_subtitle,
            TextField::WelcomeTitle => &self.welcome_title,
            TextField::WelcomeText => &self.welcome_text,
        }
    }

    pub fn set(&mut self, field: TextField, value: String) {
        match field {
            TextField::HeroTitle => self.hero_title = value,
            TextField::HeroSubtitle => self.hero_subtitle = value,
            TextField::WelcomeTitle => self.welcome_title = value,
            TextField::WelcomeText => self.welcome_text = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    fn product(id: u32, price: &str) -> Product {
        ProductDraft {
            title: format!("Produit {}", id),
            price: price.to_string(),
            ..ProductDraft::default()
        }
        .into_product(id)
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("80 DH"), 80);
        assert_eq!(parse_price("120 DH"), 120);
        assert_eq!(parse_price("1 200 DH"), 1200);
        assert_eq!(parse_price("DH"), 0);
        assert_eq!(parse_price(""), 0);
    }

    #[test]
    fn test_parse_price_checked() {
        assert_eq!(parse_price_checked("150 DH"), Ok(150));
        assert_eq!(
            parse_price_checked("DH"),
            Err(PriceError::NoDigits("DH".to_string()))
        );
        let huge = "99999999999999999999999 DH";
        assert_eq!(
            parse_price_checked(huge),
            Err(PriceError::Overflow(huge.to_string()))
        );
        assert_eq!(parse_price(huge), 0);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let p = product(1, "80 DH");
        cart.add(p.clone());
        let after_one = cart.item_count();
        cart.add(p);

        assert_eq!(cart.item_count(), after_one + 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_remove_keeps_other_lines() {
        let mut cart = Cart::new();
        cart.add(product(1, "80 DH"));
        cart.add(product(2, "120 DH"));
        cart.add(product(2, "120 DH"));
        cart.add(product(3, "150 DH"));

        cart.remove(2);

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(cart.lines().iter().all(|l| l.quantity == 1));

        // 不存在的 id 不报错
        cart.remove(42);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_total_scenario() {
        let mut cart = Cart::new();
        cart.add(product(1, "80 DH"));
        cart.add(product(1, "80 DH"));
        cart.add(product(2, "150 DH"));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 80 * 2 + 150);
    }

    #[test]
    fn test_total_independent_of_order() {
        let mut a = Cart::new();
        a.add(product(1, "80 DH"));
        a.add(product(2, "150 DH"));
        a.add(product(3, "DH"));
        a.remove(3);
        a.add(product(1, "80 DH"));

        let mut b = Cart::new();
        b.add(product(2, "150 DH"));
        b.add(product(1, "80 DH"));
        b.add(product(1, "80 DH"));

        assert_eq!(a.total(), b.total());
        assert_eq!(a.item_count(), b.item_count());
    }

    #[test]
    fn test_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product(3, "150 DH"));
        cart.add(product(1, "80 DH"));
        cart.add(product(3, "150 DH"));

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_catalog_next_id() {
        let mut catalog = Catalog::from_products(vec![product(1, "80 DH"), product(3, "150 DH")]);
        let id = catalog.add_product(ProductDraft::default());
        assert_eq!(id, 4);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.products().last().map(|p| p.id), Some(4));

        let mut empty = Catalog::default();
        assert_eq!(empty.add_product(ProductDraft::default()), 1);
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(2).map(|p| p.unit_price()), Some(120));
        assert_eq!(catalog.next_id(), 4);
    }

    #[test]
    fn test_draft_rating_input() {
        let mut draft = ProductDraft::default();
        draft.set(DraftField::Rating, "4,5");
        assert_eq!(draft.rating, 4.5);
        draft.set(DraftField::Rating, "abc");
        assert_eq!(draft.rating, 4.5);
        draft.set(DraftField::Rating, "9");
        assert_eq!(draft.rating, 5.0);
    }

    #[test]
    fn test_section_slugs() {
        let slugs: Vec<&str> = SectionId::ALL.iter().map(|s| s.slug()).collect();
        assert_eq!(
            slugs,
            vec!["about", "services", "products", "blog", "contact", "partners"]
        );
        assert_eq!(SectionId::Blog.index(), 3);
    }

    /// 统计 WARN 级别事件
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_unpriced_product_warns_once() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let mut catalog = Catalog::seeded();
            let id = catalog.add_product(ProductDraft {
                title: "Palmier".to_string(),
                price: "sur devis".to_string(),
                ..ProductDraft::default()
            });
            assert_eq!(warnings.load(Ordering::SeqCst), 1);

            let mut cart = Cart::new();
            if let Some(product) = catalog.get(id) {
                cart.add(product.clone());
            }
            // 每帧渲染都会重新计算总价
            for _ in 0..10 {
                assert_eq!(cart.total(), 0);
            }
            assert_eq!(warnings.load(Ordering::SeqCst), 1);

            catalog.add_product(ProductDraft {
                title: "Dattes".to_string(),
                price: "90 DH".to_string(),
                ..ProductDraft::default()
            });
            assert_eq!(warnings.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn test_editable_texts() {
        let mut texts = EditableTexts::default();
        assert_eq!(
            texts.get(TextField::WelcomeText),
            "Cliquez sur l'un des boutons ci-dessus pour découvrir nos services, produits et plus encore."
        );
        assert_eq!(texts.get(TextField::HeroTitle), "Washingtonia");
        texts.set(TextField::WelcomeTitle, "Salam".to_string());
        assert_eq!(texts.welcome_title, "Salam");
    }
}
