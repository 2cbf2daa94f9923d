//! 视图协调器
//!
//! 唯一决定"屏幕上显示什么"的状态：当前栏目、各个弹窗、导航栏以及管理员开关。
//! 所有操作只修改内存中的标志，不会失败。

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::models::{Product, SectionId};

/// 进入管理员模式所需的固定口令（仅是功能开关，不是安全边界）
pub const ADMIN_TOKEN: &str = "admin123";

/// 弹窗隐藏导航栏的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavBarPolicy {
    /// 单个布尔值，最后一次写入生效：关闭任一弹窗都会恢复导航栏
    #[default]
    LastWriter,
    /// 计数：所有隐藏导航栏的弹窗都关闭后才恢复
    Counted,
}

#[derive(Debug, Clone, Default)]
pub struct ViewCoordinator {
    active_section: Option<SectionId>,
    cart_open: bool,
    checkout_open: bool,
    product_details_open: bool,
    add_product_open: bool,
    admin_panel_open: bool,
    is_admin: bool,
    edit_mode: bool,
    selected_product: Option<Product>,
    product_for_details: Option<Product>,

    nav_policy: NavBarPolicy,
    nav_hidden: bool,
    nav_suppressions: u32,

    scroll_attached: bool,
    pending_scroll: bool,
}

impl ViewCoordinator {
    pub fn new(nav_policy: NavBarPolicy) -> Self {
        Self {
            nav_policy,
            ..Self::default()
        }
    }

    /// 绑定可滚动的内容区域，之后切换栏目会请求滚动
    pub fn attach_scroll_container(&mut self) {
        self.scroll_attached = true;
    }

    /// 取出并清除待处理的滚动请求
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_scroll)
    }

    // ============ 栏目 ============

    pub fn select_section(&mut self, id: SectionId) {
        debug!(section = id.slug(), "select section");
        self.active_section = Some(id);
        if self.scroll_attached {
            self.pending_scroll = true;
        }
    }

    pub fn close_section(&mut self) {
        debug!("close section");
        self.active_section = None;
    }

    // ============ 导航栏 ============

    fn suppress_nav(&mut self, was_open: bool) {
        match self.nav_policy {
            NavBarPolicy::LastWriter => self.nav_hidden = true,
            NavBarPolicy::Counted => {
                if !was_open {
                    self.nav_suppressions += 1;
                }
            }
        }
    }

    fn release_nav(&mut self, was_open: bool) {
        match self.nav_policy {
            NavBarPolicy::LastWriter => self.nav_hidden = false,
            NavBarPolicy::Counted => {
                if was_open {
                    self.nav_suppressions = self.nav_suppressions.saturating_sub(1);
                }
            }
        }
    }

    pub fn nav_bar_visible(&self) -> bool {
        match self.nav_policy {
            NavBarPolicy::LastWriter => !self.nav_hidden,
            NavBarPolicy::Counted => self.nav_suppressions == 0,
        }
    }

    // ============ 结账 ============

    /// 直接购买：不经过购物车
    pub fn open_checkout(&mut self, product: Product) {
        debug!(product_id = product.id, "open checkout");
        let was_open = self.checkout_open;
        self.selected_product = Some(product);
        self.checkout_open = true;
        self.suppress_nav(was_open);
    }

    /// 为整个购物车结账
    pub fn open_checkout_from_cart(&mut self) {
        debug!("open checkout for cart");
        let was_open = self.checkout_open;
        self.cart_open = false;
        self.selected_product = None;
        self.checkout_open = true;
        self.suppress_nav(was_open);
    }

    /// selected_product 保留，下次打开时覆盖
    pub fn close_checkout(&mut self) {
        debug!("close checkout");
        let was_open = self.checkout_open;
        self.checkout_open = false;
        self.release_nav(was_open);
    }

    // ============ 商品详情 ============

    pub fn open_product_details(&mut self, product: Product) {
        debug!(product_id = product.id, "open product details");
        let was_open = self.product_details_open;
        self.product_for_details = Some(product);
        self.product_details_open = true;
        self.suppress_nav(was_open);
    }

    pub fn close_product_details(&mut self) {
        debug!("close product details");
        let was_open = self.product_details_open;
        self.product_details_open = false;
        self.release_nav(was_open);
    }

    /// 详情页中的"立即购买"
    pub fn buy_now_from_details(&mut self) {
        if let Some(product) = self.product_for_details.clone() {
            self.close_product_details();
            self.open_checkout(product);
        }
    }

    // ============ 购物车 ============

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// 空购物车中的"浏览商品"
    pub fn browse_products_from_cart(&mut self) {
        self.close_cart();
        self.select_section(SectionId::Products);
    }

    // ============ 管理员 ============

    /// 口令正确时开启管理员模式；错误的口令不改变当前状态
    pub fn enter_admin(&mut self, token: &str) -> bool {
        if token == ADMIN_TOKEN {
            info!("admin mode enabled");
            self.is_admin = true;
            true
        } else {
            warn!("admin token rejected");
            false
        }
    }

    pub fn logout_admin(&mut self) {
        info!("admin logout");
        self.is_admin = false;
        self.edit_mode = false;
        self.admin_panel_open = false;
        self.add_product_open = false;
    }

    pub fn toggle_admin_panel(&mut self) {
        if self.is_admin {
            self.admin_panel_open = !self.admin_panel_open;
        }
    }

    pub fn close_admin_panel(&mut self) {
        self.admin_panel_open = false;
    }

    pub fn toggle_edit_mode(&mut self) {
        if self.is_admin {
            self.edit_mode = !self.edit_mode;
            debug!(edit_mode = self.edit_mode, "toggle edit mode");
        }
    }

    pub fn open_add_product_form(&mut self) {
        if self.is_admin {
            self.add_product_open = true;
        }
    }

    pub fn close_add_product_form(&mut self) {
        self.add_product_open = false;
    }

    // ============ 查询 ============

    pub fn active_section(&self) -> Option<SectionId> {
        self.active_section
    }

    pub fn cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn checkout_open(&self) -> bool {
        self.checkout_open
    }

    pub fn product_details_open(&self) -> bool {
        self.product_details_open
    }

    pub fn add_product_open(&self) -> bool {
        self.add_product_open
    }

    pub fn admin_panel_open(&self) -> bool {
        self.admin_panel_open
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    pub fn product_for_details(&self) -> Option<&Product> {
        self.product_for_details.as_ref()
    }
}
