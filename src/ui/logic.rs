//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use tracing::info;

use super::actions::Action;
use super::state::{App, AppMode, FormState, Layer};
use crate::models::{DraftField, Product, ProductDraft, SectionId, TextField};
use crate::pdf::ProductSheetLink;

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        let layer = self.layer();
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(layer),
            Action::MoveSelectionDown => self.move_down(layer),

            Action::SelectSection(id) => self.select_section(id),
            Action::NextSection => self.step_section(true),
            Action::PrevSection => self.step_section(false),
            Action::CloseSection => self.view.close_section(),

            Action::OpenCart => {
                self.view.open_cart();
                self.clamp_indices();
            }
            Action::AddToCart => self.add_to_cart(layer),
            Action::RemoveFromCart => self.remove_from_cart(),
            Action::ShowDetails => self.show_details(),
            Action::BuyNow => self.buy_now(layer),
            Action::DownloadSheet => self.download_sheet(layer),
            Action::CheckoutCart => self.checkout_cart(),
            Action::BrowseProducts => self.view.browse_products_from_cart(),

            Action::ToggleAdminPanel => self.view.toggle_admin_panel(),
            Action::ToggleEditMode => self.toggle_edit_mode(),
            Action::Logout => self.logout(),
            Action::OpenAddProduct => self.open_add_product(),
            Action::StartEditText => self.start_edit_text(),
            Action::StartContactForm => self.start_contact_form(),

            Action::NextField => {
                if let Some(form) = self.form_mut(layer) {
                    form.next_field();
                }
            }
            Action::PrevField => {
                if let Some(form) = self.form_mut(layer) {
                    form.prev_field();
                }
            }

            Action::Cancel => self.cancel(layer),
            Action::Submit => self.submit(layer),

            Action::Input(c) => {
                if layer == Layer::EditingText {
                    self.input_buffer.push(c);
                } else if let Some(form) = self.form_mut(layer) {
                    form.push_char(c);
                }
            }
            Action::DeleteChar => {
                if layer == Layer::EditingText {
                    self.input_buffer.pop();
                } else if let Some(form) = self.form_mut(layer) {
                    form.pop_char();
                }
            }
        }
        false
    }

    fn form_mut(&mut self, layer: Layer) -> Option<&mut FormState> {
        match layer {
            Layer::Checkout => Some(&mut self.checkout_form),
            Layer::ContactForm => Some(&mut self.contact_form),
            Layer::AddProductForm => Some(&mut self.product_form),
            _ => None,
        }
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self, layer: Layer) {
        match layer {
            Layer::Cart => self.cart_index = self.cart_index.saturating_sub(1),
            Layer::PickingText => self.text_index = self.text_index.saturating_sub(1),
            Layer::Page if self.view.active_section() == Some(SectionId::Products) => {
                self.product_index = self.product_index.saturating_sub(1);
            }
            Layer::Page => self.content_scroll = self.content_scroll.saturating_sub(1),
            _ => {}
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self, layer: Layer) {
        match layer {
            Layer::Cart => {
                if self.cart_index + 1 < self.cart.len() {
                    self.cart_index += 1;
                }
            }
            Layer::PickingText => {
                if self.text_index + 1 < TextField::ALL.len() {
                    self.text_index += 1;
                }
            }
            Layer::Page if self.view.active_section() == Some(SectionId::Products) => {
                if self.product_index + 1 < self.catalog.len() {
                    self.product_index += 1;
                }
            }
            Layer::Page => self.content_scroll = self.content_scroll.saturating_add(1),
            _ => {}
        }
    }

    pub fn select_section(&mut self, id: SectionId) {
        self.view.select_section(id);
        if self.mode == AppMode::ContactForm {
            self.mode = AppMode::Normal;
        }
    }

    /// 按导航栏顺序切换到相邻栏目
    fn step_section(&mut self, forward: bool) {
        let count = SectionId::ALL.len();
        let next = match (self.view.active_section(), forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(current), true) => (current.index() + 1) % count,
            (Some(current), false) => (current.index() + count - 1) % count,
        };
        self.select_section(SectionId::ALL[next]);
    }

    // ============ 商品与购物车 ============

    /// 当前操作针对的商品：详情页中的商品，或商品栏目中的选中项
    fn target_product(&self, layer: Layer) -> Option<Product> {
        match layer {
            Layer::ProductDetails => self.view.product_for_details().cloned(),
            Layer::Page if self.view.active_section() == Some(SectionId::Products) => {
                self.selected_product().cloned()
            }
            _ => None,
        }
    }

    pub fn add_to_cart(&mut self, layer: Layer) {
        if let Some(product) = self.target_product(layer) {
            self.message = Some(format!("{} ajouté au panier", product.title));
            self.cart.add(product);
            if layer == Layer::ProductDetails {
                self.view.close_product_details();
            }
        }
    }

    pub fn remove_from_cart(&mut self) {
        if let Some(line) = self.cart.lines().get(self.cart_index) {
            let id = line.product.id;
            self.cart.remove(id);
            self.clamp_indices();
        }
    }

    pub fn show_details(&mut self) {
        if let Some(product) = self.target_product(Layer::Page) {
            self.view.open_product_details(product);
        }
    }

    pub fn buy_now(&mut self, layer: Layer) {
        match layer {
            Layer::ProductDetails => {
                self.checkout_form = FormState::checkout();
                self.view.buy_now_from_details();
            }
            _ => {
                if let Some(product) = self.target_product(layer) {
                    self.checkout_form = FormState::checkout();
                    self.view.open_checkout(product);
                }
            }
        }
    }

    pub fn checkout_cart(&mut self) {
        if self.cart.is_empty() {
            self.view.browse_products_from_cart();
        } else {
            self.checkout_form = FormState::checkout();
            self.view.open_checkout_from_cart();
        }
    }

    /// 拼出 PDF 链接并"点击"：只记录日志，不发请求
    pub fn download_sheet(&mut self, layer: Layer) {
        if let Some(product) = self.target_product(layer) {
            let link = ProductSheetLink::for_product(&self.pdf_endpoint, &product);
            info!(href = %link.href, filename = %link.filename, "product sheet requested");
            self.message = Some(format!(
                "Le PDF pour {} sera téléchargé. ({})",
                product.title, link.filename
            ));
        }
    }

    pub fn confirm_checkout(&mut self) {
        if let Some(label) = self.checkout_form.first_missing() {
            self.message = Some(format!("Champ requis : {}", label));
            return;
        }

        let amount = self.amount_due();
        info!(
            customer = %format!("{} {}", self.checkout_form.value(1), self.checkout_form.value(0)),
            product_id = ?self.view.selected_product().map(|p| p.id),
            cart_items = self.cart.item_count(),
            amount = %amount,
            "order confirmed (display only)"
        );
        self.checkout_form = FormState::checkout();
        self.view.close_checkout();
        self.message = Some(format!("Commande confirmée. Total à payer : {}", amount));
    }

    // ============ 管理员相关 ============

    pub fn toggle_edit_mode(&mut self) {
        self.view.toggle_edit_mode();
        if self.view.is_admin() {
            self.message = Some(if self.view.edit_mode() {
                "Mode édition activé".to_string()
            } else {
                "Mode édition désactivé".to_string()
            });
        }
    }

    pub fn logout(&mut self) {
        if self.view.is_admin() {
            self.view.logout_admin();
            self.mode = AppMode::Normal;
            self.message = Some("Déconnecté du mode admin".to_string());
        }
    }

    pub fn open_add_product(&mut self) {
        if self.view.is_admin() {
            self.view.close_admin_panel();
            self.view.open_add_product_form();
        }
    }

    /// 确认添加商品
    pub fn confirm_add_product(&mut self) {
        if let Some(label) = self.product_form.first_missing() {
            self.message = Some(format!("Champ requis : {}", label));
            return;
        }

        let mut draft = ProductDraft::default();
        for (field, input) in DraftField::ALL.iter().zip(&self.product_form.fields) {
            draft.set(*field, &input.value);
        }
        let id = self.catalog.add_product(draft);
        if let Some(product) = self.catalog.get(id) {
            info!(product_id = id, title = %product.title, price = %product.price, "product added");
        }
        // 选中新商品
        self.product_index = self.catalog.len().saturating_sub(1);

        self.product_form = FormState::product(&ProductDraft::default());
        self.view.close_add_product_form();
        self.message = Some("Produit ajouté avec succès!".to_string());
    }

    // ============ 文本编辑相关 ============

    /// 开始编辑文本（需要编辑模式）
    pub fn start_edit_text(&mut self) {
        if self.view.edit_mode() {
            self.mode = AppMode::PickingText;
            self.text_index = 0;
        } else if self.view.is_admin() {
            self.message = Some("Activez d'abord le mode édition".to_string());
        }
    }

    /// 确认编辑文本
    pub fn confirm_edit_text(&mut self, field: TextField) {
        if self.view.edit_mode() {
            self.texts.set(field, self.input_buffer.clone());
            self.message = Some(format!("{} mis à jour", field.label()));
        }
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
    }

    // ============ 联系表单 ============

    pub fn start_contact_form(&mut self) {
        if self.view.active_section() == Some(SectionId::Contact) {
            self.mode = AppMode::ContactForm;
        }
    }

    /// 联系表单没有发送后端，仅做必填检查
    pub fn submit_contact(&mut self) {
        if let Some(label) = self.contact_form.first_missing() {
            self.message = Some(format!("Champ requis : {}", label));
            return;
        }
        info!(subject = %self.contact_form.value(2), "contact form submitted (no delivery backend)");
        self.mode = AppMode::Normal;
        self.message = Some(
            "L'envoi en ligne n'est pas disponible : contactez-nous par téléphone ou email."
                .to_string(),
        );
    }

    // ============ 通用操作 ============

    /// 提交表单或确认编辑
    pub fn submit(&mut self, layer: Layer) {
        match layer {
            Layer::Checkout => self.confirm_checkout(),
            Layer::AddProductForm => self.confirm_add_product(),
            Layer::ContactForm => self.submit_contact(),
            Layer::PickingText => {
                let field = TextField::ALL[self.text_index.min(TextField::ALL.len() - 1)];
                self.input_buffer = self.texts.get(field).to_string();
                self.mode = AppMode::EditingText(field);
            }
            Layer::EditingText => {
                if let AppMode::EditingText(field) = self.mode {
                    self.confirm_edit_text(field);
                }
            }
            Layer::Page | Layer::Cart | Layer::AdminPanel | Layer::ProductDetails => {}
        }
    }

    /// 关闭当前层
    pub fn cancel(&mut self, layer: Layer) {
        match layer {
            Layer::Cart => self.view.close_cart(),
            Layer::ProductDetails => self.view.close_product_details(),
            Layer::AdminPanel => self.view.close_admin_panel(),
            Layer::Checkout => self.view.close_checkout(),
            Layer::AddProductForm => self.view.close_add_product_form(),
            Layer::ContactForm | Layer::PickingText | Layer::EditingText => {
                self.mode = AppMode::Normal;
                self.input_buffer.clear();
            }
            Layer::Page => self.view.close_section(),
        }
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::models::Catalog;
    use crate::pdf::DEFAULT_PDF_ENDPOINT;
    use crate::ui::coordinator::{NavBarPolicy, ViewCoordinator};
    use crate::ui::handle_key_event;

    fn app() -> App {
        App::new(
            ViewCoordinator::new(NavBarPolicy::LastWriter),
            Catalog::seeded(),
            DEFAULT_PDF_ENDPOINT.to_string(),
        )
    }

    fn admin_app() -> App {
        let mut app = app();
        app.view.enter_admin("admin123");
        app
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn test_add_to_cart_from_products_section() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Products));
        app.dispatch(Action::AddToCart);
        app.dispatch(Action::AddToCart);
        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::AddToCart);

        assert_eq!(app.cart.item_count(), 3);
        assert_eq!(app.cart.total(), 80 * 2 + 150);
    }

    #[test]
    fn test_add_to_cart_needs_products_section() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Blog));
        app.dispatch(Action::AddToCart);
        assert!(app.cart.is_empty());
    }

    #[test]
    fn test_details_add_to_cart_closes_details() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Products));
        app.dispatch(Action::ShowDetails);
        assert_eq!(app.layer(), Layer::ProductDetails);
        assert!(!app.view.nav_bar_visible());

        app.dispatch(Action::AddToCart);
        assert_eq!(app.layer(), Layer::Page);
        assert!(app.view.nav_bar_visible());
        assert_eq!(app.cart.item_count(), 1);
    }

    #[test]
    fn test_cart_checkout_and_confirm() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Products));
        app.dispatch(Action::AddToCart);
        app.dispatch(Action::OpenCart);
        app.dispatch(Action::CheckoutCart);
        assert_eq!(app.layer(), Layer::Checkout);
        assert_eq!(app.amount_due(), "80 DH");

        // 缺少字段时留在结账页
        app.dispatch(Action::Submit);
        assert_eq!(app.layer(), Layer::Checkout);

        for value in ["Alaoui", "Sara", "0600000000", "Rabat"] {
            type_str(&mut app, value);
            app.dispatch(Action::NextField);
        }
        app.dispatch(Action::Submit);

        assert_eq!(app.layer(), Layer::Page);
        assert!(app.view.nav_bar_visible());
        // 没有后端，购物车保持不变
        assert_eq!(app.cart.item_count(), 1);
        assert!(app.message.as_deref().unwrap_or("").contains("80 DH"));
    }

    #[test]
    fn test_empty_cart_enter_browses_products() {
        let mut app = app();
        app.dispatch(Action::OpenCart);
        app.dispatch(Action::CheckoutCart);
        assert!(!app.view.cart_open());
        assert_eq!(app.view.active_section(), Some(SectionId::Products));
    }

    #[test]
    fn test_remove_selected_cart_line() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Products));
        app.dispatch(Action::AddToCart);
        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::AddToCart);
        app.dispatch(Action::OpenCart);
        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::RemoveFromCart);

        assert_eq!(app.cart.len(), 1);
        assert_eq!(app.cart.lines()[0].product.id, 1);
        assert_eq!(app.cart_index, 0);
    }

    #[test]
    fn test_download_sheet_message() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Products));
        app.dispatch(Action::DownloadSheet);
        let message = app.message.clone().unwrap_or_default();
        assert!(message.contains("Fruits & Légumes Bio"));
        assert!(message.contains("fruits-&-légumes-bio-fiche-produit.pdf"));
    }

    #[test]
    fn test_admin_adds_product() {
        let mut app = admin_app();
        app.dispatch(Action::OpenAddProduct);
        assert_eq!(app.layer(), Layer::AddProductForm);

        type_str(&mut app, "Safran");
        for _ in 0..3 {
            app.dispatch(Action::NextField);
        }
        type_str(&mut app, "300 DH");
        app.dispatch(Action::Submit);

        assert_eq!(app.layer(), Layer::Page);
        assert_eq!(app.catalog.len(), 4);
        let saffron = app.catalog.get(4).unwrap();
        assert_eq!(saffron.title, "Safran");
        assert_eq!(saffron.unit_price(), 300);
        assert_eq!(app.message.as_deref(), Some("Produit ajouté avec succès!"));
        assert_eq!(app.selected_product().map(|p| p.id), Some(4));
    }

    #[test]
    fn test_add_product_requires_admin() {
        let mut app = app();
        app.dispatch(Action::OpenAddProduct);
        assert_eq!(app.layer(), Layer::Page);
    }

    #[test]
    fn test_edit_hero_title() {
        let mut app = admin_app();
        app.dispatch(Action::StartEditText);
        assert_eq!(app.mode, AppMode::Normal);

        app.dispatch(Action::ToggleEditMode);
        app.dispatch(Action::StartEditText);
        assert_eq!(app.layer(), Layer::PickingText);
        app.dispatch(Action::Submit);
        assert_eq!(app.mode, AppMode::EditingText(TextField::HeroTitle));

        for _ in 0.."Washingtonia".len() {
            app.dispatch(Action::DeleteChar);
        }
        type_str(&mut app, "Washingtonia Agri");
        app.dispatch(Action::Submit);

        assert_eq!(app.texts.hero_title, "Washingtonia Agri");
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_logout_resets_admin_state() {
        let mut app = admin_app();
        app.dispatch(Action::ToggleEditMode);
        app.dispatch(Action::ToggleAdminPanel);
        assert_eq!(app.layer(), Layer::AdminPanel);

        app.dispatch(Action::Logout);
        assert!(!app.view.is_admin());
        assert!(!app.view.edit_mode());
        assert_eq!(app.layer(), Layer::Page);
    }

    #[test]
    fn test_contact_form_is_display_only() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Contact));
        app.dispatch(Action::StartContactForm);
        assert_eq!(app.layer(), Layer::ContactForm);

        for value in ["Karim", "k@example.ma", "Devis", "Bonjour"] {
            type_str(&mut app, value);
            app.dispatch(Action::NextField);
        }
        app.dispatch(Action::Submit);
        assert_eq!(app.layer(), Layer::Page);
        assert_eq!(app.contact_form.value(0), "Karim");
    }

    #[test]
    fn test_section_cycling() {
        let mut app = app();
        app.dispatch(Action::PrevSection);
        assert_eq!(app.view.active_section(), Some(SectionId::Partners));
        app.dispatch(Action::NextSection);
        assert_eq!(app.view.active_section(), Some(SectionId::About));
        app.dispatch(Action::CloseSection);
        assert_eq!(app.view.active_section(), None);
    }

    #[test]
    fn test_key_events_drive_overlays() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Char('3')).unwrap();
        handle_key_event(&mut app, KeyCode::Char('b')).unwrap();
        assert_eq!(app.layer(), Layer::Checkout);

        // 结账页中 'q' 只是输入
        let quit = handle_key_event(&mut app, KeyCode::Char('q')).unwrap();
        assert!(!quit);
        assert_eq!(app.checkout_form.value(0), "q");

        handle_key_event(&mut app, KeyCode::Esc).unwrap();
        assert_eq!(app.layer(), Layer::Page);
        assert!(app.view.nav_bar_visible());
        assert!(handle_key_event(&mut app, KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn test_browse_products_keeps_cart() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Products));
        app.dispatch(Action::AddToCart);
        app.dispatch(Action::SelectSection(SectionId::Blog));
        app.dispatch(Action::OpenCart);
        app.dispatch(Action::BrowseProducts);

        assert!(!app.view.cart_open());
        assert_eq!(app.view.active_section(), Some(SectionId::Products));
        assert_eq!(app.cart.item_count(), 1);
    }

    #[test]
    fn test_enter_opens_details_and_checkout() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Char('3')).unwrap();
        handle_key_event(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(app.layer(), Layer::ProductDetails);
        handle_key_event(&mut app, KeyCode::Char('a')).unwrap();

        handle_key_event(&mut app, KeyCode::Char('c')).unwrap();
        handle_key_event(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(app.layer(), Layer::Checkout);

        handle_key_event(&mut app, KeyCode::Esc).unwrap();
        handle_key_event(&mut app, KeyCode::Char('5')).unwrap();
        handle_key_event(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(app.layer(), Layer::ContactForm);
    }

    #[test]
    fn test_submit_ignored_outside_forms() {
        let mut app = app();
        app.dispatch(Action::SelectSection(SectionId::Products));
        app.dispatch(Action::Submit);
        assert_eq!(app.layer(), Layer::Page);
        app.dispatch(Action::OpenCart);
        app.dispatch(Action::Submit);
        assert_eq!(app.layer(), Layer::Cart);
    }
}
