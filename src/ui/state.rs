//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use super::coordinator::ViewCoordinator;
use crate::models::{Cart, Catalog, DraftField, EditableTexts, Product, ProductDraft, TextField};

/// 应用状态
pub struct App {
    pub view: ViewCoordinator,
    pub cart: Cart,
    pub catalog: Catalog,
    pub texts: EditableTexts,
    pub pdf_endpoint: String,
    pub mode: AppMode,
    pub product_index: usize, // 商品栏目中的选中项
    pub cart_index: usize,    // 购物车弹窗中的选中行
    pub text_index: usize,    // 选择要编辑的文本
    pub content_scroll: u16,
    pub input_buffer: String,
    pub checkout_form: FormState,
    pub contact_form: FormState,
    pub product_form: FormState,
    pub message: Option<String>,
}

/// 输入模式（弹窗由 ViewCoordinator 决定）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    PickingText,
    EditingText(TextField),
    ContactForm,
}

/// 当前接收按键的层，从最上层开始
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layer {
    PickingText,
    EditingText,
    AddProductForm,
    AdminPanel,
    Checkout,
    ProductDetails,
    Cart,
    ContactForm,
    Page,
}

/// 表单中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

/// 通用表单：字段列表和焦点
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

const CHECKOUT_FIELDS: [&str; 4] = [
    "Nom",
    "Prénom",
    "Numéro de téléphone",
    "Adresse de livraison",
];

const CONTACT_FIELDS: [&str; 4] = ["Nom", "Email", "Sujet", "Message"];

impl FormState {
    fn required(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|label| FormField {
                    label: *label,
                    value: String::new(),
                    required: true,
                })
                .collect(),
            focus: 0,
        }
    }

    pub fn checkout() -> Self {
        Self::required(&CHECKOUT_FIELDS)
    }

    pub fn contact() -> Self {
        Self::required(&CONTACT_FIELDS)
    }

    /// 添加商品表单，按默认草稿预填
    pub fn product(draft: &ProductDraft) -> Self {
        Self {
            fields: DraftField::ALL
                .iter()
                .map(|field| FormField {
                    label: field.label(),
                    value: draft.get(*field),
                    required: matches!(field, DraftField::Title | DraftField::Price),
                })
                .collect(),
            focus: 0,
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// 第一个未填写的必填字段
    pub fn first_missing(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.label)
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(view: ViewCoordinator, catalog: Catalog, pdf_endpoint: String) -> Self {
        Self {
            view,
            cart: Cart::new(),
            catalog,
            texts: EditableTexts::default(),
            pdf_endpoint,
            mode: AppMode::Normal,
            product_index: 0,
            cart_index: 0,
            text_index: 0,
            content_scroll: 0,
            input_buffer: String::new(),
            checkout_form: FormState::checkout(),
            contact_form: FormState::contact(),
            product_form: FormState::product(&ProductDraft::default()),
            message: None,
        }
    }

    /// 最上层的输入层
    pub fn layer(&self) -> Layer {
        match self.mode {
            AppMode::PickingText => return Layer::PickingText,
            AppMode::EditingText(_) => return Layer::EditingText,
            _ => {}
        }
        if self.view.add_product_open() {
            Layer::AddProductForm
        } else if self.view.admin_panel_open() {
            Layer::AdminPanel
        } else if self.view.checkout_open() {
            Layer::Checkout
        } else if self.view.product_details_open() && self.view.product_for_details().is_some() {
            Layer::ProductDetails
        } else if self.view.cart_open() {
            Layer::Cart
        } else if self.mode == AppMode::ContactForm {
            Layer::ContactForm
        } else {
            Layer::Page
        }
    }

    /// 商品栏目中当前选中的商品
    pub fn selected_product(&self) -> Option<&Product> {
        self.catalog.products().get(self.product_index)
    }

    /// 确保选中索引有效
    pub fn clamp_indices(&mut self) {
        let products = self.catalog.len();
        if products == 0 {
            self.product_index = 0;
        } else if self.product_index >= products {
            self.product_index = products - 1;
        }

        let lines = self.cart.len();
        if lines == 0 {
            self.cart_index = 0;
        } else if self.cart_index >= lines {
            self.cart_index = lines - 1;
        }
    }

    /// 结账时应付的金额：直接购买的商品价格，否则为购物车总价
    pub fn amount_due(&self) -> String {
        match self.view.selected_product() {
            Some(product) => product.price.clone(),
            None => format!("{} DH", self.cart.total()),
        }
    }
}
