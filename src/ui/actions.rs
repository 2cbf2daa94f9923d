//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use crate::models::SectionId;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 栏目导航
    SelectSection(SectionId),
    NextSection,
    PrevSection,
    CloseSection,

    // 商品与购物车
    OpenCart,
    AddToCart,
    RemoveFromCart,
    ShowDetails,
    BuyNow,
    DownloadSheet,
    CheckoutCart,
    BrowseProducts,

    // 管理员
    ToggleAdminPanel,
    ToggleEditMode,
    Logout,
    OpenAddProduct,
    StartEditText,

    // 表单/通用交互
    StartContactForm,
    NextField,
    PrevField,
    Cancel,      // Esc
    Submit,      // Enter
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
