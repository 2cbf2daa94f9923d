//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::io;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, Layer};
use crate::models::SectionId;

/// 根据当前输入层、所在栏目和按键获取对应的 Action
pub fn get_action(layer: Layer, section: Option<SectionId>, key: KeyCode) -> Option<Action> {
    match layer {
        Layer::Page => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                Some(Action::SelectSection(SectionId::ALL[idx]))
            }
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextSection),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevSection),
            KeyCode::Char('0') | KeyCode::Esc => Some(Action::CloseSection),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('c') => Some(Action::OpenCart),
            KeyCode::Char('a') => Some(Action::AddToCart),
            KeyCode::Char('b') => Some(Action::BuyNow),
            KeyCode::Char('p') => Some(Action::DownloadSheet),
            KeyCode::Enter => match section {
                Some(SectionId::Products) => Some(Action::ShowDetails),
                Some(SectionId::Contact) => Some(Action::StartContactForm),
                _ => None,
            },
            KeyCode::Char('A') => Some(Action::ToggleAdminPanel),
            KeyCode::Char('E') => Some(Action::ToggleEditMode),
            KeyCode::Char('e') => Some(Action::StartEditText),
            KeyCode::Char('n') => Some(Action::OpenAddProduct),
            KeyCode::Char('L') => Some(Action::Logout),
            _ => None,
        },
        Layer::Cart => match key {
            KeyCode::Esc | KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete => {
                Some(Action::RemoveFromCart)
            }
            KeyCode::Char('p') => Some(Action::BrowseProducts),
            KeyCode::Enter => Some(Action::CheckoutCart),
            _ => None,
        },
        Layer::ProductDetails => match key {
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Cancel),
            KeyCode::Char('a') => Some(Action::AddToCart),
            KeyCode::Char('b') => Some(Action::BuyNow),
            KeyCode::Char('p') => Some(Action::DownloadSheet),
            _ => None,
        },
        Layer::AdminPanel => match key {
            KeyCode::Esc | KeyCode::Char('A') => Some(Action::Cancel),
            KeyCode::Char('e') => Some(Action::ToggleEditMode),
            KeyCode::Char('n') => Some(Action::OpenAddProduct),
            KeyCode::Char('l') => Some(Action::Logout),
            _ => None,
        },
        Layer::PickingText => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            _ => None,
        },
        Layer::EditingText => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        Layer::Checkout | Layer::AddProductForm | Layer::ContactForm => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(app.layer(), app.view.active_section(), key) {
        Ok(app.dispatch(action))
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_select_sections() {
        assert_eq!(
            get_action(Layer::Page, None, KeyCode::Char('1')),
            Some(Action::SelectSection(SectionId::About))
        );
        assert_eq!(
            get_action(Layer::Page, None, KeyCode::Char('6')),
            Some(Action::SelectSection(SectionId::Partners))
        );
        assert_eq!(get_action(Layer::Page, None, KeyCode::Char('7')), None);
    }

    #[test]
    fn test_forms_capture_letters() {
        // 表单中 'q' 是输入而不是退出
        assert_eq!(
            get_action(Layer::Checkout, None, KeyCode::Char('q')),
            Some(Action::Input('q'))
        );
        assert_eq!(
            get_action(Layer::ContactForm, Some(SectionId::Contact), KeyCode::Tab),
            Some(Action::NextField)
        );
        assert_eq!(get_action(Layer::Page, None, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_overlays_ignore_section_keys() {
        assert_eq!(get_action(Layer::Cart, None, KeyCode::Char('3')), None);
        assert_eq!(get_action(Layer::ProductDetails, Some(SectionId::Products), KeyCode::Char('1')), None);
    }

    #[test]
    fn test_enter_depends_on_section() {
        assert_eq!(
            get_action(Layer::Page, Some(SectionId::Products), KeyCode::Enter),
            Some(Action::ShowDetails)
        );
        assert_eq!(
            get_action(Layer::Page, Some(SectionId::Contact), KeyCode::Enter),
            Some(Action::StartContactForm)
        );
        assert_eq!(get_action(Layer::Page, Some(SectionId::Blog), KeyCode::Enter), None);
        assert_eq!(get_action(Layer::Page, None, KeyCode::Enter), None);
    }

    #[test]
    fn test_cart_keys() {
        assert_eq!(
            get_action(Layer::Cart, None, KeyCode::Enter),
            Some(Action::CheckoutCart)
        );
        assert_eq!(
            get_action(Layer::Cart, None, KeyCode::Char('p')),
            Some(Action::BrowseProducts)
        );
    }
}
