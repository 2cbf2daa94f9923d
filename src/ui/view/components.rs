//! 通用 UI 组件
//!
//! 对话框、输入框、表单等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::state::FormState;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    active_color: Color,
) {
    let style = if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let input = Paragraph::new(value)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 紧凑表单：每个字段一行，必填字段带 *
pub fn form_lines(form: &FormState, is_active: bool, active_color: Color) -> Vec<Line<'static>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = is_active && i == form.focus;
            let marker = if focused { "▸ " } else { "  " };
            let required = if field.required { "*" } else { "" };
            let cursor = if focused { "▏" } else { "" };

            let label_style = if focused {
                Style::default()
                    .fg(active_color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            Line::from(vec![
                Span::styled(format!("{}{}{}: ", marker, field.label, required), label_style),
                Span::raw(format!("{}{}", field.value, cursor)),
            ])
        })
        .collect()
}

/// [组件] 五星评分
pub fn stars(full: usize) -> String {
    let full = full.min(5);
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}
