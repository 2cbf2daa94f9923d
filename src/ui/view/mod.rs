//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件。动画在终端里只是静态的装饰符号。

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, Layer};
use crate::content;
use crate::models::{SectionId, TextField};
use components::{form_lines, render_dialog_framework, render_input_widget, stars};
use layouts::centered_rect;

fn section_color(section: SectionId) -> Color {
    match section {
        SectionId::About => Color::Green,
        SectionId::Services => Color::Yellow,
        SectionId::Products => Color::Red,
        SectionId::Blog => Color::Magenta,
        SectionId::Contact => Color::LightGreen,
        SectionId::Partners => Color::Cyan,
    }
}

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    if app.view.take_scroll_request() {
        app.content_scroll = 0;
    }

    let nav_height = if app.view.nav_bar_visible() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),          // 标题
            Constraint::Length(nav_height), // 导航栏
            Constraint::Min(8),             // 内容
            Constraint::Length(3),          // 帮助
        ])
        .split(frame.area());

    render_hero(frame, app, chunks[0]);
    if app.view.nav_bar_visible() {
        render_nav_bar(frame, app, chunks[1]);
    }
    render_content(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    // 渲染弹窗，自下而上
    if app.view.cart_open() {
        render_cart_dialog(frame, app);
    }
    if app.view.product_details_open() {
        render_details_dialog(frame, app);
    }
    if app.view.checkout_open() {
        render_checkout_dialog(frame, app);
    }
    if app.view.admin_panel_open() {
        render_admin_panel(frame, app);
    }
    if app.view.add_product_open() {
        render_add_product_dialog(frame, app);
    }
    match app.mode {
        AppMode::PickingText => render_pick_text_dialog(frame, app),
        AppMode::EditingText(field) => render_edit_text_dialog(frame, app, field),
        _ => {}
    }
}

fn render_hero(frame: &mut Frame, app: &App, area: Rect) {
    let mut badges = vec![Span::styled(
        format!("🛍 Panier ({})", app.cart.item_count()),
        Style::default().fg(Color::Red),
    )];
    if app.view.is_admin() {
        badges.push(Span::raw("  "));
        badges.push(Span::styled(
            "● Mode Admin",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        if app.view.edit_mode() {
            badges.push(Span::styled("  ✎ édition", Style::default().fg(Color::Yellow)));
        }
    }

    let mut title = vec![Span::styled(
        format!("🌿 {}   ", app.texts.hero_title),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];
    title.extend(badges);

    let lines = vec![
        Line::from(title),
        Line::from(app.texts.hero_subtitle.as_str()).style(Style::default().fg(Color::Gray)),
    ];

    let hero = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(hero, area);
}

fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (i, section) in SectionId::ALL.iter().enumerate() {
        let label = format!(" [{}] {} ", i + 1, section.title());
        let style = if app.view.active_section() == Some(*section) {
            Style::default()
                .fg(Color::Black)
                .bg(section_color(*section))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(section_color(*section))
        };
        spans.push(Span::styled(label, style));
    }

    let nav = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(nav, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let Some(section) = app.view.active_section() else {
        render_welcome(frame, app, area);
        return;
    };

    let block = Block::default()
        .title(format!("{} [Esc] fermer", section.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(section_color(section)));

    if section == SectionId::Products {
        render_products(frame, app, area, block);
        return;
    }

    let lines = match section {
        SectionId::About => about_lines(),
        SectionId::Services => services_lines(),
        SectionId::Blog => blog_lines(),
        SectionId::Contact => contact_lines(app),
        SectionId::Partners => partners_lines(),
        SectionId::Products => Vec::new(),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.content_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_welcome(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            app.texts.welcome_title.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(app.texts.welcome_text.clone()),
    ];
    let welcome = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(welcome, area);
}

fn heading(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn about_lines() -> Vec<Line<'static>> {
    let mut lines = vec![heading("Notre Histoire", Color::Green), Line::from("")];
    for paragraph in content::ABOUT {
        lines.push(Line::from(paragraph));
        lines.push(Line::from(""));
    }
    lines
}

fn services_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("🚜 ═══════════"),
        heading("Nos Services", Color::Yellow),
        Line::from(content::SERVICES_INTRO),
        Line::from(""),
    ];
    for service in &content::SERVICES {
        lines.push(heading(service.title, Color::Yellow));
        lines.push(Line::from(service.description));
        lines.push(Line::from(""));
    }
    lines
}

fn blog_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Notre Blog", Color::Magenta),
        Line::from(content::BLOG_INTRO),
        Line::from(""),
    ];
    for article in content::articles() {
        let date = article
            .published
            .map(content::format_date_fr)
            .unwrap_or_default();
        lines.push(heading(article.title, Color::Magenta));
        lines.push(Line::from(Span::styled(
            format!("{} · {}", article.category, date),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(article.excerpt));
        lines.push(Line::from(""));
    }
    lines
}

fn contact_lines(app: &App) -> Vec<Line<'static>> {
    let info = &content::CONTACT;
    let mut lines = vec![
        Line::from("✉ ═══════════"),
        heading("Contactez-nous", Color::LightGreen),
        Line::from(content::CONTACT_INTRO),
        Line::from(""),
        Line::from(format!("Adresse: {}", info.address)),
        Line::from(format!("Téléphone: {}", info.phone)),
        Line::from(format!("Email: {}", info.email)),
        Line::from(format!("Horaires: {}", info.hours)),
        Line::from(""),
        heading("Envoyez-nous un message", Color::LightGreen),
    ];
    lines.extend(form_lines(
        &app.contact_form,
        app.mode == AppMode::ContactForm,
        Color::LightGreen,
    ));
    lines
}

fn partners_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Nos Partenaires", Color::Cyan),
        Line::from(content::PARTNERS_INTRO),
        Line::from(""),
    ];
    for i in 1..=content::PARTNER_COUNT {
        lines.push(Line::from(format!("  ◆ Partenaire {}", i)));
    }
    lines
}

fn render_products(frame: &mut Frame, app: &App, area: Rect, block: Block) {
    let items: Vec<ListItem> = app
        .catalog
        .products()
        .iter()
        .map(|product| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        product.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(product.price.clone(), Style::default().fg(Color::Red)),
                    Span::raw("  "),
                    Span::styled(
                        stars(product.full_stars()),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", product.description),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("🛍 ");

    let mut state = ListState::default();
    if !app.catalog.is_empty() {
        state.select(Some(app.product_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.layer() {
        Layer::Page => match app.view.active_section() {
            Some(SectionId::Products) => {
                "[j/k] choisir  [Enter] détails  [a] panier  [b] acheter  [p] PDF  [c] mon panier  [1-6] rubriques  [q] quitter"
            }
            Some(SectionId::Contact) => {
                "[Enter] remplir le formulaire  [c] panier  [1-6] rubriques  [Esc] fermer  [q] quitter"
            }
            Some(_) => "[j/k] défiler  [h/l] rubrique  [c] panier  [Esc] fermer  [q] quitter",
            None => "[1-6] rubriques  [c] panier  [q] quitter",
        },
        Layer::Cart => "[j/k] choisir  [x] retirer  [Enter] commander  [p] produits  [Esc] fermer",
        Layer::ProductDetails => "[a] ajouter au panier  [b] acheter maintenant  [p] PDF  [Esc] retour",
        Layer::Checkout | Layer::ContactForm | Layer::AddProductForm => {
            "[Tab] champ suivant  [Enter] valider  [Esc] annuler"
        }
        Layer::AdminPanel => "[e] mode édition  [n] ajouter un produit  [l] déconnexion  [Esc] fermer",
        Layer::PickingText => "[j/k] choisir  [Enter] modifier  [Esc] annuler",
        Layer::EditingText => "[Enter] enregistrer  [Esc] annuler",
    };

    let admin_hint = if app.view.is_admin() && app.layer() == Layer::Page {
        "  [A] admin  [E] édition  [e] textes  [n] produit  [L] déconnexion"
    } else {
        ""
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        format!("{}{}", help_text, admin_hint)
    } else {
        format!("{}{}  |  {}", help_text, admin_hint, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_cart_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "🛍 Mon Panier", Color::Red);

    if app.cart.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("Votre panier est vide"),
            Line::from(""),
            Line::from("[Enter] Découvrir nos produits"),
        ])
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    let items: Vec<ListItem> = app
        .cart
        .lines()
        .iter()
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    line.product.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  Quantité: {}  ", line.quantity)),
                Span::styled(line.product.price.clone(), Style::default().fg(Color::Red)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(Some(app.cart_index));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let total = Paragraph::new(Line::from(vec![
        Span::styled("Total: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{} DH", app.cart.total()),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   [Enter] Passer la commande"),
    ]));
    frame.render_widget(total, chunks[1]);
}

fn render_details_dialog(frame: &mut Frame, app: &App) {
    let Some(product) = app.view.product_for_details() else {
        return;
    };
    let area = centered_rect(70, 70, frame.area());
    let inner = render_dialog_framework(frame, area, "← Retour", Color::Red);

    let lines = vec![
        heading(&product.title, Color::Red),
        Line::from(vec![
            Span::styled(stars(product.full_stars()), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" ({})", product.rating)),
        ]),
        Line::from(Span::styled(
            product.price.clone(),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Description", Color::Gray),
        Line::from(product.long_description.clone()),
        Line::from(""),
        heading("Origine", Color::Gray),
        Line::from(product.origin.clone()),
        heading("Certification", Color::Gray),
        Line::from(product.certification.clone()),
        Line::from(""),
        Line::from("[a] Ajouter au panier   [b] Acheter maintenant   [p] Télécharger la fiche produit (PDF)"),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_checkout_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "Formulaire de commande", Color::Green);

    let mut lines = Vec::new();
    if let Some(product) = app.view.selected_product() {
        lines.push(heading("Produit sélectionné:", Color::Gray));
        lines.push(Line::from(format!("{}  {}", product.title, product.price)));
        lines.push(Line::from(""));
    }
    lines.extend(form_lines(&app.checkout_form, true, Color::Green));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total à payer: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            app.amount_due(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from("[Enter] Confirmer la commande"));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_admin_panel(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 40, frame.area());
    let inner = render_dialog_framework(frame, area, "⚙ Panneau d'administration", Color::Green);

    let edit = if app.view.edit_mode() {
        "[e] Désactiver le mode édition"
    } else {
        "[e] Activer le mode édition"
    };
    let lines = vec![
        Line::from(edit),
        Line::from("[n] Ajouter un produit"),
        Line::from("[l] Déconnexion"),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} produits au catalogue", app.catalog.len()),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_add_product_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "Ajouter un nouveau produit", Color::Green);

    let mut lines = form_lines(&app.product_form, true, Color::Green);
    lines.push(Line::from(""));
    lines.push(Line::from("[Enter] Ajouter le produit"));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_pick_text_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 40, frame.area());
    let inner = render_dialog_framework(frame, area, "Modifier un texte", Color::Yellow);

    let items: Vec<ListItem> = TextField::ALL
        .iter()
        .map(|field| ListItem::new(field.label()))
        .collect();
    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::REVERSED),
    );
    let mut state = ListState::default();
    state.select(Some(app.text_index));
    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_edit_text_dialog(frame: &mut Frame, app: &App, field: TextField) {
    let area = centered_rect(70, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "Mode édition", Color::Yellow);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        field.label(),
        &app.input_buffer,
        true,
        Color::Yellow,
    );

    let hint = Paragraph::new("Enter pour enregistrer, Esc pour annuler")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(hint, chunks[1]);
}
