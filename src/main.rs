mod config;
mod content;
mod error;
mod location;
mod models;
mod pdf;
mod storage;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, data_dir, default_config_path, load_config};
use crate::models::Catalog;
use crate::storage::load_catalog;
use crate::ui::{App, ViewCoordinator, render};

/// Washingtonia 终端版商品目录
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 管理员口令
    #[arg(long)]
    admin_token: Option<String>,
    /// 页面地址，例如 "/?adminToken=..."
    #[arg(long)]
    location: Option<String>,
    /// 配置文件路径（默认 ~/.config/washingtonia/config.toml）
    #[arg(long)]
    config: Option<PathBuf>,
}

/// 日志写入 ~/.local/share/washingtonia/washingtonia.log，终端留给 TUI
fn init_logging(config: &Config) -> Result<PathBuf> {
    let log_path = data_dir()?.join("washingtonia.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("无法打开日志文件 {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(log_path)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = load_config(&config_path)?;
    let log_path = init_logging(&config)?;
    info!(config = %config_path.display(), log = %log_path.display(), "starting");

    // 商品目录：种子文件或内置示例
    let catalog = match &config.catalog {
        Some(path) => load_catalog(path)?,
        None => Catalog::seeded(),
    };

    let mut view = ViewCoordinator::new(config.nav_bar_policy);
    view.attach_scroll_container();
    if let Some(token) =
        location::admin_token(args.admin_token.as_deref(), args.location.as_deref())?
    {
        view.enter_admin(&token);
    }

    // 创建应用状态
    let mut app = App::new(view, catalog, config.pdf_endpoint.clone());

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // 会话状态只在内存中，退出即丢弃
    info!(
        cart_items = app.cart.item_count(),
        products = app.catalog.len(),
        "session ended"
    );

    result.context("终端事件循环出错")
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
