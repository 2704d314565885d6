pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::Address;
use crate::navigation::{Navigation, Route};

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>, route: Route) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config, route).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    ctx: Arc<AppContext>,
    config: Arc<Config>,
    route: Route,
) -> Result<()> {
    let mut tui_app = TuiApp::new(
        Navigation::with_route(route),
        ctx.reading.tajweed,
        ctx.reading.show_by_words,
    );
    tui_app.word_language = ctx.reading.word_language.clone();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    match ctx.client.chapters(&ctx.reading.word_language).await {
        Ok(chapters) => tui_app.set_chapters(chapters),
        Err(e) => tui_app.set_status(format!("Failed to load chapters: {}", e)),
    }
    if let Some(address) = route.address() {
        load_verses(terminal, &mut tui_app, &ctx, &config, address, 1).await?;
    }

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        let key = match event_handler.next()? {
            AppEvent::Key(key) => key,
            AppEvent::Tick => continue,
        };

        if tui_app.editing_filter {
            match key.code {
                KeyCode::Char(c) => tui_app.push_filter_char(c),
                KeyCode::Backspace => tui_app.pop_filter_char(),
                KeyCode::Enter | KeyCode::Esc => tui_app.finish_filter(),
                _ => {}
            }
            continue;
        }

        tui_app.clear_status();
        match config.keybindings.get_action(&key) {
            Action::Quit => {
                tui_app.should_quit = true;
            }
            Action::MoveUp => {
                tui_app.move_up();
            }
            Action::MoveDown => {
                tui_app.move_down();
            }
            Action::NextPage => match tui_app.active_pane {
                ActivePane::Navigation => tui_app.next_page(),
                ActivePane::Verses => {
                    if let Some((address, page)) = tui_app.next_verse_page() {
                        load_verses(terminal, &mut tui_app, &ctx, &config, address, page).await?;
                    }
                }
            },
            Action::PrevPage => match tui_app.active_pane {
                ActivePane::Navigation => tui_app.prev_page(),
                ActivePane::Verses => {
                    if let Some((address, page)) = tui_app.prev_verse_page() {
                        load_verses(terminal, &mut tui_app, &ctx, &config, address, page).await?;
                    }
                }
            },
            Action::NextPane => {
                tui_app.active_pane = tui_app.active_pane.next();
            }
            Action::PrevPane => {
                tui_app.active_pane = tui_app.active_pane.prev();
            }
            Action::NextMode => {
                tui_app.next_mode();
            }
            Action::PrevMode => {
                tui_app.prev_mode();
            }
            Action::Select => {
                if tui_app.active_pane == ActivePane::Navigation {
                    if let Some(address) = tui_app.selected_address() {
                        tui_app.navigate(address);
                        load_verses(terminal, &mut tui_app, &ctx, &config, address, 1).await?;
                        tui_app.active_pane = ActivePane::Verses;
                    }
                }
            }
            Action::Filter => {
                tui_app.start_filter();
            }
            Action::ToggleTajweed => {
                tui_app.toggle_tajweed();
            }
            Action::ToggleWords => {
                tui_app.toggle_words();
            }
            Action::OpenInBrowser => {
                if let Some(url) = tui_app.web_url() {
                    if let Err(e) = open::that(&url) {
                        tui_app.set_status(format!("Failed to open browser: {}", e));
                    }
                }
            }
            Action::None => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Fetch one page of verses. Upstream failures land in the status bar; only
/// terminal errors abort the loop.
async fn load_verses(
    terminal: &mut Tui,
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    config: &Config,
    address: Address,
    page: u32,
) -> Result<()> {
    tui_app.is_loading = true;
    terminal.draw(|frame| layout::render(frame, tui_app, &config.colors))?;

    let query = ctx.verse_query().page(page);
    let result = ctx.client.verses(address, &query).await;
    tui_app.is_loading = false;

    match result {
        Ok(verse_page) => {
            tracing::debug!("Loaded {} page {}", address, verse_page.page);
            tui_app.set_verses(address, verse_page);
        }
        Err(e) => {
            tracing::warn!("Loading {} page {} failed: {}", address, page, e);
            tui_app.set_status(format!("Failed to load {}: {}", address, e));
        }
    }

    Ok(())
}
