use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use storyreel_core::story::StoryDeck;
use storyreel_core::{AppConfig, StoryViewer};
use storyreel_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    load_theme,
    media::{spawn_image_load, ImageLoadResult},
    ui,
};

use crate::host::CliHost;

/// Where playback starts; `store` takes precedence over `collection`
pub struct StartAt<'a> {
    pub collection: usize,
    pub item: usize,
    pub store: Option<&'a str>,
}

pub async fn run(config: Arc<AppConfig>, deck_path: &Path, start: StartAt<'_>) -> Result<()> {
    let deck = StoryDeck::load(deck_path)
        .with_context(|| format!("Failed to load deck {}", deck_path.display()))?;
    let collection = match start.store {
        Some(store) => deck
            .position_of_store(store)
            .ok_or_else(|| anyhow!("Store '{}' not found in {}", store, deck_path.display()))?,
        None => start.collection,
    };
    let item = start.item;
    info!(
        deck = %deck_path.display(),
        stores = deck.len(),
        items = deck.item_count(),
        collection,
        item,
        "Opening story viewer"
    );

    let host = CliHost::for_deck(&deck);
    let viewer = StoryViewer::open(deck, collection, item, &config.playback, host, Instant::now());
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(viewer, config.clone(), theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("storyreel"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &config);

    // Restore terminal before reporting anything
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result?;

    for line in app.viewer.host().summary() {
        println!("{}", line);
    }
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<CliHost>,
    config: &AppConfig,
) -> Result<()> {
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();

    loop {
        let now = Instant::now();

        // Process any completed image loads (non-blocking)
        while let Ok(result) = img_rx.try_recv() {
            app.handle_image_result(result, now);
        }
        for request in app.media_requests(now) {
            spawn_image_load(request, img_tx.clone());
        }

        app.tick(now);
        if app.should_quit {
            break;
        }

        terminal.draw(|frame| ui::render(frame, app, now))?;

        if let Some(event) = event_handler.next(app.viewer.next_deadline())? {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app.keymap);
                    app.handle_action(action, now);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse, now),
                AppEvent::Resize(_, _) => app.handle_resize(now),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
