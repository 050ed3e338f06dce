mod button;
mod entities;
mod error;
mod event;
mod game;
mod geometry;
mod paths;
mod scoreboard;
mod scores;
mod settings;
mod starfield;
mod stats;
mod ui;

use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{error, info, warn};

use event::{Event, EventHandler};
use game::AlienInvasion;
use settings::Settings;

const LOG_FILE: &str = "alien_invasion.log";

/// Send tracing output to a file; the terminal is busy drawing the game.
fn init_logging() {
    let path = paths::beside_executable(LOG_FILE);
    // Without a writable log file the game simply runs unlogged.
    if let Ok(file) = File::create(&path) {
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .init();
    }
}

fn screen_area() -> io::Result<Rect> {
    let (width, height) = terminal::size()?;
    Ok(Rect::new(0, 0, width, height))
}

fn main() -> io::Result<()> {
    init_logging();

    let mut settings = Settings::load();
    let (width, height) = ui::field_dots(screen_area()?);
    settings.set_screen_size(width, height);
    let tick_rate_ms = settings.tick_rate_ms;
    let key_hold = settings.key_hold();

    let scores_path = scores::scores_path();
    let high_score = scores::load_or_default(&scores_path);
    let mut game = AlienInvasion::new(settings, high_score, StdRng::from_entropy());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Key releases drive the ship's movement flags. Terminals without the
    // keyboard enhancement protocol get releases synthesised instead.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();
    info!(keyboard_enhanced, "Terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let release_after = (!keyboard_enhanced).then_some(key_hold);
    let event_handler = EventHandler::new(tick_rate_ms, release_after);
    let result = run(&mut terminal, &mut game, &event_handler);
    if let Err(e) = scores::save(&scores_path, game.stats.high_score) {
        warn!("Could not save high score: {}", e);
    }

    // Restore terminal
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut AlienInvasion,
    events: &EventHandler,
) -> io::Result<()> {
    let mut area = screen_area()?;
    let mut pointer_captured = true;

    loop {
        match events.next()? {
            Event::Tick => {
                game.on_tick();
                terminal.draw(|frame| ui::render(frame, game))?;
            }
            Event::Key(key) => game.on_key(key),
            Event::Mouse(mouse) => game.on_mouse(mouse, ui::field_area(area)),
            Event::Resize(width, height) => {
                area = Rect::new(0, 0, width, height);
                let (w, h) = ui::field_dots(area);
                game.resize(w, h);
            }
        }

        if game.should_quit {
            info!(high_score = game.stats.high_score, "Quitting");
            return Ok(());
        }

        // The pointer is only needed for the Play button.
        if game.pointer_visible() != pointer_captured {
            pointer_captured = game.pointer_visible();
            if pointer_captured {
                execute!(terminal.backend_mut(), EnableMouseCapture)?;
            } else {
                execute!(terminal.backend_mut(), DisableMouseCapture)?;
            }
        }
    }
}
