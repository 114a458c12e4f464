mod app;
mod config;
mod core;
mod logging;
mod models;
mod system;
mod ui;
mod utils;

use anyhow::{Context, Result};
use app::App;
use config::Config;
use crate::core::actions::Keymap;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::panic;
use system::FileSystem;
use tracing::{error, info, warn};
use ui::TerminalPrompt;

fn main() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    if let Err(e) = logging::init(&config.log_file()) {
        eprintln!("twinpane: logging disabled: {:#}", e);
    }
    if let Some(e) = config_error {
        warn!(error = %e, "invalid configuration, using defaults");
    }

    let keymap = config.keymap().unwrap_or_else(|e| {
        warn!(error = %e, "invalid key overrides, using default keymap");
        Keymap::default()
    });
    let mut app = App::new(FileSystem::new(), config.left_root(), config.right_root(), keymap);

    setup_panic_hook();
    let mut terminal = setup_terminal().context("failed to initialize terminal")?;

    let res = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal).context("failed to restore terminal")?;

    if let Err(err) = res {
        error!(error = %err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }
    info!("exit");

    Ok(())
}

/// 패닉 시에도 터미널 복구
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        // 모달 프롬프트의 배경으로 쓸 마지막 화면
        let backdrop = terminal.draw(|f| app.draw(f))?.buffer.clone();

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let mut prompt = TerminalPrompt::new(terminal, backdrop, app.theme().clone());
                app.handle_key(key.modifiers, key.code, &mut prompt);
            }
            Event::Mouse(mouse) => {
                let mut prompt = TerminalPrompt::new(terminal, backdrop, app.theme().clone());
                app.handle_mouse(mouse, &mut prompt);
            }
            _ => {}
        }
    }

    Ok(())
}
