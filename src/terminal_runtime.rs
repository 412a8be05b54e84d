use std::io;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::debug;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Theme;
use crate::game::GameState;
use crate::input::{GameInput, map_key};
use crate::renderer;

pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns raw mode, the alternate screen and keyboard input for one play
/// session.
///
/// Dropping it restores the terminal best-effort, whether the session ended
/// normally or is being unwound.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                debug!("terminal session entered");
                Ok(Self { terminal })
            }
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    pub fn draw(&mut self, state: &GameState, theme: &Theme) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, state, theme))?;
        Ok(())
    }

    /// Waits up to `timeout` for a key and maps it to a game input.
    ///
    /// Unbound keys and non-key events yield `None`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
        debug!("terminal session restored");
    }
}

/// Leaves raw mode and the alternate screen; safe to call more than once.
pub fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
