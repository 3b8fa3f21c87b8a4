//! Terminal session: raw mode and the alternate screen for as long as a
//! [`Tui`] is alive.

use color_eyre::eyre::Result;
use ratatui::{DefaultTerminal, Frame};

pub struct Tui {
    terminal: DefaultTerminal,
}

impl Tui {
    /// Enter raw mode and the alternate screen.
    ///
    /// `ratatui::try_init` chains a panic hook that restores the terminal
    /// before the previously installed hook runs, so call
    /// [`install_hooks`] first.
    pub fn enter() -> Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Leave the alternate screen. Safe to call more than once.
    pub fn exit(&mut self) {
        ratatui::restore();
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.exit();
    }
}

/// color-eyre report and panic hooks, without the env section.
pub fn install_hooks() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install()
}
