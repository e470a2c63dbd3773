use crate::animate::{Input, Screen};
use crate::canvas::Canvas;
use crate::error::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Full-screen terminal for interactive growth
pub struct Terminal {
    width: u16,
    height: u16,
}

impl Terminal {
    /// Enter the alternate screen in raw mode
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(Self { width, height })
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Draw every row of the canvas, blanks included
    pub fn draw(&self, canvas: &Canvas) -> io::Result<()> {
        let mut stdout = stdout();

        for (y, row) in canvas.rows().iter().enumerate().take(self.height as usize) {
            queue!(stdout, MoveTo(0, y as u16))?;

            for cell in row.iter().take(self.width as usize) {
                let Some(cell) = cell else {
                    queue!(stdout, Print(' '))?;
                    continue;
                };
                let style = cell.branch_type.style();
                if style.bold {
                    queue!(stdout, SetAttribute(Attribute::Bold))?;
                }
                queue!(stdout, SetForegroundColor(style.color), Print(cell.glyph), ResetColor)?;
                if style.bold {
                    queue!(stdout, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        stdout.flush()
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout: Duration) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(timeout)? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(Some((key_event.code, key_event.modifiers)));
                }
            }
        }
        Ok(None)
    }
}

/// Map a key to viewer input
pub fn classify_key(code: KeyCode, modifiers: KeyModifiers) -> Input {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Input::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
        _ => Input::Key,
    }
}

impl Screen for Terminal {
    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.draw(canvas)?;
        Ok(())
    }

    fn poll_input(&mut self, timeout: Duration) -> Result<Option<Input>> {
        Ok(self
            .wait_key(timeout)?
            .map(|(code, modifiers)| classify_key(code, modifiers)))
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
