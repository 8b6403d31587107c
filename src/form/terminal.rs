//! Console-backed [`Interaction`]: raw key reads, redraws and the final prompt.
//!
//! Everything is drawn on stderr so stdout only carries results.

use console::{Key, Term, measure_text_width};
use dialoguer::Confirm;
use tracing::debug;

use crate::error::FormError;
use crate::form::Interaction;
use crate::form::state::Event;

/// Interactive terminal session on stderr.
pub struct ConsoleInteraction {
    term: Term,
    drawn_lines: usize,
}

impl ConsoleInteraction {
    /// Prepare a session on stderr.
    ///
    /// Nothing touches the terminal until the first draw, read or prompt, so
    /// repository checks that run earlier report their own errors.
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            drawn_lines: 0,
        }
    }

    fn ensure_terminal(&self) -> Result<(), FormError> {
        if !self.term.is_term() {
            return Err(FormError::NotATerminal);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), FormError> {
        if self.drawn_lines > 0 {
            self.term.clear_last_lines(self.drawn_lines)?;
            self.drawn_lines = 0;
        }
        Ok(())
    }
}

impl Interaction for ConsoleInteraction {
    fn next_event(&mut self) -> Result<Event, FormError> {
        self.ensure_terminal()?;
        loop {
            let key = self.term.read_key_raw()?;
            if let Some(event) = map_key(key) {
                return Ok(event);
            }
        }
    }

    fn render(&mut self, view: &str) -> Result<(), FormError> {
        self.ensure_terminal()?;
        self.term.hide_cursor()?;
        self.clear()?;
        for line in view.lines() {
            self.term.write_line(line)?;
        }
        let (_, width) = self.term.size();
        self.drawn_lines = rows_for(view, usize::from(width));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), FormError> {
        self.clear()?;
        self.term.show_cursor()?;
        Ok(())
    }

    fn bell(&mut self) -> Result<(), FormError> {
        self.term.write_str("\u{7}")?;
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, FormError> {
        self.ensure_terminal()?;
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact_on_opt(&self.term);

        match answer {
            Ok(Some(confirmed)) => Ok(confirmed),
            Ok(None) => Ok(false),
            Err(err) => {
                let err = std::io::Error::from(err);
                if err.kind() == std::io::ErrorKind::Interrupted {
                    debug!("Confirmation interrupted");
                    Ok(false)
                } else {
                    Err(FormError::Terminal(err))
                }
            }
        }
    }
}

impl Default for ConsoleInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ConsoleInteraction {
    fn drop(&mut self) {
        let _ = self.term.show_cursor();
    }
}

/// Screen rows `view` occupies on a terminal `width` columns wide.
///
/// A line longer than the terminal wraps onto extra rows, and each of those
/// has to be cleared on the next redraw. Styling escapes take no columns.
fn rows_for(view: &str, width: usize) -> usize {
    view.lines()
        .map(|line| match width {
            0 => 1,
            width => measure_text_width(line).div_ceil(width).max(1),
        })
        .sum()
}

/// Translate a key press into a form event. Unknown keys are ignored.
fn map_key(key: Key) -> Option<Event> {
    match key {
        Key::Char(ch) => Some(Event::Char(ch)),
        Key::Backspace => Some(Event::Backspace),
        Key::Enter => Some(Event::Enter),
        Key::Tab => Some(Event::Tab),
        Key::BackTab => Some(Event::BackTab),
        Key::ArrowUp => Some(Event::Up),
        Key::ArrowDown => Some(Event::Down),
        Key::ArrowLeft => Some(Event::Left),
        Key::ArrowRight => Some(Event::Right),
        Key::Escape => Some(Event::Escape),
        Key::CtrlC => Some(Event::Interrupt),
        _ => None,
    }
}
