//! Interactive commit form: field constraints, the form state machine and
//! the terminal that drives it.

pub mod input;
pub mod state;
pub mod terminal;

use tracing::debug;

use crate::commit::ConventionalCommit;
use crate::error::FormError;

pub use input::{BODY_LIMIT, DESCRIPTION_LIMIT};
pub use state::{Command, Event, Field, Form, FormState};
pub use terminal::ConsoleInteraction;

/// Trait for the operator-facing side of a session.
///
/// This abstraction allows scripting the operator in tests.
pub trait Interaction {
    /// Block until the operator produces the next event.
    fn next_event(&mut self) -> Result<Event, FormError>;

    /// Replace whatever was last drawn with `view`.
    fn render(&mut self, view: &str) -> Result<(), FormError>;

    /// Clear the form once it is done.
    fn finish(&mut self) -> Result<(), FormError> {
        Ok(())
    }

    /// Signal a rejected keystroke.
    fn bell(&mut self) -> Result<(), FormError> {
        Ok(())
    }

    /// Ask a yes/cancel question. `false` means cancel.
    fn confirm(&mut self, prompt: &str) -> Result<bool, FormError>;
}

/// How a form run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Completed(ConventionalCommit),
    Cancelled,
}

/// Drive `form` with events from `io` until it quits.
pub fn run<I: Interaction + ?Sized>(form: &mut Form<'_>, io: &mut I) -> Result<FormOutcome, FormError> {
    io.render(&form.view())?;

    loop {
        let event = io.next_event()?;
        let commands = form.update(event);

        let mut quit = false;
        for command in commands {
            match command {
                Command::Quit => quit = true,
                Command::Bell => io.bell()?,
            }
        }

        if quit {
            break;
        }
        io.render(&form.view())?;
    }

    io.finish()?;
    debug!("Form finished in state {:?}", form.state());

    match form.state() {
        FormState::Completed => match form.take_commit() {
            Some(commit) => Ok(FormOutcome::Completed(commit)),
            None => Ok(FormOutcome::Cancelled),
        },
        _ => Ok(FormOutcome::Cancelled),
    }
}
