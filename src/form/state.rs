//! The commit form as an explicit state machine.
//!
//! The form walks through two steps: type, scope and breaking flag first,
//! then description and body. Each input event goes through
//! [`Form::update`], which mutates the borrowed [`CommitIntent`] and returns
//! the commands the driver must carry out. No terminal is involved here, so
//! every transition can be exercised directly in tests.

use console::style;

use crate::commit::{CommitIntent, CommitType, ConventionalCommit};
use crate::error::ValidationError;
use crate::form::input::{
    BODY_LIMIT, DESCRIPTION_LIMIT, delete_char, insert_char, remaining_prompt, validate_body,
    validate_description,
};

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Type, scope and breaking change.
    AwaitingStep1,
    /// Description and body.
    AwaitingStep2,
    Completed,
    Cancelled,
}

impl FormState {
    /// Whether the form has finished, one way or the other.
    pub fn is_terminal(self) -> bool {
        matches!(self, FormState::Completed | FormState::Cancelled)
    }
}

/// The input fields, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Scope,
    Breaking,
    Description,
    Body,
}

impl Field {
    /// Next field within the same step.
    fn next(self) -> Option<Field> {
        match self {
            Field::Type => Some(Field::Scope),
            Field::Scope => Some(Field::Breaking),
            Field::Breaking => None,
            Field::Description => Some(Field::Body),
            Field::Body => None,
        }
    }

    /// Previous field, crossing back into step one from the description.
    fn prev(self) -> Option<Field> {
        match self {
            Field::Type => None,
            Field::Scope => Some(Field::Type),
            Field::Breaking => Some(Field::Scope),
            Field::Description => Some(Field::Breaking),
            Field::Body => Some(Field::Description),
        }
    }

    fn state(self) -> FormState {
        match self {
            Field::Type | Field::Scope | Field::Breaking => FormState::AwaitingStep1,
            Field::Description | Field::Body => FormState::AwaitingStep2,
        }
    }

    fn limit(self) -> Option<usize> {
        match self {
            Field::Description => Some(DESCRIPTION_LIMIT),
            Field::Body => Some(BODY_LIMIT),
            _ => None,
        }
    }
}

/// A single input event from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Char(char),
    Backspace,
    Enter,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Interrupt,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The form is finished; stop reading events.
    Quit,
    /// The last keystroke was rejected.
    Bell,
}

/// The interactive commit form.
pub struct Form<'a> {
    intent: &'a mut CommitIntent,
    state: FormState,
    focus: Field,
    type_cursor: usize,
    error: Option<ValidationError>,
    commit: Option<ConventionalCommit>,
}

impl<'a> Form<'a> {
    /// Start a form over `intent`, focused on the commit type.
    pub fn new(intent: &'a mut CommitIntent) -> Self {
        let type_cursor = intent
            .commit_type
            .and_then(|ty| CommitType::ALL.iter().position(|t| *t == ty))
            .unwrap_or(0);

        Self {
            intent,
            state: FormState::AwaitingStep1,
            focus: Field::Type,
            type_cursor,
            error: None,
            commit: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn intent(&self) -> &CommitIntent {
        self.intent
    }

    /// The type currently highlighted in the selector.
    pub fn hovered_type(&self) -> CommitType {
        CommitType::ALL[self.type_cursor]
    }

    /// The frozen commit, once the form has completed.
    pub fn take_commit(&mut self) -> Option<ConventionalCommit> {
        self.commit.take()
    }

    /// Apply one event and return the commands it produced.
    pub fn update(&mut self, event: Event) -> Vec<Command> {
        if self.state.is_terminal() {
            return Vec::new();
        }

        match event {
            Event::Escape | Event::Interrupt => {
                self.state = FormState::Cancelled;
                return vec![Command::Quit];
            }
            Event::BackTab => {
                if let Some(prev) = self.focus.prev() {
                    self.error = None;
                    self.move_to(prev);
                }
                return Vec::new();
            }
            _ => {}
        }

        match self.focus {
            Field::Type => self.update_type(event),
            Field::Breaking => self.update_breaking(event),
            Field::Scope | Field::Description | Field::Body => self.update_text(event),
        }
    }

    fn update_type(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Up | Event::Char('k') => {
                self.type_cursor = self.type_cursor.saturating_sub(1);
                Vec::new()
            }
            Event::Down | Event::Char('j') => {
                self.type_cursor = (self.type_cursor + 1).min(CommitType::ALL.len() - 1);
                Vec::new()
            }
            Event::Enter | Event::Tab => {
                self.intent.commit_type = Some(self.hovered_type());
                self.advance()
            }
            _ => Vec::new(),
        }
    }

    fn update_breaking(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Left | Event::Char('y') | Event::Char('Y') => {
                self.intent.breaking_change = true;
                Vec::new()
            }
            Event::Right | Event::Char('n') | Event::Char('N') => {
                self.intent.breaking_change = false;
                Vec::new()
            }
            Event::Char(' ') => {
                self.intent.breaking_change = !self.intent.breaking_change;
                Vec::new()
            }
            Event::Enter | Event::Tab => self.advance(),
            _ => Vec::new(),
        }
    }

    fn update_text(&mut self, event: Event) -> Vec<Command> {
        let field = self.focus;
        let multiline = field == Field::Body;

        let accepted = match event {
            Event::Char(ch) => insert_char(self.value_mut(field), ch, field.limit(), multiline),
            Event::Enter if multiline => insert_char(self.value_mut(field), '\n', field.limit(), true),
            Event::Backspace => delete_char(self.value_mut(field)),
            Event::Enter | Event::Tab => return self.advance(),
            _ => return Vec::new(),
        };

        if accepted {
            self.error = None;
            Vec::new()
        } else {
            vec![Command::Bell]
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Scope => &mut self.intent.scope,
            Field::Description => &mut self.intent.description,
            Field::Body => &mut self.intent.body,
            Field::Type | Field::Breaking => unreachable!("{field:?} is not a text field"),
        }
    }

    /// Leave the focused field, validating it first.
    fn advance(&mut self) -> Vec<Command> {
        let checked = match self.focus {
            Field::Description => validate_description(&self.intent.description),
            Field::Body => validate_body(&self.intent.body),
            _ => Ok(()),
        };
        if let Err(err) = checked {
            self.error = Some(err);
            return Vec::new();
        }

        self.error = None;
        match self.focus.next() {
            Some(next) => {
                self.focus = next;
                Vec::new()
            }
            None => self.confirm_step(),
        }
    }

    fn confirm_step(&mut self) -> Vec<Command> {
        match self.state {
            FormState::AwaitingStep1 => {
                if self.intent.commit_type.is_none() {
                    self.error = Some(ValidationError::MissingType);
                    self.move_to(Field::Type);
                    return Vec::new();
                }
                self.move_to(Field::Description);
                Vec::new()
            }
            FormState::AwaitingStep2 => match self.intent.freeze() {
                Ok(commit) => {
                    self.commit = Some(commit);
                    self.state = FormState::Completed;
                    vec![Command::Quit]
                }
                Err(err) => {
                    self.move_to(field_for(&err));
                    self.error = Some(err);
                    Vec::new()
                }
            },
            FormState::Completed | FormState::Cancelled => Vec::new(),
        }
    }

    fn move_to(&mut self, field: Field) {
        self.focus = field;
        self.state = field.state();
    }

    /// Render the active step as plain lines of text.
    pub fn view(&self) -> String {
        let fields: &[Field] = match self.state {
            FormState::AwaitingStep1 => &[Field::Type, Field::Scope, Field::Breaking],
            FormState::AwaitingStep2 => &[Field::Description, Field::Body],
            FormState::Completed | FormState::Cancelled => return String::new(),
        };

        let step = if self.state == FormState::AwaitingStep1 { 1 } else { 2 };
        let mut lines = vec![style(format!("Commit ({step}/2)")).bold().to_string(), String::new()];

        for &field in fields {
            self.render_field(field, &mut lines);
            lines.push(String::new());
        }

        let help = if self.focus == Field::Body {
            "enter newline • tab submit • shift+tab back • esc cancel"
        } else {
            "enter next • shift+tab back • esc cancel"
        };
        lines.push(style(help).dim().to_string());

        lines.join("\n")
    }

    fn render_field(&self, field: Field, lines: &mut Vec<String>) {
        let focused = field == self.focus;
        let gutter = if focused { "┃ " } else { "  " };
        let (title, prompt) = match field {
            Field::Type => ("Commit Type", "What type of commit is this?".to_string()),
            Field::Scope => ("Scope (optional)", "What is the commit affecting?".to_string()),
            Field::Breaking => (
                "Breaking Change?",
                "Does this commit introduce a breaking change?".to_string(),
            ),
            Field::Description => (
                "Short Description",
                remaining_prompt(
                    "What is the commit about at a high level?",
                    &self.intent.description,
                    DESCRIPTION_LIMIT,
                ),
            ),
            Field::Body => (
                "Body",
                remaining_prompt(
                    "What is the commit about in more detail?",
                    &self.intent.body,
                    BODY_LIMIT,
                ),
            ),
        };

        let title = if focused {
            style(title).cyan().bold().to_string()
        } else {
            title.to_string()
        };
        lines.push(format!("{gutter}{title}"));
        lines.push(format!("{gutter}{}", style(prompt).dim()));

        match field {
            Field::Type => {
                for (idx, ty) in CommitType::ALL.iter().enumerate() {
                    let marker = if idx == self.type_cursor { ">" } else { " " };
                    lines.push(format!("{gutter}{marker} {} - {}", ty, ty.description()));
                }
            }
            Field::Breaking => {
                let (yes, no) = if self.intent.breaking_change {
                    ("[Yes]", " No ")
                } else {
                    (" Yes ", "[No]")
                };
                lines.push(format!("{gutter}{yes}  {no}"));
            }
            Field::Scope => lines.push(format!("{gutter}> {}", self.intent.scope)),
            Field::Description => lines.push(format!("{gutter}> {}", self.intent.description)),
            Field::Body => {
                for line in self.intent.body.split('\n') {
                    lines.push(format!("{gutter}  {line}"));
                }
            }
        }

        if focused {
            if let Some(err) = &self.error {
                lines.push(format!("{gutter}{}", style(format!("* {err}")).red()));
            }
        }
    }
}

/// The field a validation failure belongs to.
fn field_for(err: &ValidationError) -> Field {
    match err {
        ValidationError::MissingType => Field::Type,
        ValidationError::EmptyDescription | ValidationError::ControlCharacter { .. } => {
            Field::Description
        }
        ValidationError::LimitExceeded { field: "body", .. } => Field::Body,
        ValidationError::LimitExceeded { .. } => Field::Description,
    }
}
