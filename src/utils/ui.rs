//! User interaction surface
//!
//! Commands report to the user through the [`Ui`] trait rather than
//! printing directly, so output can be captured or restyled.

use crossterm::style::{Color, Stylize};
use std::cell::RefCell;

/// Output channel for a command invocation
pub trait Ui {
    /// Plain output on stdout
    fn output(&self, message: &str);
    /// Informational message
    fn info(&self, message: &str);
    /// Warning on stderr
    fn warn(&self, message: &str);
    /// Error on stderr
    fn error(&self, message: &str);
}

/// Writes to the terminal, colouring stderr messages
#[derive(Debug, Clone, Default)]
pub struct ConsoleUi {
    no_color: bool,
}

impl ConsoleUi {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    fn paint(&self, message: &str, color: Color) -> String {
        if self.no_color {
            message.to_string()
        } else {
            message.with(color).to_string()
        }
    }
}

impl Ui for ConsoleUi {
    fn output(&self, message: &str) {
        println!("{}", message);
    }

    fn info(&self, message: &str) {
        println!("{}", self.paint(message, Color::Cyan));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", self.paint(message, Color::Yellow));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.paint(message, Color::Red));
    }
}

/// Collects messages in memory
#[derive(Debug, Default)]
pub struct BufferUi {
    lines: RefCell<Vec<String>>,
}

impl BufferUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, one entry per message
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    fn push(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

impl Ui for BufferUi {
    fn output(&self, message: &str) {
        self.push(message);
    }

    fn info(&self, message: &str) {
        self.push(message);
    }

    fn warn(&self, message: &str) {
        self.push(message);
    }

    fn error(&self, message: &str) {
        self.push(message);
    }
}
