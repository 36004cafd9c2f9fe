//! Source code representation and error management.

use std::{cell::RefCell, fmt};

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            errors: ErrorReporter::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// The phase that detected an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized character, unterminated string or unterminated comment.
    Lexical,
    /// A token appeared where the grammar required something else.
    Syntax,
}

/// Represents a compile time error attached to a source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub line: usize,
    /// Where on the line the error happened, e.g. ` at end` or ` at ')'`.
    /// `None` for lexical errors.
    pub location: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// Create a new lexical error reported on `line`.
    pub fn lexical(line: usize, message: impl ToString) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            line,
            location: None,
            message: message.to_string(),
        }
    }

    /// Create a new syntax error reported on `line` at `location`.
    pub fn syntax(line: usize, location: impl ToString, message: impl ToString) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            line,
            location: Some(location.to_string()),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {line}] Error{location}: {message}",
            line = self.line,
            location = self.location.as_deref().unwrap_or(""),
            message = self.message
        )
    }
}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<Diagnostic>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add_error(&self, error: Diagnostic) {
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    /// Returns the number of accumulated errors.
    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    /// Returns `true` if no error has been added.
    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// Returns a copy of the accumulated errors in the order they were reported.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.borrow().clone()
    }

    /// Returns the number of accumulated errors of the specified `kind`.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors
            .borrow()
            .iter()
            .filter(|error| error.kind == kind)
            .count()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(f, "{}", error)?;
        }

        Ok(())
    }
}
