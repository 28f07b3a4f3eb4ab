use thiserror::Error;
use vela_gc::{AssignError, NativeError};
use vela_util::Span;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("{name} is not defined")]
    UndefinedVariable { name: String, span: Span },

    #[error("value is not callable")]
    NotCallable { span: Span },

    #[error("value is not an object")]
    NotAnObject { span: Span },

    #[error("value is not an array")]
    NotAnArray { span: Span },

    #[error("index out of bounds")]
    IndexOutOfBounds { span: Span },

    #[error("too many arguments")]
    TooManyArguments { span: Span },

    #[error("value is not a string")]
    NotAString { span: Span },

    #[error("{message}")]
    TypeError { message: String, span: Span },

    #[error("{message}")]
    InvalidArgument { message: String, span: Span },

    #[error("not implemented: {message}")]
    NotImplemented { message: String, span: Span },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::UndefinedVariable { span, .. }
            | EvalError::NotCallable { span }
            | EvalError::NotAnObject { span }
            | EvalError::NotAnArray { span }
            | EvalError::IndexOutOfBounds { span }
            | EvalError::TooManyArguments { span }
            | EvalError::NotAString { span }
            | EvalError::TypeError { span, .. }
            | EvalError::InvalidArgument { span, .. }
            | EvalError::NotImplemented { span, .. } => *span,
        }
    }

    /// Maps a heap-level assignment failure to its user-facing error:
    /// an unbound name is `UndefinedVariable`, a `const` target is
    /// `TypeError` (matching the message Node/V8 raise for the same
    /// mistake, which the scenario-style tests check verbatim).
    pub fn from_assign(err: AssignError, name: &str, span: Span) -> Self {
        match err {
            AssignError::NotFound => EvalError::UndefinedVariable {
                name: name.to_string(),
                span,
            },
            AssignError::Const => EvalError::TypeError {
                message: "Assignment to constant variable.".to_string(),
                span,
            },
        }
    }

    pub fn from_native(err: NativeError, span: Span) -> Self {
        match err {
            NativeError::InvalidArgument(message) => EvalError::InvalidArgument { message, span },
            NativeError::NotImplemented(message) => EvalError::NotImplemented { message, span },
            NativeError::TypeError(message) => EvalError::TypeError { message, span },
        }
    }
}

pub type EvalResult<T> = std::result::Result<T, EvalError>;
