use thiserror::Error;

/// Heap-internal misuse: a stale or wrong-kind handle reached the public
/// API boundary. These should not occur under correct evaluator use —
/// everyday lookups go through `debug_assert!`-guarded accessors instead
/// and only surface a `Result` here where a caller crosses the boundary
/// (e.g. a native function indexing a handle it did not allocate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GcError {
    #[error("handle does not refer to a live heap object")]
    HandleNotFound,

    #[error("handle refers to an object of the wrong kind")]
    TypeMismatch,
}

/// Error type returned by a host native callable ([`crate::NativeFn`]).
/// Kept separate from [`GcError`] — and from the evaluator's own error
/// taxonomy in `vela-eval`, which cannot be named here without a
/// dependency cycle — so natives can fail without either crate knowing
/// about the other's full error enum.
/// Result of a failed `Heap::assign`: either the name was never bound
/// anywhere in the chain, or it was bound `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignError {
    NotFound,
    Const,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NativeError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("{0}")]
    TypeError(String),
}
