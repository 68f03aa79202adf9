use alloc::string::String;
use thiserror::Error;

/// Errors raised while building or querying intervals, chains and mappings.
///
/// Every failure is reported at the point of detection; nothing is ever
/// left half-constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested interval can not exist, see [`InvalidInterval`]
    /// for the reason.
    #[error("invalid interval: {0}")]
    InvalidInterval(#[from] InvalidInterval),
    /// Two domain values were compared but are not ordered
    /// relative to each other.
    #[error("incompatible values: limits can not be ordered against each other")]
    IncompatibleValues,
    /// The given limits do not define any interval.
    #[error("given limits do not define any interval")]
    EmptyChain,
    /// No interval of a chain contains the value.
    #[error("{value} not in any interval of the chain")]
    NotFound { value: String },
    /// No interval of a mapping contains the value.
    #[error("{value} not in {span}")]
    NotCovered { value: String, span: String },
    /// No interval of a chain equals the given key.
    #[error("{key} not in the chain")]
    KeyNotFound { key: String },
    /// A mapping was given arguments of the wrong shape.
    #[error("malformed arguments: {0}")]
    MalformedArguments(&'static str),
    /// A limit or interval could not be parsed from its string form.
    #[error("can not parse {0:?}")]
    Parse(String),
}

/// Reason an interval could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidInterval {
    #[error("given lower limit is an upper limit")]
    LowerIsUpper,
    #[error("given upper limit is a lower limit")]
    UpperIsLower,
    #[error("given lower limit > given upper limit")]
    LowerExceedsUpper,
    #[error("intervals are disjoint, so intersection is not an interval")]
    Disjoint,
    #[error("intervals are disjoint and not adjacent, so union is not an interval")]
    NotJoinable,
    #[error("self is subset of other, so difference is empty")]
    EmptyDifference,
    #[error("other is subset of self, so difference is not an interval")]
    SplitDifference,
    #[error("limits must be given in ascending order")]
    NotAscending,
}
