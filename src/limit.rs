use alloc::string::ToString;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::error::Error;

/// Which end of an interval a [`Limit`] bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Lower,
    Upper,
}

impl Side {
    /// The other end.
    pub fn opposite(self) -> Side {
        match self {
            Side::Lower => Side::Upper,
            Side::Upper => Side::Lower,
        }
    }
}

/// One endpoint of an [`Interval`](crate::Interval).
///
/// A finite limit carries a domain value, the side it bounds and whether
/// the value itself belongs to the interval (_closed_) or not (_open_).
/// The two infinite limits carry no value and are always open;
/// `NegInfinity` is the lower one and `PosInfinity` the upper one.
///
/// # Ordering
///
/// Limits order by their values. When two values are equal the kind of
/// limit breaks the tie:
///
/// ```text
/// upper open  <  closed (lower or upper)  <  lower open
///     5)             [5  ==  5]                  (5
/// ```
///
/// A closed lower and a closed upper limit at the same value are therefore
/// _equal_. `NegInfinity` is below and `PosInfinity` above every finite
/// limit.
///
/// Equality follows the ordering; it is not structural.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum Limit<T> {
    /// The lower infinite limit.
    NegInfinity,
    /// A limit at a domain value.
    Finite { side: Side, value: T, closed: bool },
    /// The upper infinite limit.
    PosInfinity,
}

impl<T> Limit<T> {
    /// Makes a finite limit.
    pub fn new(side: Side, value: T, closed: bool) -> Self {
        Limit::Finite {
            side,
            value,
            closed,
        }
    }

    /// Makes a finite lower limit.
    pub fn lower(value: T, closed: bool) -> Self {
        Limit::new(Side::Lower, value, closed)
    }

    /// Makes a finite upper limit.
    pub fn upper(value: T, closed: bool) -> Self {
        Limit::new(Side::Upper, value, closed)
    }

    pub fn lower_closed(value: T) -> Self {
        Limit::lower(value, true)
    }

    pub fn lower_open(value: T) -> Self {
        Limit::lower(value, false)
    }

    pub fn upper_closed(value: T) -> Self {
        Limit::upper(value, true)
    }

    pub fn upper_open(value: T) -> Self {
        Limit::upper(value, false)
    }

    /// The infinite limit bounding the given side.
    pub fn infinite(side: Side) -> Self {
        match side {
            Side::Lower => Limit::NegInfinity,
            Side::Upper => Limit::PosInfinity,
        }
    }

    pub fn lower_infinite() -> Self {
        Limit::NegInfinity
    }

    pub fn upper_infinite() -> Self {
        Limit::PosInfinity
    }

    pub fn side(&self) -> Side {
        match self {
            Limit::NegInfinity => Side::Lower,
            Limit::Finite { side, .. } => *side,
            Limit::PosInfinity => Side::Upper,
        }
    }

    pub fn is_lower(&self) -> bool {
        self.side() == Side::Lower
    }

    pub fn is_upper(&self) -> bool {
        self.side() == Side::Upper
    }

    /// Infinite limits are never closed.
    pub fn is_closed(&self) -> bool {
        match self {
            Limit::Finite { closed, .. } => *closed,
            _ => false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Limit::Finite { .. })
    }

    /// The limiting value, `None` for the infinite limits.
    pub fn value(&self) -> Option<&T> {
        match self {
            Limit::Finite { value, .. } => Some(value),
            _ => None,
        }
    }

    // Infinities sit outside every finite value.
    fn tier(&self) -> i8 {
        match self {
            Limit::NegInfinity => -1,
            Limit::Finite { .. } => 0,
            Limit::PosInfinity => 1,
        }
    }

    // Tie-break rank for limits sharing a value.
    fn ordinal(&self) -> i8 {
        match self {
            Limit::Finite { closed: true, .. } => 0,
            Limit::Finite {
                side: Side::Lower, ..
            } => 1,
            Limit::Finite {
                side: Side::Upper, ..
            } => -1,
            _ => 0,
        }
    }

    fn order_by<F>(&self, other: &Self, cmp_values: F) -> Option<Ordering>
    where
        F: FnOnce(&T, &T) -> Option<Ordering>,
    {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => match cmp_values(a, b)? {
                Ordering::Equal => Some(self.ordinal().cmp(&other.ordinal())),
                unequal => Some(unequal),
            },
            _ => Some(self.tier().cmp(&other.tier())),
        }
    }

    pub(crate) fn write_with<F>(&self, f: &mut fmt::Formatter<'_>, write_value: F) -> fmt::Result
    where
        F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        match self {
            Limit::NegInfinity => f.write_str("-inf"),
            Limit::PosInfinity => f.write_str("+inf"),
            Limit::Finite {
                side: Side::Lower,
                value,
                closed,
            } => {
                f.write_str(if *closed { "[" } else { "(" })?;
                write_value(value, f)
            }
            Limit::Finite {
                side: Side::Upper,
                value,
                closed,
            } => {
                write_value(value, f)?;
                f.write_str(if *closed { "]" } else { ")" })
            }
        }
    }
}

impl<T> Limit<T>
where
    T: PartialOrd,
{
    /// Returns `true` if `value` lies on the inside of this limit.
    ///
    /// For a lower limit that is `value >= limit` (closed) or
    /// `value > limit` (open), for an upper limit `value <= limit`
    /// or `value < limit`. Infinite limits observe every value.
    pub fn is_observed_by(&self, value: &T) -> bool {
        match self {
            Limit::NegInfinity | Limit::PosInfinity => true,
            Limit::Finite {
                side: Side::Lower,
                value: limit,
                closed: true,
            } => value >= limit,
            Limit::Finite {
                side: Side::Lower,
                value: limit,
                closed: false,
            } => value > limit,
            Limit::Finite {
                side: Side::Upper,
                value: limit,
                closed: true,
            } => value <= limit,
            Limit::Finite {
                side: Side::Upper,
                value: limit,
                closed: false,
            } => value < limit,
        }
    }

    /// Compares two limits, failing with [`Error::IncompatibleValues`]
    /// where their values are not ordered.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        self.partial_cmp(other).ok_or(Error::IncompatibleValues)
    }

    /// Compares this limit with a bare value, which ranks like a
    /// closed limit at that value.
    pub fn cmp_value(&self, value: &T) -> Option<Ordering> {
        match self {
            Limit::NegInfinity => Some(Ordering::Less),
            Limit::PosInfinity => Some(Ordering::Greater),
            Limit::Finite { value: limit, .. } => match limit.partial_cmp(value)? {
                Ordering::Equal => Some(self.ordinal().cmp(&0)),
                unequal => Some(unequal),
            },
        }
    }

    /// Checked version of [`cmp_value`](Limit::cmp_value).
    pub fn try_cmp_value(&self, value: &T) -> Result<Ordering, Error> {
        self.cmp_value(value).ok_or(Error::IncompatibleValues)
    }

    /// Returns `true` if `self < other` and no value lies between them,
    /// i.e. `other` is exactly the [adjacent limit](Limit::adjacent_limit)
    /// of `self`.
    pub fn is_lower_adjacent(&self, other: &Self) -> bool {
        self < other && self.complements(other)
    }

    /// Returns `true` if `self > other` and no value lies between them.
    pub fn is_upper_adjacent(&self, other: &Self) -> bool {
        self > other && self.complements(other)
    }

    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.is_lower_adjacent(other) || self.is_upper_adjacent(other)
    }

    // Same value, opposite side, opposite openness.
    fn complements(&self, other: &Self) -> bool {
        if self.side() == other.side() || self.is_closed() == other.is_closed() {
            return false;
        }
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> Limit<T>
where
    T: Clone,
{
    /// Returns the limit that touches this one from the other side:
    /// same value, flipped side, flipped openness.
    ///
    /// `[5` and `5)` are adjacent, as are `5]` and `(5`.
    /// Infinite limits have no adjacent limit.
    pub fn adjacent_limit(&self) -> Option<Self> {
        match self {
            Limit::Finite {
                side,
                value,
                closed,
            } => Some(Limit::new(side.opposite(), value.clone(), !closed)),
            _ => None,
        }
    }
}

impl<T> PartialEq for Limit<T>
where
    T: PartialOrd,
{
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<T> Eq for Limit<T> where T: Ord {}

impl<T> PartialOrd for Limit<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.order_by(other, |a, b| a.partial_cmp(b))
    }
}

impl<T> Ord for Limit<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // The value comparison never answers `None` here.
        self.order_by(other, |a, b| Some(a.cmp(b)))
            .unwrap_or(Ordering::Equal)
    }
}

impl<T> Hash for Limit<T>
where
    T: Hash,
{
    // Must agree with `Eq`: closed limits hash alike whatever their side.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tier().hash(state);
        if let Some(value) = self.value() {
            value.hash(state);
        }
        self.ordinal().hash(state);
    }
}

impl<T> fmt::Display for Limit<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, fmt::Display::fmt)
    }
}

impl<T> FromStr for Limit<T>
where
    T: FromStr,
{
    type Err = Error;

    /// Parses the form written by `Display`: `[v`, `(v`, `v]`, `v)`,
    /// `-inf` or `+inf`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |v: &str| {
            v.trim()
                .parse::<T>()
                .map_err(|_| Error::Parse(s.to_string()))
        };
        if s == "-inf" {
            Ok(Limit::NegInfinity)
        } else if s == "+inf" {
            Ok(Limit::PosInfinity)
        } else if let Some(v) = s.strip_prefix('[') {
            Ok(Limit::lower_closed(parse(v)?))
        } else if let Some(v) = s.strip_prefix('(') {
            Ok(Limit::lower_open(parse(v)?))
        } else if let Some(v) = s.strip_suffix(']') {
            Ok(Limit::upper_closed(parse(v)?))
        } else if let Some(v) = s.strip_suffix(')') {
            Ok(Limit::upper_open(parse(v)?))
        } else {
            Err(Error::Parse(s.to_string()))
        }
    }
}

/// Renders a limit or interval in canonical form with `Debug` values,
/// for error messages.
pub(crate) struct DebugForm<'a, X>(pub(crate) &'a X);

impl<'a, T> fmt::Display for DebugForm<'a, Limit<T>>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_with(f, fmt::Debug::fmt)
    }
}

#[cfg(feature = "quickcheck")]
impl quickcheck::Arbitrary for Side {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        if bool::arbitrary(g) {
            Side::Lower
        } else {
            Side::Upper
        }
    }
}

#[cfg(feature = "quickcheck")]
impl<T> quickcheck::Arbitrary for Limit<T>
where
    T: quickcheck::Arbitrary,
{
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        match u8::arbitrary(g) % 8 {
            0 => Limit::NegInfinity,
            7 => Limit::PosInfinity,
            _ => Limit::new(Side::arbitrary(g), T::arbitrary(g), bool::arbitrary(g)),
        }
    }
}
