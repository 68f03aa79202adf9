use alloc::string::ToString;
use core::cmp::Ordering;
#[cfg(feature = "serde1")]
use core::convert::TryFrom;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{BitAnd, BitOr, Sub};
use core::str::FromStr;

use crate::error::{Error, InvalidInterval};
use crate::limit::{DebugForm, Limit};

/// A contiguous subset of an ordered domain, given by a lower and an
/// upper [`Limit`].
///
/// If both limits are finite the interval is _bounded_ (or _finite_),
/// otherwise it is _unbounded_ (or _infinite_) on the side whose limit is
/// infinite. "Left" and "right" are accepted as synonyms of "lower" and
/// "upper" throughout.
///
/// Intervals are never empty: construction fails if the lower limit
/// exceeds the upper one, so `[5 .. 5]` is valid but `[5 .. 5)` is not.
/// Once built an interval never changes; the set operations produce
/// new intervals.
///
/// Intervals order lexicographically by `(lower_limit, upper_limit)`.
///
/// ```
/// use interval_mapping::{Interval, Limit};
///
/// let ival = Interval::new(Limit::lower_closed(0), Limit::upper_open(27)).unwrap();
/// assert_eq!(ival.to_string(), "[0 .. 27)");
/// assert!(ival.contains(&0));
/// assert!(!ival.contains(&27));
///
/// let tail = Interval::lower_open(100);
/// let head = Interval::upper_closed(100);
/// assert!(head.is_adjacent(&tail));
/// assert_eq!((&head | &tail).unwrap(), Interval::unbounded());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde1",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "IntervalParts<T>",
        bound(deserialize = "T: serde::Deserialize<'de> + PartialOrd")
    )
)]
pub struct Interval<T> {
    lower_limit: Limit<T>,
    upper_limit: Limit<T>,
}

impl<T> Interval<T> {
    // Callers guarantee the limits are ordered and on the right sides.
    pub(crate) fn from_limits(lower_limit: Limit<T>, upper_limit: Limit<T>) -> Self {
        Interval {
            lower_limit,
            upper_limit,
        }
    }

    /// The interval covering the whole domain, `-inf .. +inf`.
    pub fn unbounded() -> Self {
        Interval::from_limits(Limit::NegInfinity, Limit::PosInfinity)
    }

    /// `[lower .. +inf`
    pub fn lower_closed(lower: T) -> Self {
        Interval::from_limits(Limit::lower_closed(lower), Limit::PosInfinity)
    }

    /// `(lower .. +inf`
    pub fn lower_open(lower: T) -> Self {
        Interval::from_limits(Limit::lower_open(lower), Limit::PosInfinity)
    }

    /// `-inf .. upper]`
    pub fn upper_closed(upper: T) -> Self {
        Interval::from_limits(Limit::NegInfinity, Limit::upper_closed(upper))
    }

    /// `-inf .. upper)`
    pub fn upper_open(upper: T) -> Self {
        Interval::from_limits(Limit::NegInfinity, Limit::upper_open(upper))
    }

    pub fn lower_limit(&self) -> &Limit<T> {
        &self.lower_limit
    }

    pub fn upper_limit(&self) -> &Limit<T> {
        &self.upper_limit
    }

    /// Lower and upper limit as a pair.
    pub fn limits(&self) -> (&Limit<T>, &Limit<T>) {
        (&self.lower_limit, &self.upper_limit)
    }

    pub fn into_limits(self) -> (Limit<T>, Limit<T>) {
        (self.lower_limit, self.upper_limit)
    }

    pub fn is_lower_bounded(&self) -> bool {
        self.lower_limit.is_finite()
    }

    pub fn is_left_bounded(&self) -> bool {
        self.is_lower_bounded()
    }

    pub fn is_upper_bounded(&self) -> bool {
        self.upper_limit.is_finite()
    }

    pub fn is_right_bounded(&self) -> bool {
        self.is_upper_bounded()
    }

    /// Both limits are finite.
    pub fn is_bounded(&self) -> bool {
        self.is_lower_bounded() && self.is_upper_bounded()
    }

    pub fn is_finite(&self) -> bool {
        self.is_bounded()
    }

    pub fn is_lower_unbounded(&self) -> bool {
        !self.is_lower_bounded()
    }

    pub fn is_left_unbounded(&self) -> bool {
        self.is_lower_unbounded()
    }

    pub fn is_upper_unbounded(&self) -> bool {
        !self.is_upper_bounded()
    }

    pub fn is_right_unbounded(&self) -> bool {
        self.is_upper_unbounded()
    }

    /// At least one limit is infinite.
    pub fn is_unbounded(&self) -> bool {
        self.is_lower_unbounded() || self.is_upper_unbounded()
    }

    pub fn is_infinite(&self) -> bool {
        self.is_unbounded()
    }

    pub fn is_lower_closed(&self) -> bool {
        self.lower_limit.is_closed()
    }

    pub fn is_left_closed(&self) -> bool {
        self.is_lower_closed()
    }

    pub fn is_upper_closed(&self) -> bool {
        self.upper_limit.is_closed()
    }

    pub fn is_right_closed(&self) -> bool {
        self.is_upper_closed()
    }

    /// Both limits are closed.
    pub fn is_closed(&self) -> bool {
        self.is_lower_closed() && self.is_upper_closed()
    }

    pub fn is_lower_open(&self) -> bool {
        self.lower_limit.is_open()
    }

    pub fn is_left_open(&self) -> bool {
        self.is_lower_open()
    }

    pub fn is_upper_open(&self) -> bool {
        self.upper_limit.is_open()
    }

    pub fn is_right_open(&self) -> bool {
        self.is_upper_open()
    }

    /// At least one limit is open.
    pub fn is_open(&self) -> bool {
        self.is_lower_open() || self.is_upper_open()
    }
}

impl<T> Interval<T>
where
    T: PartialOrd,
{
    /// Makes an interval from two limits.
    ///
    /// Pass [`Limit::NegInfinity`] / [`Limit::PosInfinity`] for a side
    /// without a bound.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInterval`] if `lower_limit` is an upper limit,
    /// `upper_limit` is a lower limit, or `lower_limit > upper_limit`.
    /// [`Error::IncompatibleValues`] if the two values are not ordered.
    pub fn new(lower_limit: Limit<T>, upper_limit: Limit<T>) -> Result<Self, Error> {
        if lower_limit.is_upper() {
            return Err(InvalidInterval::LowerIsUpper.into());
        }
        if upper_limit.is_lower() {
            return Err(InvalidInterval::UpperIsLower.into());
        }
        if lower_limit.try_cmp(&upper_limit)? == Ordering::Greater {
            return Err(InvalidInterval::LowerExceedsUpper.into());
        }
        Ok(Interval::from_limits(lower_limit, upper_limit))
    }

    /// `[lower .. upper]`
    pub fn closed(lower: T, upper: T) -> Result<Self, Error> {
        Interval::new(Limit::lower_closed(lower), Limit::upper_closed(upper))
    }

    /// `(lower .. upper)`
    pub fn open(lower: T, upper: T) -> Result<Self, Error> {
        Interval::new(Limit::lower_open(lower), Limit::upper_open(upper))
    }

    /// Same as [`open`](Interval::open).
    pub fn open_finite(lower: T, upper: T) -> Result<Self, Error> {
        Interval::open(lower, upper)
    }

    /// An interval with one closed and one open end, so that intervals
    /// built from consecutive values with the same `lower_closed` chain
    /// up without gaps: `[lower .. upper)` if `lower_closed`, else
    /// `(lower .. upper]`.
    pub fn chainable(lower: T, upper: T, lower_closed: bool) -> Result<Self, Error> {
        Interval::new(
            Limit::lower(lower, lower_closed),
            Limit::upper(upper, !lower_closed),
        )
    }

    /// Returns `true` if `value` lies within both limits.
    pub fn contains(&self, value: &T) -> bool {
        self.lower_limit.is_observed_by(value) && self.upper_limit.is_observed_by(value)
    }

    /// Returns `true` if `self` is a _proper_ subset of `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.lower_limit >= other.lower_limit
            && self.upper_limit <= other.upper_limit
            && self != other
    }

    /// Returns `true` if `self` and `other` have no element in common.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.lower_limit > other.upper_limit || self.upper_limit < other.lower_limit
    }

    /// Returns `true` if `self` and `other` have an element in common.
    pub fn is_overlapping(&self, other: &Self) -> bool {
        !self.is_disjoint(other)
    }

    /// Returns `true` if `other` starts right where `self` ends.
    pub fn is_lower_adjacent(&self, other: &Self) -> bool {
        self.upper_limit.is_lower_adjacent(&other.lower_limit)
    }

    /// Returns `true` if `other` ends right where `self` starts.
    pub fn is_upper_adjacent(&self, other: &Self) -> bool {
        self.lower_limit.is_upper_adjacent(&other.upper_limit)
    }

    /// Returns `true` if the two intervals touch without a gap
    /// and without overlapping.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.is_lower_adjacent(other) || self.is_upper_adjacent(other)
    }

    fn try_is_disjoint(&self, other: &Self) -> Result<bool, Error> {
        Ok(self.lower_limit.try_cmp(&other.upper_limit)? == Ordering::Greater
            || self.upper_limit.try_cmp(&other.lower_limit)? == Ordering::Less)
    }
}

impl<T> Interval<T>
where
    T: PartialOrd + Clone,
{
    /// The elements common to `self` and `other`.
    ///
    /// # Errors
    ///
    /// [`InvalidInterval::Disjoint`] if there are none.
    pub fn intersection(&self, other: &Self) -> Result<Self, Error> {
        if self.try_is_disjoint(other)? {
            return Err(InvalidInterval::Disjoint.into());
        }
        let lower_limit = max_limit(&self.lower_limit, &other.lower_limit)?;
        let upper_limit = min_limit(&self.upper_limit, &other.upper_limit)?;
        Interval::new(lower_limit.clone(), upper_limit.clone())
    }

    /// The elements of `self` and `other` together.
    ///
    /// # Errors
    ///
    /// [`InvalidInterval::NotJoinable`] unless the intervals overlap or
    /// are adjacent.
    pub fn union(&self, other: &Self) -> Result<Self, Error> {
        if self.try_is_disjoint(other)? && !self.is_adjacent(other) {
            return Err(InvalidInterval::NotJoinable.into());
        }
        let lower_limit = min_limit(&self.lower_limit, &other.lower_limit)?;
        let upper_limit = max_limit(&self.upper_limit, &other.upper_limit)?;
        Interval::new(lower_limit.clone(), upper_limit.clone())
    }

    /// The elements of `self` that are not in `other`.
    ///
    /// # Errors
    ///
    /// [`InvalidInterval::EmptyDifference`] if `self` lies within `other`,
    /// [`InvalidInterval::SplitDifference`] if `other` lies strictly
    /// inside `self` (the rest would be two pieces).
    pub fn difference(&self, other: &Self) -> Result<Self, Error> {
        use Ordering::*;

        let lower = self.lower_limit.try_cmp(&other.lower_limit)?;
        let upper = self.upper_limit.try_cmp(&other.upper_limit)?;
        match (lower, upper) {
            (Greater | Equal, Less | Equal) => Err(InvalidInterval::EmptyDifference.into()),
            (Less, Greater) => Err(InvalidInterval::SplitDifference.into()),
            // `other` ends inside or below `self`: keep what lies above it.
            (Greater | Equal, Greater) => {
                // other.upper < self.upper, so other.upper is finite.
                let cut = match other.upper_limit.adjacent_limit() {
                    Some(cut) => cut,
                    None => unreachable!("an upper limit below another one is finite"),
                };
                let lower_limit = max_limit(&self.lower_limit, &cut)?;
                Interval::new(lower_limit.clone(), self.upper_limit.clone())
            }
            // `other` starts inside or above `self`: keep what lies below it.
            (Less, Less | Equal) => {
                // other.lower > self.lower, so other.lower is finite.
                let cut = match other.lower_limit.adjacent_limit() {
                    Some(cut) => cut,
                    None => unreachable!("a lower limit above another one is finite"),
                };
                let upper_limit = min_limit(&self.upper_limit, &cut)?;
                Interval::new(self.lower_limit.clone(), upper_limit.clone())
            }
        }
    }
}

fn min_limit<'a, T: PartialOrd>(a: &'a Limit<T>, b: &'a Limit<T>) -> Result<&'a Limit<T>, Error> {
    Ok(if a.try_cmp(b)? == Ordering::Greater {
        b
    } else {
        a
    })
}

fn max_limit<'a, T: PartialOrd>(a: &'a Limit<T>, b: &'a Limit<T>) -> Result<&'a Limit<T>, Error> {
    Ok(if a.try_cmp(b)? == Ordering::Less {
        b
    } else {
        a
    })
}

impl<T> Default for Interval<T> {
    fn default() -> Self {
        Interval::unbounded()
    }
}

impl<T> PartialEq for Interval<T>
where
    T: PartialOrd,
{
    fn eq(&self, other: &Self) -> bool {
        self.lower_limit == other.lower_limit && self.upper_limit == other.upper_limit
    }
}

impl<T> Eq for Interval<T> where T: Ord {}

impl<T> PartialOrd for Interval<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.lower_limit.partial_cmp(&other.lower_limit)? {
            Ordering::Equal => self.upper_limit.partial_cmp(&other.upper_limit),
            unequal => Some(unequal),
        }
    }
}

impl<T> Ord for Interval<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.lower_limit
            .cmp(&other.lower_limit)
            .then_with(|| self.upper_limit.cmp(&other.upper_limit))
    }
}

impl<T> Hash for Interval<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lower_limit.hash(state);
        self.upper_limit.hash(state);
    }
}

impl<'a, T> BitAnd for &'a Interval<T>
where
    T: PartialOrd + Clone,
{
    type Output = Result<Interval<T>, Error>;

    fn bitand(self, other: Self) -> Self::Output {
        self.intersection(other)
    }
}

impl<'a, T> BitOr for &'a Interval<T>
where
    T: PartialOrd + Clone,
{
    type Output = Result<Interval<T>, Error>;

    fn bitor(self, other: Self) -> Self::Output {
        self.union(other)
    }
}

impl<'a, T> Sub for &'a Interval<T>
where
    T: PartialOrd + Clone,
{
    type Output = Result<Interval<T>, Error>;

    fn sub(self, other: Self) -> Self::Output {
        self.difference(other)
    }
}

const SEPARATOR: &str = " .. ";

impl<T> fmt::Display for Interval<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lower_limit, SEPARATOR, self.upper_limit)
    }
}

impl<'a, T> fmt::Display for DebugForm<'a, Interval<T>>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            DebugForm(&self.0.lower_limit),
            SEPARATOR,
            DebugForm(&self.0.upper_limit)
        )
    }
}

impl<'a, T> fmt::Debug for DebugForm<'a, Interval<T>>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T> FromStr for Interval<T>
where
    T: FromStr + PartialOrd,
{
    type Err = Error;

    /// Parses the form written by `Display`, e.g. `[0 .. 27)` or
    /// `-inf .. 5]`, and validates the result like [`Interval::new`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lower, upper) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| Error::Parse(s.to_string()))?;
        let lower_limit: Limit<T> = lower.parse()?;
        let upper_limit: Limit<T> = upper.parse()?;
        Interval::new(lower_limit, upper_limit)
    }
}

#[cfg(feature = "serde1")]
#[derive(serde::Deserialize)]
struct IntervalParts<T> {
    lower_limit: Limit<T>,
    upper_limit: Limit<T>,
}

#[cfg(feature = "serde1")]
impl<T> TryFrom<IntervalParts<T>> for Interval<T>
where
    T: PartialOrd,
{
    type Error = Error;

    fn try_from(parts: IntervalParts<T>) -> Result<Self, Self::Error> {
        Interval::new(parts.lower_limit, parts.upper_limit)
    }
}

#[cfg(feature = "quickcheck")]
impl<T> quickcheck::Arbitrary for Interval<T>
where
    T: quickcheck::Arbitrary + PartialOrd,
{
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let a = T::arbitrary(g);
        let b = T::arbitrary(g);
        let (low, high) = match a.partial_cmp(&b) {
            Some(Ordering::Greater) => (b, a),
            Some(_) => (a, b),
            None => return Interval::unbounded(),
        };
        // A single point is only an interval if both ends are closed.
        let point = low == high;
        let lower_limit = if u8::arbitrary(g) % 6 == 0 {
            Limit::NegInfinity
        } else {
            Limit::lower(low, point || bool::arbitrary(g))
        };
        let upper_limit = if u8::arbitrary(g) % 6 == 0 {
            Limit::PosInfinity
        } else {
            Limit::upper(high, point || bool::arbitrary(g))
        };
        Interval::new(lower_limit, upper_limit).unwrap_or_else(|_| Interval::unbounded())
    }
}
