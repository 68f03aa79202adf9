use alloc::{format, vec::Vec};
use core::cmp::Ordering;
use core::fmt;
use core::ops::Index;
use core::slice;

#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};

use crate::error::{Error, InvalidInterval};
use crate::interval::Interval;
use crate::limit::{DebugForm, Limit};

/// How an [`IntervalChain`] turns its limits into intervals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainOptions {
    /// If `true` (the default) every interval includes its lower limit
    /// and excludes its upper one, `[a .. b)`. Otherwise `(a .. b]`.
    pub lower_closed: bool,
    /// Prepend an interval from `-inf` to the first limit.
    /// Off by default.
    pub add_lower_infinite: bool,
    /// Append an interval from the last limit to `+inf`.
    /// On by default.
    pub add_upper_infinite: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        ChainOptions {
            lower_closed: true,
            add_lower_infinite: false,
            add_upper_infinite: true,
        }
    }
}

impl ChainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lower_closed(mut self, lower_closed: bool) -> Self {
        self.lower_closed = lower_closed;
        self
    }

    pub fn with_lower_infinite(mut self, add_lower_infinite: bool) -> Self {
        self.add_lower_infinite = add_lower_infinite;
        self
    }

    pub fn with_upper_infinite(mut self, add_upper_infinite: bool) -> Self {
        self.add_upper_infinite = add_upper_infinite;
        self
    }
}

/// An immutable sequence of adjacent intervals, built from a strictly
/// ascending list of limiting values.
///
/// Each pair of consecutive limits becomes one interval; with the default
/// options the limits `0, 10, 50` give
///
/// ```text
/// [0 .. 10)  [10 .. 50)  [50 .. +inf
/// ```
///
/// Neighbouring intervals always touch: there is neither a gap nor an
/// overlap between them, so every value inside the chain's
/// [total interval](IntervalChain::total_interval) belongs to exactly one
/// of them, and [`map_to_index`](IntervalChain::map_to_index) finds it
/// by binary search.
///
/// `Debug` shows the arguments the chain was built from, not the derived
/// intervals. With the **serde1** feature the same pair of limits and
/// options is the serialized form, which deserializes to an equal chain.
#[derive(Clone)]
pub struct IntervalChain<T> {
    limits: Vec<T>,
    options: ChainOptions,
    intervals: Vec<Interval<T>>,
}

impl<T> IntervalChain<T>
where
    T: PartialOrd + Clone,
{
    /// Makes a chain with the default [`ChainOptions`]: lower-closed
    /// intervals, no lower infinite interval, an upper infinite one.
    pub fn new<I>(limits: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_options(limits, ChainOptions::default())
    }

    /// Makes a chain from `limits`, which must be strictly ascending.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyChain`] if no interval results: no limits at all,
    ///   or a single limit without an infinite interval on either side.
    /// - [`InvalidInterval::NotAscending`] if the limits are not strictly
    ///   ascending.
    /// - [`Error::IncompatibleValues`] if two limits can not be ordered.
    pub fn with_options<I>(limits: I, options: ChainOptions) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        let limits: Vec<T> = limits.into_iter().collect();
        let capped = options.add_lower_infinite || options.add_upper_infinite;
        if limits.is_empty() || (limits.len() == 1 && !capped) {
            return Err(Error::EmptyChain);
        }
        if limits.iter().any(|v| v.partial_cmp(v).is_none()) {
            return Err(Error::IncompatibleValues);
        }

        let lower_closed = options.lower_closed;
        let mut intervals = Vec::with_capacity(limits.len() + 1);
        if options.add_lower_infinite {
            // Closed on the inside where the next interval is open.
            intervals.push(Interval::from_limits(
                Limit::NegInfinity,
                Limit::upper(limits[0].clone(), !lower_closed),
            ));
        }
        for pair in limits.windows(2) {
            let ival = Interval::chainable(pair[0].clone(), pair[1].clone(), lower_closed)
                .map_err(|err| match err {
                    Error::InvalidInterval(_) => InvalidInterval::NotAscending.into(),
                    other => other,
                })?;
            intervals.push(ival);
        }
        if options.add_upper_infinite {
            intervals.push(Interval::from_limits(
                Limit::lower(limits[limits.len() - 1].clone(), lower_closed),
                Limit::PosInfinity,
            ));
        }

        log::debug!(
            "IntervalChain::with_options(): {} limits -> {} intervals ({:?})",
            limits.len(),
            intervals.len(),
            options
        );
        Ok(IntervalChain {
            limits,
            options,
            intervals,
        })
    }
}

impl<T> IntervalChain<T> {
    /// The limiting values, as given.
    pub fn limits(&self) -> &[T] {
        &self.limits
    }

    pub fn options(&self) -> ChainOptions {
        self.options
    }

    pub fn is_lower_closed(&self) -> bool {
        self.options.lower_closed
    }

    /// Returns `true` if the first interval is lower infinite.
    pub fn is_lower_infinite(&self) -> bool {
        self.options.add_lower_infinite
    }

    /// Returns `true` if the last interval is upper infinite.
    pub fn is_upper_infinite(&self) -> bool {
        self.options.add_upper_infinite
    }

    /// Number of intervals (not limits) in the chain.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always `false`; a chain holds at least one interval.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Interval<T>> {
        self.intervals.get(index)
    }

    pub fn first(&self) -> &Interval<T> {
        &self.intervals[0]
    }

    pub fn last(&self) -> &Interval<T> {
        &self.intervals[self.intervals.len() - 1]
    }

    /// Gets an iterator over the intervals, in ascending order.
    pub fn iter(&self) -> slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }
}

impl<T> IntervalChain<T>
where
    T: PartialOrd + Clone,
{
    /// The interval from the lower limit of the first interval to the
    /// upper limit of the last one.
    pub fn total_interval(&self) -> Interval<T> {
        Interval::from_limits(
            self.first().lower_limit().clone(),
            self.last().upper_limit().clone(),
        )
    }
}

impl<T> IntervalChain<T>
where
    T: PartialOrd,
{
    /// Returns the index of the interval containing `value`, if any.
    pub fn position(&self, value: &T) -> Option<usize> {
        // Binary search over `left..right`.
        let (mut left, mut right) = (0, self.intervals.len());
        while left < right {
            let idx = left + (right - left) / 2;
            let ival = &self.intervals[idx];
            if ival.contains(value) {
                return Some(idx);
            }
            if ival.lower_limit().cmp_value(value) == Some(Ordering::Greater) {
                right = idx;
            } else {
                left = idx + 1;
            }
        }
        None
    }

    /// Returns the index of the interval containing `value`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `value` lies outside the chain's total
    /// interval. That can only happen at an end without an infinite
    /// interval.
    pub fn map_to_index(&self, value: &T) -> Result<usize, Error>
    where
        T: fmt::Debug,
    {
        self.position(value).ok_or_else(|| {
            log::trace!("IntervalChain::map_to_index(): {:?} not covered", value);
            Error::NotFound {
                value: format!("{:?}", value),
            }
        })
    }

    /// Returns `true` if `ival` is one of the chain's intervals.
    pub fn contains_interval(&self, ival: &Interval<T>) -> bool {
        self.index_of(ival).is_some()
    }

    /// Returns the index of the first interval equal to `ival`.
    pub fn index_of(&self, ival: &Interval<T>) -> Option<usize> {
        self.intervals.iter().position(|candidate| candidate == ival)
    }

    /// How often `ival` occurs in the chain, which is at most once.
    pub fn count_of(&self, ival: &Interval<T>) -> usize {
        self.intervals.iter().filter(|candidate| *candidate == ival).count()
    }

    pub(crate) fn key_not_found(&self, key: &Interval<T>) -> Error
    where
        T: fmt::Debug,
    {
        Error::KeyNotFound {
            key: format!("{}", DebugForm(key)),
        }
    }
}

impl<T> PartialEq for IntervalChain<T>
where
    T: PartialOrd,
{
    fn eq(&self, other: &Self) -> bool {
        self.intervals == other.intervals
    }
}

impl<T> Eq for IntervalChain<T> where T: Ord {}

impl<T> Index<usize> for IntervalChain<T> {
    type Output = Interval<T>;

    fn index(&self, index: usize) -> &Interval<T> {
        &self.intervals[index]
    }
}

impl<'a, T> IntoIterator for &'a IntervalChain<T> {
    type Item = &'a Interval<T>;
    type IntoIter = slice::Iter<'a, Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> AsRef<[Interval<T>]> for IntervalChain<T> {
    fn as_ref(&self) -> &[Interval<T>] {
        self.as_slice()
    }
}

impl<T> fmt::Debug for IntervalChain<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalChain")
            .field("limits", &self.limits)
            .field("options", &self.options)
            .finish()
    }
}

impl<T> fmt::Display for IntervalChain<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, ival) in self.intervals.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ival)?;
        }
        f.write_str("]")
    }
}

// A chain serializes as the arguments it was built from and is rebuilt
// (and so re-validated) on the way back.
#[cfg(feature = "serde1")]
impl<T> Serialize for IntervalChain<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("IntervalChain", 2)?;
        state.serialize_field("limits", &self.limits)?;
        state.serialize_field("options", &self.options)?;
        state.end()
    }
}

#[cfg(feature = "serde1")]
#[derive(serde::Deserialize)]
struct ChainParts<T> {
    limits: Vec<T>,
    options: ChainOptions,
}

#[cfg(feature = "serde1")]
impl<'de, T> Deserialize<'de> for IntervalChain<T>
where
    T: PartialOrd + Clone + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts = ChainParts::<T>::deserialize(deserializer)?;
        IntervalChain::with_options(parts.limits, parts.options).map_err(serde::de::Error::custom)
    }
}
