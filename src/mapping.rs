use alloc::{format, vec::Vec};
use core::fmt::{self, Debug};
use core::iter::{FusedIterator, Zip};
use core::ops::Index;
use core::slice;

#[cfg(feature = "serde1")]
use core::marker::PhantomData;
#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{Serialize, Serializer},
};

use crate::chain::IntervalChain;
use crate::error::Error;
use crate::interval::Interval;
use crate::limit::DebugForm;

/// A read-only map from the intervals of an [`IntervalChain`] to values.
///
/// Besides the usual lookup by key (an interval that must match one of the
/// chain's intervals exactly), a mapping resolves any domain value to the
/// value of the interval containing it:
///
/// ```
/// use interval_mapping::IntervalMapping;
///
/// let discount = IntervalMapping::from_pairs(vec![
///     (0, 0.0),
///     (300, 0.10),
///     (500, 0.15),
///     (1000, 0.20),
/// ])
/// .unwrap();
/// assert_eq!(discount.map(&412), Ok(&0.10));
/// assert!(discount.map(&-3).is_err());
/// ```
#[derive(Clone)]
pub struct IntervalMapping<T, V> {
    chain: IntervalChain<T>,
    // One per interval of `chain`, in the same order.
    values: Vec<V>,
}

impl<T, V> IntervalMapping<T, V>
where
    T: PartialOrd + Clone,
{
    /// Makes a mapping assigning the `n`th value to the `n`th interval of
    /// `chain`.
    ///
    /// Fails with [`Error::MalformedArguments`] unless there are exactly
    /// as many values as intervals.
    pub fn new<I>(chain: IntervalChain<T>, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = V>,
    {
        let values: Vec<V> = values.into_iter().collect();
        if values.len() != chain.len() {
            return Err(Error::MalformedArguments(
                "number of values differs from number of intervals",
            ));
        }
        log::debug!(
            "IntervalMapping::new(): {} intervals mapped",
            values.len()
        );
        Ok(IntervalMapping { chain, values })
    }

    /// Makes a mapping over the chain built from `limits` with the default
    /// options, so the last value covers everything from the last limit
    /// upwards.
    pub fn from_limits<L, I>(limits: L, values: I) -> Result<Self, Error>
    where
        L: IntoIterator<Item = T>,
        I: IntoIterator<Item = V>,
    {
        let limits: Vec<T> = limits.into_iter().collect();
        let values: Vec<V> = values.into_iter().collect();
        if limits.is_empty() {
            return Err(Error::MalformedArguments("no limits given"));
        }
        if limits.len() != values.len() {
            return Err(Error::MalformedArguments(
                "limits and values differ in length",
            ));
        }
        Self::new(IntervalChain::new(limits)?, values)
    }

    /// Makes a mapping from `(limit, value)` pairs, see
    /// [`from_limits`](IntervalMapping::from_limits).
    pub fn from_pairs<I>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (T, V)>,
    {
        let (limits, values): (Vec<T>, Vec<V>) = pairs.into_iter().unzip();
        Self::from_limits(limits, values)
    }
}

impl<T, V> IntervalMapping<T, V>
where
    T: PartialOrd,
{
    /// Returns the value of the interval containing `value`, if any.
    pub fn get_containing(&self, value: &T) -> Option<&V> {
        self.chain.position(value).map(|idx| &self.values[idx])
    }

    /// Returns the value of the interval containing `value`.
    ///
    /// # Errors
    ///
    /// [`Error::NotCovered`], naming the mapping's total span, if no
    /// interval contains `value`.
    pub fn map(&self, value: &T) -> Result<&V, Error>
    where
        T: Clone + Debug,
    {
        self.get_containing(value).ok_or_else(|| {
            let span = self.chain.total_interval();
            log::trace!(
                "IntervalMapping::map(): {:?} not in {}",
                value,
                DebugForm(&span)
            );
            Error::NotCovered {
                value: format!("{:?}", value),
                span: format!("{}", DebugForm(&span)),
            }
        })
    }

    /// Returns the value of the interval equal to `key`.
    ///
    /// Only exact matches count: a key inside one of the chain's intervals
    /// is not enough.
    pub fn get(&self, key: &Interval<T>) -> Option<&V> {
        self.chain.index_of(key).map(|idx| &self.values[idx])
    }

    /// Like [`get`](IntervalMapping::get), but failing with
    /// [`Error::KeyNotFound`].
    pub fn try_get(&self, key: &Interval<T>) -> Result<&V, Error>
    where
        T: Debug,
    {
        self.get(key).ok_or_else(|| self.chain.key_not_found(key))
    }

    pub fn contains_key(&self, key: &Interval<T>) -> bool {
        self.chain.contains_interval(key)
    }
}

impl<T, V> IntervalMapping<T, V> {
    pub fn chain(&self) -> &IntervalChain<T> {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets an iterator over the keys, in chain order.
    pub fn keys(&self) -> slice::Iter<'_, Interval<T>> {
        self.chain.iter()
    }

    /// Gets an iterator over the values, in chain order.
    pub fn values(&self) -> slice::Iter<'_, V> {
        self.values.iter()
    }

    /// Gets an iterator over all pairs of key interval and value,
    /// in chain order.
    pub fn iter(&self) -> Iter<'_, T, V> {
        Iter(self.chain.iter().zip(self.values.iter()))
    }
}

impl<T, V> PartialEq for IntervalMapping<T, V>
where
    T: PartialOrd,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.chain == other.chain && self.values == other.values
    }
}

impl<T, V> Eq for IntervalMapping<T, V>
where
    T: Ord,
    V: Eq,
{
}

impl<T, V> Debug for IntervalMapping<T, V>
where
    T: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(key, value)| (DebugForm(key), value)))
            .finish()
    }
}

impl<T, V> Index<&Interval<T>> for IntervalMapping<T, V>
where
    T: PartialOrd,
{
    type Output = V;

    /// Returns a reference to the value of `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not one of the chain's intervals.
    fn index(&self, key: &Interval<T>) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, T, V> IntoIterator for &'a IntervalMapping<T, V> {
    type Item = (&'a Interval<T>, &'a V);
    type IntoIter = Iter<'a, T, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of an `IntervalMapping`, in chain order.
///
/// This `struct` is created by the [`iter`] method on [`IntervalMapping`].
///
/// [`iter`]: IntervalMapping::iter
pub struct Iter<'a, T, V>(Zip<slice::Iter<'a, Interval<T>>, slice::Iter<'a, V>>);

impl<'a, T: 'a, V: 'a> Iterator for Iter<'a, T, V> {
    type Item = (&'a Interval<T>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, T: 'a, V: 'a> DoubleEndedIterator for Iter<'a, T, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<T, V> ExactSizeIterator for Iter<'_, T, V> {}

impl<T, V> FusedIterator for Iter<'_, T, V> {}

impl<T, V> Clone for Iter<'_, T, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Debug, V: Debug> Debug for Iter<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// A mapping serializes as its chain followed by its values, and is
// re-validated while deserializing.
#[cfg(feature = "serde1")]
impl<T, V> Serialize for IntervalMapping<T, V>
where
    T: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.chain)?;
        tup.serialize_element(&self.values)?;
        tup.end()
    }
}

#[cfg(feature = "serde1")]
impl<'de, T, V> Deserialize<'de> for IntervalMapping<T, V>
where
    T: PartialOrd + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_tuple(2, IntervalMappingVisitor::new())
    }
}

#[cfg(feature = "serde1")]
struct IntervalMappingVisitor<T, V> {
    marker: PhantomData<fn() -> IntervalMapping<T, V>>,
}

#[cfg(feature = "serde1")]
impl<T, V> IntervalMappingVisitor<T, V> {
    fn new() -> Self {
        IntervalMappingVisitor {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde1")]
impl<'de, T, V> Visitor<'de> for IntervalMappingVisitor<T, V>
where
    T: PartialOrd + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = IntervalMapping<T, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("IntervalMapping")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        use serde::de::Error as _;
        let chain: IntervalChain<T> = access
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(0, &self))?;
        let values: Vec<V> = access
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(1, &self))?;
        IntervalMapping::new(chain, values).map_err(A::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainOptions;
    use alloc::{string::ToString, vec, vec::Vec};

    const LEVELS: [&str; 4] = ["alarming", "low", "medium", "high"];

    fn levels() -> IntervalMapping<i32, &'static str> {
        IntervalMapping::new(IntervalChain::new([0, 10, 50, 300]).unwrap(), LEVELS).unwrap()
    }

    fn letters() -> IntervalMapping<&'static str, i32> {
        let options = ChainOptions::new().with_upper_infinite(false);
        let ic = IntervalChain::with_options(["a", "k", "p", "z"], options).unwrap();
        IntervalMapping::new(ic, vec![1, 2, 3]).unwrap()
    }

    //
    // Construction tests
    //

    #[test]
    fn three_ways_to_build_the_same_mapping() {
        let limits = [0, 10, 50, 300];
        let ic = IntervalChain::new(limits).unwrap();
        let im = levels();
        assert_eq!(im.chain(), &ic);
        assert_eq!(im.keys().collect::<Vec<_>>(), ic.iter().collect::<Vec<_>>());
        assert_eq!(im.values().copied().collect::<Vec<_>>(), LEVELS.to_vec());
        assert_eq!(
            im.iter().collect::<Vec<_>>(),
            ic.iter().zip(LEVELS.iter()).collect::<Vec<_>>()
        );

        let from_pairs =
            IntervalMapping::from_pairs(limits.iter().copied().zip(LEVELS.iter().copied()))
                .unwrap();
        assert_eq!(from_pairs, im);
        let from_limits = IntervalMapping::from_limits(limits, LEVELS).unwrap();
        assert_eq!(from_limits, im);
    }

    #[test]
    fn finite_chain() {
        let im = letters();
        assert_eq!(im.len(), 3);
        assert_eq!(im.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(im.chain().len(), 3);
        assert!(im.chain().total_interval().is_bounded());
    }

    #[test]
    fn malformed_arguments() {
        let ic = IntervalChain::new([0, 10, 50, 300]).unwrap();
        assert!(matches!(
            IntervalMapping::new(ic.clone(), vec!["a", "b", "c"]),
            Err(Error::MalformedArguments(_))
        ));
        assert!(matches!(
            IntervalMapping::new(ic, vec!["a", "b", "c", "d", "e"]),
            Err(Error::MalformedArguments(_))
        ));
        assert!(matches!(
            IntervalMapping::from_limits(vec![5, 7], vec!["a"]),
            Err(Error::MalformedArguments(_))
        ));
        assert!(matches!(
            IntervalMapping::<i32, &str>::from_limits(vec![], vec![]),
            Err(Error::MalformedArguments(_))
        ));
        assert!(matches!(
            IntervalMapping::<i32, &str>::from_pairs(vec![]),
            Err(Error::MalformedArguments(_))
        ));
    }

    #[test]
    fn chain_errors_propagate() {
        assert_eq!(
            IntervalMapping::from_pairs(vec![(5, "a"), (1, "b")]),
            Err(Error::InvalidInterval(
                crate::error::InvalidInterval::NotAscending
            ))
        );
        assert_eq!(
            IntervalMapping::from_pairs(vec![(f64::NAN, "a")]),
            Err(Error::IncompatibleValues)
        );
    }

    #[test]
    fn owns_its_values() {
        let mut values = vec!["alarming", "low", "medium", "high"];
        let im = IntervalMapping::new(IntervalChain::new([0, 10, 50, 300]).unwrap(), values.clone())
            .unwrap();
        values.remove(0);
        assert_eq!(im.values().copied().collect::<Vec<_>>(), LEVELS.to_vec());
    }

    //
    // Lookup tests
    //

    #[test]
    fn lookup_by_key() {
        let im = levels();
        assert_eq!(im.len(), LEVELS.len());
        assert!(!im.is_empty());
        for (idx, key) in im.keys().enumerate() {
            assert_eq!(im[key], LEVELS[idx]);
            assert_eq!(im.get(key), Some(&LEVELS[idx]));
            assert_eq!(im.try_get(key), Ok(&LEVELS[idx]));
            assert!(im.contains_key(key));
        }
        let stranger = Interval::lower_open(0);
        assert_eq!(im.get(&stranger), None);
        assert!(!im.contains_key(&stranger));
        assert_eq!(
            im.try_get(&stranger),
            Err(Error::KeyNotFound {
                key: "(0 .. +inf".to_string()
            })
        );
        // Containing a key's values is not enough.
        assert_eq!(im.get(&Interval::closed(1, 2).unwrap()), None);
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_panics_on_missing_key() {
        let im = levels();
        let _ = im[&Interval::closed(1, 2).unwrap()];
    }

    #[test]
    fn lookup_by_containment() {
        let im = levels();
        assert_eq!(im.map(&5), Ok(&"alarming"));
        assert_eq!(im.map(&10), Ok(&"low"));
        assert_eq!(im.map(&500), Ok(&"high"));
        assert_eq!(
            im.map(&-4),
            Err(Error::NotCovered {
                value: "-4".to_string(),
                span: "[0 .. +inf".to_string(),
            })
        );
        assert_eq!(im.get_containing(&-4), None);
        assert_eq!(im.get_containing(&49), Some(&"low"));
        assert_eq!(im.get_containing(&50), Some(&"medium"));
        assert_eq!(im.get_containing(&299), Some(&"medium"));

        let im = letters();
        assert_eq!(im.map(&"a"), Ok(&1));
        assert_eq!(im.map(&"j"), Ok(&1));
        assert_eq!(im.map(&"y"), Ok(&3));
        assert!(im.map(&"A").is_err());
        assert_eq!(
            im.map(&"z").unwrap_err().to_string(),
            "\"z\" not in [\"a\" .. \"z\")"
        );
    }

    #[test]
    fn discounts() {
        let discount = IntervalMapping::from_pairs(vec![
            (0, 0.0),
            (300, 0.10),
            (500, 0.15),
            (1000, 0.20),
        ])
        .unwrap();
        assert_eq!(discount.map(&5), Ok(&0.0));
        assert_eq!(discount.map(&412), Ok(&0.10));
        assert_eq!(discount.map(&583), Ok(&0.15));
        assert_eq!(discount.map(&1000), Ok(&0.20));
        assert_eq!(discount.map(&7_000_000), Ok(&0.20));
        assert!(matches!(
            discount.map(&-1),
            Err(Error::NotCovered { .. })
        ));
    }

    //
    // impl PartialEq / Debug / Iterator
    //

    #[test]
    fn equality() {
        let im = levels();
        assert_eq!(im, im.clone());
        assert_eq!(im, levels());
        let other_values =
            IntervalMapping::from_limits([0, 10, 50, 300], ["a", "b", "c", "d"]).unwrap();
        assert_ne!(im, other_values);
        let other_chain = IntervalMapping::new(
            IntervalChain::with_options([0, 10, 50, 300], ChainOptions::new().with_lower_closed(false))
                .unwrap(),
            LEVELS,
        )
        .unwrap();
        assert_ne!(im, other_chain);
    }

    #[test]
    fn debug_looks_like_a_map() {
        let im = IntervalMapping::from_limits([0, 10], ["low", "high"]).unwrap();
        assert_eq!(
            format!("{:?}", im),
            "{[0 .. 10): \"low\", [10 .. +inf: \"high\"}"
        );
        assert_eq!(
            format!("{:?}", letters()),
            "{[\"a\" .. \"k\"): 1, [\"k\" .. \"p\"): 2, [\"p\" .. \"z\"): 3}"
        );
    }

    #[test]
    fn iterates_both_ways() {
        let im = levels();
        let mut iter = im.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().map(|(_, v)| *v), Some("alarming"));
        assert_eq!(iter.next_back().map(|(_, v)| *v), Some("high"));
        assert_eq!(iter.len(), 2);
        let rest: Vec<_> = (&im).into_iter().rev().map(|(_, v)| *v).collect();
        assert_eq!(rest, vec!["high", "medium", "low", "alarming"]);
    }

    //
    // impl Serialize / Deserialize
    //

    #[cfg(feature = "serde1")]
    #[test]
    fn serialization() {
        let im = IntervalMapping::from_limits([1, 3], ['a', 'b']).unwrap();
        let output = serde_json::to_string(&im).expect("Failed to serialize");
        assert_eq!(
            output,
            r#"[{"limits":[1,3],"options":{"lower_closed":true,"add_lower_infinite":false,"add_upper_infinite":true}},["a","b"]]"#
        );
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn deserialization() {
        let input = r#"[{"limits":[1,3],"options":{"lower_closed":true,"add_lower_infinite":false,"add_upper_infinite":true}},["a","b"]]"#;
        let im: IntervalMapping<u32, char> =
            serde_json::from_str(input).expect("Failed to deserialize");
        assert_eq!(im.map(&2), Ok(&'a'));
        assert_eq!(im.map(&3), Ok(&'b'));
        let reserialized = serde_json::to_string(&im).expect("Failed to re-serialize");
        assert_eq!(reserialized, input);

        let short = r#"[{"limits":[1,3],"options":{"lower_closed":true,"add_lower_infinite":false,"add_upper_infinite":true}},["a"]]"#;
        assert!(serde_json::from_str::<IntervalMapping<u32, char>>(short).is_err());
    }
}
