/*!
[`Interval`]s over any ordered domain, [`IntervalChain`]s of adjacent
intervals, and [`IntervalMapping`]s from the intervals of a chain to
arbitrary values.

An interval is bounded by two [`Limit`]s. Each limit is either finite,
carrying a value of the domain type and being open or closed, or one of
the two infinities. Intervals can be compared, tested for containment,
and combined by intersection, union and difference as long as the result
is again a single interval.


# Chains and mappings

A chain cuts a stretch of the domain into consecutive intervals, given
nothing but the ascending values where one interval ends and the next
begins. Because neighbouring intervals always touch, every value covered
by the chain falls into exactly one of them, and the chain finds it by
binary search.

A mapping attaches a value to each interval of a chain, which makes it a
natural fit for tables like "discount by order volume" or "tax rate by
income bracket":

```rust
use interval_mapping::IntervalMapping;

let rating = IntervalMapping::from_pairs(vec![
    (0, "alarming"),
    (10, "low"),
    (50, "medium"),
    (300, "high"),
])
.unwrap();

assert_eq!(rating.map(&5), Ok(&"alarming"));
assert_eq!(rating.map(&10), Ok(&"low"));
assert_eq!(rating.map(&500), Ok(&"high"));
assert!(rating.map(&-4).is_err());
```


# Domain types

The domain type only needs to be [`PartialOrd`]. Wherever a decision
depends on the order of two values (building an interval, combining two
of them, building a chain) values that can not be ordered, like
`f64::NAN`, are reported as [`Error::IncompatibleValues`]. Plain
predicates like [`Interval::contains`] simply answer `false` for them.

When the domain type is [`Ord`], so are limits and intervals.


## Crate features

If you enable the **serde1** feature it will introduce a dependency on
the _serde_ crate and provide `Serialize` and `Deserialize`
implementations for all types in this crate. Deserialization always
re-validates, so a malformed document can never produce an invalid
interval, chain or mapping.

You can enable the **serde1** feature in your _Cargo.toml_ file like so:

```toml
[dependencies]
interval-mapping = { version = "0.1", features = ["serde1"] }
```

You can similarly enable support for _quickcheck_ by enabling
the **quickcheck** feature.


## Logging

Construction of chains and mappings is logged at `debug` level, failed
lookups at `trace` level, through the [`log`](https://docs.rs/log) facade.
No logger is installed by this crate.


## Building without the Rust standard library

This crate can work without the full standard library available
but relies on the presence of a global allocator &mdash;
i.e. it links the `core` and `alloc` crates, but not `std`.

*/

#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod chain;
pub mod error;
pub mod interval;
pub mod limit;
pub mod mapping;

pub use chain::{ChainOptions, IntervalChain};
pub use error::{Error, InvalidInterval};
pub use interval::Interval;
pub use limit::{Limit, Side};
pub use mapping::IntervalMapping;
