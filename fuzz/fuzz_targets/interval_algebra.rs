#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use interval_mapping::{Interval, Limit};

#[derive(Clone, Debug, Arbitrary)]
enum End {
    Infinite,
    Open(u8),
    Closed(u8),
}

impl End {
    fn limit(self, lower: bool) -> Limit<u8> {
        match self {
            End::Infinite if lower => Limit::lower_infinite(),
            End::Infinite => Limit::upper_infinite(),
            End::Open(v) => Limit::new(side(lower), v, false),
            End::Closed(v) => Limit::new(side(lower), v, true),
        }
    }
}

fn side(lower: bool) -> interval_mapping::Side {
    if lower {
        interval_mapping::Side::Lower
    } else {
        interval_mapping::Side::Upper
    }
}

fn interval(lower: End, upper: End) -> Option<Interval<u8>> {
    Interval::new(lower.limit(true), upper.limit(false)).ok()
}

// Every operation is checked point by point over the whole of `u8`.
fuzz_target!(|ends: (End, End, End, End)| {
    let (a, b) = match (interval(ends.0, ends.1), interval(ends.2, ends.3)) {
        (Some(a), Some(b)) => (a, b),
        _ => return,
    };

    if let Ok(both) = a.intersection(&b) {
        for x in 0..=u8::MAX {
            assert_eq!(both.contains(&x), a.contains(&x) && b.contains(&x));
        }
    } else {
        assert!(a.is_disjoint(&b));
    }

    if let Ok(either) = a.union(&b) {
        for x in 0..=u8::MAX {
            if a.contains(&x) || b.contains(&x) {
                assert!(either.contains(&x));
            }
        }
        assert!(a == either || a.is_subset(&either));
        assert!(b == either || b.is_subset(&either));
    } else {
        assert!(a.is_disjoint(&b) && !a.is_adjacent(&b));
    }

    if let Ok(rest) = a.difference(&b) {
        for x in 0..=u8::MAX {
            assert_eq!(rest.contains(&x), a.contains(&x) && !b.contains(&x));
        }
    }
});
