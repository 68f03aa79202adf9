#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use interval_mapping::{ChainOptions, Error, IntervalChain};

#[derive(Clone, Debug, Arbitrary)]
struct Input {
    limits: Vec<u8>,
    lower_closed: bool,
    add_lower_infinite: bool,
    add_upper_infinite: bool,
    probes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut limits = input.limits;
    limits.sort_unstable();
    limits.dedup();
    let options = ChainOptions::new()
        .with_lower_closed(input.lower_closed)
        .with_lower_infinite(input.add_lower_infinite)
        .with_upper_infinite(input.add_upper_infinite);

    let chain = match IntervalChain::with_options(limits, options) {
        Ok(chain) => chain,
        Err(Error::EmptyChain) => return,
        Err(err) => panic!("{}", err),
    };

    for pair in chain.as_slice().windows(2) {
        assert!(pair[0].is_adjacent(&pair[1]));
    }
    for probe in input.probes {
        let expected = chain.iter().position(|ival| ival.contains(&probe));
        assert_eq!(chain.position(&probe), expected);
    }
});
