//! Books dates into the accounting periods of a fiscal year running from
//! April to March, closing with a catch-all period for late bookings.

use chrono::{Datelike, NaiveDate};
use interval_mapping::{ChainOptions, Error, IntervalChain, IntervalMapping};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn main() -> Result<(), Error> {
    // The first day of every period, plus the day after the last one.
    let starts: Vec<NaiveDate> = (0..=12u32)
        .map(|n| {
            let month = (3 + n) % 12 + 1;
            date(2024 + (3 + n) as i32 / 12, month, 1)
        })
        .collect();
    let mut periods: Vec<String> = starts[..12]
        .iter()
        .enumerate()
        .map(|(n, start)| format!("P{:02} {}", n + 1, start.format("%b %Y")))
        .collect();
    periods.push(String::from("adjustments"));

    let chain = IntervalChain::with_options(starts, ChainOptions::default())?;
    let ledger = IntervalMapping::new(chain, periods)?;

    for booked in &[
        date(2024, 4, 1),
        date(2024, 12, 31),
        date(2025, 1, 1),
        date(2025, 3, 31),
        date(2025, 4, 2),
        date(2024, 3, 31),
    ] {
        match ledger.map(booked) {
            Ok(period) => println!("{} ({}) -> {}", booked, booked.weekday(), period),
            Err(err) => println!("{} can not be booked: {}", booked, err),
        }
    }

    let span = ledger.chain().total_interval();
    println!("fiscal year 2024 covers {}", span);
    Ok(())
}
