use period::{Error, Period, TimePeriod, UnitPeriod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::macros::datetime;
use time::OffsetDateTime;

const SEED: u64 = 0x5EED_1234;

fn today() -> OffsetDateTime {
    OffsetDateTime::now_utc().date().midnight().assume_utc()
}

// a random instant that every unit can represent
fn random_start(rng: &mut impl Rng) -> OffsetDateTime {
    let secs = rng.gen_range(-2_000_000_000_i64..3_000_000_000);
    let nanos = rng.gen_range(0..1_000_000_000_i64);
    OffsetDateTime::from_unix_timestamp_nanos(secs as i128 * 1_000_000_000 + nanos as i128)
        .unwrap()
}

fn year_start(year: i32) -> OffsetDateTime {
    time::Date::from_calendar_date(year, time::Month::January, 1)
        .unwrap()
        .midnight()
        .assume_utc()
}

fn random_length(rng: &mut impl Rng, unit: UnitPeriod) -> u32 {
    rng.gen_range(1..=unit.max_length().min(12))
}

#[test]
fn next_previous_add() {
    let today = today();

    for step in 0..1000 {
        for unit in UnitPeriod::ALL {
            let p = Period::new(unit, 1, today).unwrap();
            let next = p.add(step).unwrap();

            assert_eq!(next.previous(), p.add(step - 1), "{unit} step {step}");
            assert_eq!(p.next(), p.add(1), "{unit} step {step}");
            assert_eq!(next.add(-step), Ok(p), "{unit} step {step}");

            if unit.is_eternal() {
                assert_eq!(next, p);
                assert_eq!(next.diff(&p), Ok(0));
            } else {
                assert_eq!(next.diff(&p), Ok(step), "{unit} step {step}");
            }
        }
    }
}

#[test]
fn create() {
    let today = today();
    let p = Period::new(UnitPeriod::Day, 1, today).unwrap();
    let tomorrow = Period::new(UnitPeriod::Day, 1, today + time::Duration::DAY).unwrap();

    assert_eq!(p.add(1).and_then(|p| p.add(-1)), Ok(p));
    assert_eq!(p.add(1), Ok(tomorrow));
}

#[test]
fn inverse_laws() {
    let mut rng = StdRng::seed_from_u64(SEED);

    for _ in 0..10_000 {
        for unit in UnitPeriod::ALL {
            let length = random_length(&mut rng, unit);
            let p = Period::new(unit, length, random_start(&mut rng)).unwrap();
            let n = rng.gen_range(-1_000..=1_000);

            let q = p.add(n).unwrap();
            assert_eq!(q.add(-n), Ok(p), "{p} add {n}");

            if unit.is_eternal() {
                assert_eq!(q, p);
            } else {
                assert_eq!(q.diff(&p), Ok(n), "{p} add {n}");
                assert_eq!(p.diff(&q), Ok(-n), "{p} add {n}");
            }
        }
    }
}

#[test]
fn round_trip() {
    let mut rng = StdRng::seed_from_u64(SEED);

    for _ in 0..10_000 {
        for unit in UnitPeriod::ALL.into_iter().filter(|u| u.is_fixed()) {
            let length = random_length(&mut rng, unit);
            let aligned = Period::new(unit, length, random_start(&mut rng))
                .unwrap()
                .start();

            let encoded = TimePeriod::encode(unit, length, aligned).unwrap();
            assert_eq!(encoded.decode(), Ok((unit, length, aligned)));

            let raw: i64 = encoded.into();
            assert_eq!(TimePeriod::from(raw), encoded);
            assert_eq!(Period::try_from(raw).map(|p| p.start()), Ok(aligned));
        }
    }
}

#[test]
fn ordering() {
    let mut rng = StdRng::seed_from_u64(SEED);

    for _ in 0..10_000 {
        for unit in UnitPeriod::ALL.into_iter().filter(|u| u.is_fixed()) {
            let length = random_length(&mut rng, unit);
            let p = Period::new(unit, length, random_start(&mut rng)).unwrap();
            let q = Period::new(unit, length, random_start(&mut rng)).unwrap();

            assert_eq!(p.cmp(&q), p.start().cmp(&q.start()), "{p} vs {q}");
            assert_eq!(p.cmp(&q), i64::from(p).cmp(&i64::from(q)));
        }
    }
}

#[test]
fn month_ordering() {
    let mut rng = StdRng::seed_from_u64(SEED);

    for _ in 0..10_000 {
        let length = random_length(&mut rng, UnitPeriod::Month);
        let p = Period::new(UnitPeriod::Month, length, random_start(&mut rng)).unwrap();
        let q = Period::new(UnitPeriod::Month, length, random_start(&mut rng)).unwrap();

        // an earlier start always sorts first
        if p.start() < q.start() {
            assert!(p < q, "{p} vs {q}");
        }
        if p < q {
            assert!(p.start() <= q.start(), "{p} vs {q}");
        }
    }
}

#[test]
fn month_clamped_twins() {
    let direct = Period::new(UnitPeriod::Month, 1, datetime!(2024-02-29 00:00 UTC)).unwrap();
    let from_30th = Period::new(UnitPeriod::Month, 1, datetime!(2024-01-30 00:00 UTC))
        .and_then(|p| p.next())
        .unwrap();
    let from_31st = Period::new(UnitPeriod::Month, 1, datetime!(2024-01-31 00:00 UTC))
        .and_then(|p| p.next())
        .unwrap();

    // clamped into the same day, but the anchor day keeps them apart
    assert_eq!(direct.start(), from_30th.start());
    assert_eq!(from_30th.start(), from_31st.start());
    assert!(direct < from_30th);
    assert!(from_30th < from_31st);
    assert_eq!(from_31st.diff(&direct), Ok(0));
    assert_eq!(direct.diff(&from_31st), Ok(0));

    // a month later the starts separate again in the same order
    let march: Vec<OffsetDateTime> = [direct, from_30th, from_31st]
        .iter()
        .map(|p| p.next().unwrap().start())
        .collect();
    assert_eq!(
        march,
        vec![
            datetime!(2024-03-29 00:00 UTC),
            datetime!(2024-03-30 00:00 UTC),
            datetime!(2024-03-31 00:00 UTC),
        ]
    );
}

#[test]
fn coarse_unit_ranges() {
    // 48 bits of milliseconds reach a little past the year 6400
    assert!(Period::new(UnitPeriod::Millisecond, 1, datetime!(6000-01-01 00:00 UTC)).is_ok());
    assert_eq!(
        Period::new(UnitPeriod::Millisecond, 1, datetime!(9999-01-01 00:00 UTC)),
        Err(Error::Overflow)
    );
    assert_eq!(
        Period::new(UnitPeriod::Millisecond, 1, year_start(-3000)),
        Err(Error::Overflow)
    );

    // seconds and coarser reach the whole calendar
    for unit in [UnitPeriod::Second, UnitPeriod::Minute, UnitPeriod::Hour, UnitPeriod::Day] {
        assert!(Period::new(unit, 1, datetime!(9999-12-31 00:00 UTC)).is_ok(), "{unit}");
    }
}

#[test]
fn sorting() {
    let start = datetime!(2024-01-01 00:00 UTC);
    let first = Period::new(UnitPeriod::Hour, 1, start).unwrap();

    let mut periods: Vec<Period> = (0..100).rev().map(|n| first.add(n * 7 - 300).unwrap()).collect();
    periods.sort();

    for pair in periods.windows(2) {
        assert!(pair[0].start() < pair[1].start());
        assert_eq!(pair[1].diff(&pair[0]), Ok(7));
    }
}

#[test]
fn scenarios() {
    let p = Period::new(UnitPeriod::Day, 1, datetime!(2024-01-01 00:00 UTC)).unwrap();
    assert_eq!(
        p.add(1),
        Period::new(UnitPeriod::Day, 1, datetime!(2024-01-02 00:00 UTC))
    );

    let t = datetime!(2024-01-01 09:00 UTC);
    let p = Period::new(UnitPeriod::Hour, 1, t).unwrap();
    assert_eq!(p.diff(&p.add(5).unwrap()), Ok(-5));

    let jan = Period::new(UnitPeriod::Month, 1, datetime!(2024-01-31 00:00 UTC)).unwrap();
    assert_eq!(
        jan.add(1).map(|p| p.start()),
        Ok(datetime!(2024-02-29 00:00 UTC))
    );
}

#[test]
fn errors() {
    let start = datetime!(2024-01-01 00:00 UTC);
    assert_eq!(
        Period::new(UnitPeriod::Day, 0, start),
        Err(Error::NonPositiveLength)
    );

    let p = Period::new(UnitPeriod::Day, 1, start).unwrap();
    let q = Period::new(UnitPeriod::Second, 1, start).unwrap();
    assert_eq!(p.diff(&q), Err(Error::MismatchedUnit));
    assert_eq!(p.add(i64::MAX), Err(Error::Overflow));
    assert_eq!(p.try_compare(&"tomorrow"), Err(Error::IncomparableType));
    assert_eq!(
        p.try_compare(&q.time_period()),
        Ok(i64::from(p).cmp(&i64::from(q)))
    );

    assert_eq!(
        UnitPeriod::try_from(0_i8),
        Err(Error::InvalidUnit(0))
    );
    assert_eq!(Period::try_from(TimePeriod::from_raw(1)), Err(Error::InvalidUnit(0)));
}
