use std::cmp::Ordering;

use daily_core::selection::{trig, SineRng};
use daily_core::types::DateSeed;

fn frac_sin(seed: i64) -> f64 {
    let x = trig::sin(seed as f64) * 10_000.0;
    x - x.floor()
}

#[test]
fn golden_seed_one_sequence() {
    // frac(Math.sin(n) * 10000) for n = 1..=5, captured from node
    let expected = [
        0.7098480789645691,
        0.9742682568175951,
        0.20008059867222983,
        0.9750469207183414,
        0.7572533686161478,
    ];

    let mut rng = SineRng::new(1);
    for (idx, want) in expected.iter().enumerate() {
        assert_eq!(rng.next_f64(), *want, "draw {idx}");
    }
}

#[test]
fn golden_date_seed_first_draw() {
    let seed = DateSeed::from_ymd(2025, 1, 15);
    assert_eq!(seed.value(), 20250115);

    let first = SineRng::new(seed.value()).next_f64();
    assert_eq!(first, 0.9928666347277613);
    assert_eq!(first.to_bits(), 0x3fef_c590_3fae_4000);
    assert_eq!((first * 7.0).floor() as usize + 5, 11);
}

#[test]
fn golden_draws_where_platform_sine_drifts() {
    // Seeds whose draws differ in the last bits under some system libm builds.
    let mut rng = SineRng::new(20250293);
    assert_eq!(rng.next_f64(), 0.21949679095814645);
    assert_eq!(rng.next_f64(), 0.61764517647498);
    assert_eq!(rng.next_f64(), 0.44591311165459047);

    assert_eq!(SineRng::new(20241231).next_f64(), 0.6616799295134115);
    assert_eq!(SineRng::new(20260101).next_f64(), 0.22728670083779434);
}

#[test]
fn golden_long_stream_checksum() {
    // Wrapping sum of the bit patterns of 200_000 draws from 2025-01-15.
    let checksum = SineRng::new(20250115)
        .take(200_000)
        .fold(0u64, |acc, value| acc.wrapping_add(value.to_bits()));
    assert_eq!(checksum, 10_637_508_277_422_195_513);
}

#[test]
fn golden_sine_values() {
    let cases = [
        (1.0, 0.8414709848078965),
        (3.0, 0.1411200080598672),
        (std::f64::consts::PI, 1.2246467991473532e-16),
        (1e6, -0.34999350217129294),
        (1_048_576.5, 0.7425208640927718),
        (20_250_115.0, -0.5856007133365272),
        (2f64.powi(60), -0.8306492176372546),
        (1e22, -0.8522008497671888),
        (-1e300, 0.8178819121159085),
        (f64::MAX, 0.004961954789184062),
    ];
    for (x, want) in cases {
        assert_eq!(trig::sin(x), want, "sin({x})");
    }
}

#[test]
fn sine_edge_inputs() {
    assert_eq!(trig::sin(0.0).to_bits(), 0.0f64.to_bits());
    assert_eq!(trig::sin(-0.0).to_bits(), (-0.0f64).to_bits());
    assert_eq!(trig::sin(1e-300), 1e-300);
    assert!(trig::sin(f64::INFINITY).is_nan());
    assert!(trig::sin(f64::NEG_INFINITY).is_nan());
    assert!(trig::sin(f64::NAN).is_nan());
}

#[test]
fn invariant_any_integer_seed_is_accepted() {
    assert_eq!(SineRng::new(0).next_f64(), 0.0);

    assert_eq!(SineRng::new(-7).next_f64(), 0.1340128121091766);

    for seed in [i64::from(i32::MIN), -1, 19_700_101, 99_991_231, i64::from(i32::MAX)] {
        let value = SineRng::new(seed).next_f64();
        assert!((0.0..1.0).contains(&value), "seed {seed} produced {value}");
    }
}

#[test]
fn invariant_draws_stay_in_unit_interval() {
    let rng = SineRng::new(20_240_229);
    for value in rng.take(10_000) {
        assert!((0.0..1.0).contains(&value));
    }
}

#[test]
fn invariant_state_is_a_post_incremented_seed() {
    let mut rng = SineRng::new(42);
    for offset in 0..50 {
        assert_eq!(rng.next_f64(), frac_sin(42 + offset));
    }
}

#[test]
fn invariant_same_seed_same_stream() {
    let a: Vec<f64> = SineRng::new(20250115).take(256).collect();
    let b: Vec<f64> = SineRng::new(20250115).take(256).collect();
    assert_eq!(a, b);

    let c: Vec<f64> = SineRng::new(20250116).take(256).collect();
    assert_ne!(a, c);
}

#[test]
fn invariant_draw_ordering_consumes_one_draw() {
    let mut values = SineRng::new(1);
    let mut orderings = SineRng::new(1);

    for _ in 0..100 {
        let value = values.next_f64();
        let expected = if value < 0.5 {
            Ordering::Less
        } else if value > 0.5 {
            Ordering::Greater
        } else {
            Ordering::Equal
        };
        assert_eq!(orderings.draw_ordering(), expected);
    }
}
