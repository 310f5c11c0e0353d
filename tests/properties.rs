//! Property tests for preparation and output ordering.

use proptest::prelude::*;
use u_squad::squad::{
    adjusted_average, is_early_bye, normalize_price, sort_rows, Line, Role, SquadRow,
};

fn arb_line() -> impl Strategy<Value = Line> {
    prop::sample::select(Line::BENCH.to_vec())
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::OnField), Just(Role::Bench)]
}

fn arb_row() -> impl Strategy<Value = SquadRow> {
    (
        arb_role(),
        arb_line(),
        prop::option::weighted(0.9, 0u32..2_000_000),
        0.0f64..150.0,
    )
        .prop_map(|(role, line, price, avg)| SquadRow {
            name: format!("{role}-{line}-{price:?}"),
            line,
            position: "DEF|MID|RUC|FWD".into(),
            price: price.map(f64::from),
            expected_avg: avg,
            adjusted_avg: avg,
            role,
        })
}

proptest! {
    #[test]
    fn prop_no_adjustment_without_early_bye(avg in -50.0f64..200.0, price in 0.0f64..3_000_000.0) {
        prop_assert_eq!(adjusted_average(avg, price, false), avg);
    }

    #[test]
    fn prop_adjustment_is_a_tier_step(avg in 0.0f64..200.0, price in 0u32..3_000_000) {
        let price = f64::from(price);
        let shift = adjusted_average(avg, price, true) - avg;
        let expected = if price > 1_000_000.0 {
            -6.0
        } else if price >= 700_000.0 && price <= 999_999.0 {
            -4.0
        } else if price >= 400_000.0 && price <= 699_999.0 {
            0.0
        } else {
            3.0
        };
        prop_assert!((shift - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_cheap_early_bye_gains_three(avg in 0.0f64..200.0, price in 0u32..400_000) {
        let adjusted = adjusted_average(avg, f64::from(price), true);
        prop_assert!((adjusted - (avg + 3.0)).abs() < 1e-9);
    }

    #[test]
    fn prop_early_bye_needs_separator(a in "[0-9]{1,2}", b in "[0-9]{1,2}") {
        let joined = format!("{a}|{b}");
        prop_assert!(is_early_bye(Some(&joined)));
        prop_assert!(!is_early_bye(Some(&a)));
    }

    #[test]
    fn prop_currency_formatting_normalizes(price in 0u64..100_000_000) {
        let plain = price.to_string();
        let mut grouped = String::new();
        for (i, c) in plain.chars().enumerate() {
            if i > 0 && (plain.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        let formatted = format!("${grouped}");

        prop_assert_eq!(normalize_price(&formatted), Some(price as f64));
        prop_assert_eq!(normalize_price(&plain), Some(price as f64));
    }

    #[test]
    fn prop_normalize_is_idempotent(text in "\\$?[0-9,]{0,12}(\\.[0-9]{1,2})?") {
        if let Some(value) = normalize_price(&text) {
            prop_assert_eq!(normalize_price(&value.to_string()), Some(value));
        }
    }

    #[test]
    fn prop_sorted_rows_respect_output_order(mut rows in prop::collection::vec(arb_row(), 0..40)) {
        let before = rows.len();
        sort_rows(&mut rows);
        prop_assert_eq!(rows.len(), before);

        if let Some(first_bench) = rows.iter().position(|r| r.role == Role::Bench) {
            prop_assert!(rows[first_bench..].iter().all(|r| r.role == Role::Bench));
        }
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.role == b.role {
                prop_assert!(a.line.code() <= b.line.code());
                if a.line == b.line {
                    match (a.price, b.price) {
                        (Some(x), Some(y)) => prop_assert!(x <= y),
                        (None, Some(_)) => prop_assert!(false, "missing price sorted first"),
                        _ => {}
                    }
                }
            }
        }
    }
}
