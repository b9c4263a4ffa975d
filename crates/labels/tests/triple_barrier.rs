use approx::assert_relative_eq;
use proptest::prelude::*;
use tribar_labels::{Outcome, TripleBarrier, label};
use tribar_types::PriceSeries;

fn scenario() -> PriceSeries {
    PriceSeries::from_slice(&[100.0, 100.5, 101.2, 99.0, 98.5]).unwrap()
}

#[test]
fn test_scenario_first_step_wins_on_next_price() {
    let tb = TripleBarrier::new(0.005, 2.0, 3).unwrap();
    let (u, d) = tb.barriers(100.0);
    assert_relative_eq!(u, 100.5, epsilon = 1e-9);
    assert_relative_eq!(d, 99.75, epsilon = 1e-9);

    let table = tb.label(&scenario()).unwrap();
    assert_eq!(table.get(0), Some(Outcome::Win));
}

#[test]
fn test_scenario_second_step_wins() {
    let tb = TripleBarrier::new(0.005, 2.0, 3).unwrap();
    let (u, d) = tb.barriers(100.5);
    assert_relative_eq!(u, 101.0025, epsilon = 1e-9);
    assert_relative_eq!(d, 100.24875, epsilon = 1e-9);

    let table = tb.label(&scenario()).unwrap();
    assert_eq!(table.get(1), Some(Outcome::Win));
}

#[test]
fn test_scenario_table_shape() {
    let table = label(&scenario(), 0.005, 2.0, 3).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.series_len(), 5);
    assert_eq!(table.outcomes(), &[Outcome::Win, Outcome::Win]);
    assert_eq!(
        table.padded(),
        vec![
            Outcome::Win,
            Outcome::Win,
            Outcome::Unresolved,
            Outcome::Unresolved,
            Outcome::Unresolved
        ]
    );
    let one_hot = table.one_hot();
    assert_eq!(one_hot.dim(), (2, 3));
}

#[test]
fn test_upper_barrier_has_priority() {
    // U = -10 * 1.5 = -15 and D = -10 * (1 - 5) = 40, so every price
    // satisfies both barrier conditions at once.
    let prices = PriceSeries::from_slice(&[-10.0, -10.0, -10.0]).unwrap();
    let table = label(&prices, 0.5, 0.1, 1).unwrap();
    assert!(table.outcomes().iter().all(|&o| o == Outcome::Win));
}

#[test]
fn test_nil_when_flat() {
    let prices = PriceSeries::from_slice(&[50.0; 10]).unwrap();
    let table = label(&prices, 0.01, 2.0, 4).unwrap();
    assert_eq!(table.len(), 6);
    assert!(table.outcomes().iter().all(|&o| o == Outcome::Nil));
    assert_eq!(table.class_counts().nil, 6);
}

proptest! {
    #[test]
    fn prop_one_hot_rows_sum_to_one(
        series in prop::collection::vec(1.0f64..200.0, 3..80),
        profit in 0.0001f64..0.2,
        reward_risk in 0.2f64..5.0,
        n_future in 1usize..10,
    ) {
        prop_assume!(n_future < series.len());
        let prices = PriceSeries::from_vec(series.clone()).unwrap();
        let table = label(&prices, profit, reward_risk, n_future).unwrap();

        prop_assert_eq!(table.len(), series.len() - n_future);
        prop_assert_eq!(table.class_counts().total(), table.len());
        for row in table.one_hot().rows() {
            prop_assert_eq!(row.sum(), 1.0);
        }
        prop_assert!(table.outcomes().iter().all(|o| o.is_resolved()));
    }
}
