//! Surface sweep integration tests.
//!
//! The sweep must always return full-shaped grids, mark failed cells with
//! `NaN`, and agree with point-wise dispatch.

use pricer_core::types::{CancellationToken, PricingError};
use pricer_pricing::{AxisSpec, Dispatcher, EngineConfig, ModelParameters, ModelTag, SurfaceSweeper};
use proptest::prelude::*;

fn black_scholes_base() -> ModelParameters {
    ModelParameters::new()
        .with("S", 100.0)
        .with("K", 100.0)
        .with("T", 1.0)
        .with("r", 0.05)
        .with("sigma", 0.2)
}

fn sweeper() -> SurfaceSweeper {
    SurfaceSweeper::new(Dispatcher::new(EngineConfig {
        workers: Some(4),
        ..Default::default()
    }))
    .unwrap()
}

// ============================================================================
// Grid semantics
// ============================================================================

#[test]
fn test_reference_ui_grid() {
    let surface = sweeper().sweep(
        ModelTag::BlackScholes,
        &black_scholes_base(),
        &AxisSpec::new("S", 50.0, 150.0, 11),
        &AxisSpec::new("sigma", 0.05, 1.0, 11),
    );
    assert_eq!(surface.shape(), (11, 11));
    assert_eq!(surface.failures(), 0);
    assert_eq!(surface.x_name(), "S");
    assert_eq!(surface.y_name(), "sigma");

    // Calls do not fall with spot down a column or with volatility along a row.
    let calls = surface.call_grid();
    for i in 1..11 {
        for j in 0..11 {
            assert!(calls[i][j] >= calls[i - 1][j] - 1e-9);
        }
    }
    for row in &calls {
        for j in 1..11 {
            assert!(row[j] >= row[j - 1] - 1e-9);
        }
    }
}

#[test]
fn test_non_positive_sigma_column_is_nan() {
    let surface = sweeper().sweep(
        ModelTag::BlackScholes,
        &black_scholes_base(),
        &AxisSpec::new("K", 80.0, 120.0, 5),
        &AxisSpec::new("sigma", -0.2, 0.2, 3),
    );
    assert_eq!(surface.shape(), (5, 3));
    assert_eq!(surface.failures(), 10);

    let calls = surface.call_grid();
    let puts = surface.put_grid();
    for i in 0..5 {
        assert!(calls[i][0].is_nan() && puts[i][0].is_nan());
        assert!(calls[i][1].is_nan() && puts[i][1].is_nan());
        assert!(calls[i][2].is_finite() && puts[i][2].is_finite());
    }
    assert!(matches!(
        surface.cell(0, 1),
        Some(Err(PricingError::InvalidParameter { name, .. })) if name == "sigma"
    ));
}

#[test]
fn test_sweep_matches_dispatch() {
    let dispatcher = Dispatcher::default();
    let sweeper = SurfaceSweeper::new(dispatcher.clone()).unwrap();
    let x = AxisSpec::new("T", 0.25, 2.0, 4);
    let y = AxisSpec::new("r", 0.0, 0.1, 3);
    let surface = sweeper.sweep(ModelTag::BlackScholes, &black_scholes_base(), &x, &y);

    for (i, &t) in x.values().iter().enumerate() {
        for (j, &r) in y.values().iter().enumerate() {
            let params = black_scholes_base().with("T", t).with("r", r);
            let direct = dispatcher.price(ModelTag::BlackScholes, &params);
            assert_eq!(surface.cell(i, j), Some(&direct));
        }
    }
}

#[test]
fn test_missing_base_parameter_fails_every_cell() {
    let mut base = black_scholes_base();
    base.remove("r");
    let surface = sweeper().sweep(
        ModelTag::BlackScholes,
        &base,
        &AxisSpec::new("S", 90.0, 110.0, 2),
        &AxisSpec::new("sigma", 0.1, 0.3, 2),
    );
    assert_eq!(surface.failures(), 4);
    assert!(surface
        .cells()
        .iter()
        .all(|cell| cell == &Err(PricingError::MissingParameter("r".to_string()))));
}

#[test]
fn test_axis_can_supply_missing_parameter() {
    let mut base = black_scholes_base();
    base.remove("sigma");
    let surface = sweeper().sweep(
        ModelTag::BlackScholes,
        &base,
        &AxisSpec::new("S", 90.0, 110.0, 2),
        &AxisSpec::new("sigma", 0.1, 0.3, 2),
    );
    assert_eq!(surface.failures(), 0);
}

#[test]
fn test_cancelled_sweep() {
    let token = CancellationToken::new();
    token.cancel();
    let sweeper = SurfaceSweeper::new(Dispatcher::default().with_cancellation(token)).unwrap();
    let surface = sweeper.sweep(
        ModelTag::BlackScholes,
        &black_scholes_base(),
        &AxisSpec::new("S", 90.0, 110.0, 3),
        &AxisSpec::new("sigma", 0.1, 0.3, 3),
    );
    assert_eq!(surface.shape(), (3, 3));
    assert_eq!(surface.failures(), 9);
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_surface_always_full_shape(
        nx in 0_usize..8,
        ny in 0_usize..8,
        sigma_low in -0.5_f64..0.5,
        spot_low in -50.0_f64..150.0,
    ) {
        let surface = sweeper().sweep(
            ModelTag::BlackScholes,
            &black_scholes_base(),
            &AxisSpec::new("S", spot_low, spot_low + 50.0, nx),
            &AxisSpec::new("sigma", sigma_low, sigma_low + 0.5, ny),
        );
        prop_assert_eq!(surface.shape(), (nx, ny));
        prop_assert_eq!(surface.cells().len(), nx * ny);

        let calls = surface.call_grid();
        prop_assert_eq!(calls.len(), nx);
        prop_assert!(calls.iter().all(|row| row.len() == ny));

        let nan_cells = calls.iter().flatten().filter(|v| v.is_nan()).count();
        prop_assert_eq!(nan_cells, surface.failures());
    }
}
