//! Monte Carlo models against closed forms and comparative statics.
//!
//! Every simulation here is seeded, so the assertions are deterministic.
//! Tolerances are expressed in standard errors of the estimate.

use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_models::analytical::BlackScholes;
use pricer_models::simulation::{
    DupireModel, FlatLocalVol, GridLocalVol, HestonModel, HestonParams, MertonModel, MertonParams,
    MonteCarloEngine, MonteCarloEstimate, PathSimulator, SimulationConfig, VarianceGammaModel,
    VarianceGammaParams,
};
use pricer_models::terms::OptionTerms;

fn reference_terms() -> OptionTerms {
    OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap()
}

fn run<M: PathSimulator>(model: &M, num_simulations: usize, num_steps: usize) -> MonteCarloEstimate {
    let config = SimulationConfig::builder()
        .num_simulations(num_simulations)
        .num_steps(num_steps)
        .seed(2024)
        .build()
        .unwrap();
    MonteCarloEngine::new(config).run(model).unwrap()
}

fn assert_within_std_errors(estimate: &MonteCarloEstimate, call: f64, put: f64, label: &str) {
    let call_tol = (4.0 * estimate.call_std_error()).max(0.05);
    let put_tol = (4.0 * estimate.put_std_error()).max(0.05);
    let price = estimate.price();
    assert!(
        (price.call() - call).abs() < call_tol,
        "{label} call: MC={:.4}, reference={call:.4}, tolerance={call_tol:.4}",
        price.call()
    );
    assert!(
        (price.put() - put).abs() < put_tol,
        "{label} put: MC={:.4}, reference={put:.4}, tolerance={put_tol:.4}",
        price.put()
    );
}

// ============================================================================
// Reduction to Black-Scholes
// ============================================================================

#[test]
fn test_heston_with_constant_variance_matches_black_scholes() {
    let params = HestonParams {
        kappa: 1.5,
        theta: 0.04,
        xi: 0.0,
        rho: -0.5,
        v0: 0.04,
        mu: 0.05,
    };
    let model = HestonModel::new(reference_terms(), params).unwrap();
    let bs = BlackScholes::new(reference_terms(), 0.2).unwrap().price();

    let estimate = run(&model, 20_000, 20);
    assert_within_std_errors(&estimate, bs.call(), bs.put(), "Heston xi=0");
}

#[test]
fn test_merton_without_jumps_matches_black_scholes() {
    let params = MertonParams {
        sigma: 0.2,
        lambda_j: 0.0,
        mu_j: -0.2,
        sigma_j: 0.3,
    };
    let model = MertonModel::new(reference_terms(), params).unwrap();
    let bs = BlackScholes::new(reference_terms(), 0.2).unwrap().price();

    let estimate = run(&model, 20_000, 1);
    assert_within_std_errors(&estimate, bs.call(), bs.put(), "Merton lambda=0");
}

#[test]
fn test_dupire_with_flat_surface_matches_black_scholes() {
    let model = DupireModel::new(reference_terms(), Arc::new(FlatLocalVol::new(0.2).unwrap())).unwrap();
    let bs = BlackScholes::new(reference_terms(), 0.2).unwrap().price();

    let estimate = run(&model, 20_000, 25);
    assert_within_std_errors(&estimate, bs.call(), bs.put(), "Dupire flat");
}

#[test]
fn test_dupire_constant_grid_matches_flat_surface() {
    let grid = GridLocalVol::new(
        &[50.0, 100.0, 200.0],
        &[0.0, 0.5, 1.0],
        &[vec![0.2; 3], vec![0.2; 3], vec![0.2; 3]],
    )
    .unwrap();
    let from_grid = DupireModel::new(reference_terms(), Arc::new(grid)).unwrap();
    let flat = DupireModel::new(reference_terms(), Arc::new(FlatLocalVol::new(0.2).unwrap())).unwrap();

    let (a, b) = (run(&from_grid, 2_000, 10).price(), run(&flat, 2_000, 10).price());
    assert_relative_eq!(a.call(), b.call(), max_relative = 1e-9);
    assert_relative_eq!(a.put(), b.put(), max_relative = 1e-9);
}

// ============================================================================
// Monotonicity in volatility (common random numbers)
// ============================================================================

#[test]
fn test_merton_call_increases_with_sigma() {
    let price = |sigma: f64| {
        let params = MertonParams {
            sigma,
            lambda_j: 0.3,
            mu_j: -0.05,
            sigma_j: 0.1,
        };
        run(&MertonModel::new(reference_terms(), params).unwrap(), 10_000, 1)
            .price()
            .call()
    };
    assert!(price(0.1) < price(0.3));
}

#[test]
fn test_variance_gamma_call_increases_with_sigma() {
    let price = |sigma: f64| {
        let params = VarianceGammaParams {
            sigma,
            theta: -0.1,
            nu: 0.2,
        };
        run(&VarianceGammaModel::new(reference_terms(), params).unwrap(), 10_000, 1)
            .price()
            .call()
    };
    assert!(price(0.1) < price(0.3));
}

#[test]
fn test_heston_call_increases_with_variance_level() {
    let price = |variance: f64| {
        let params = HestonParams {
            kappa: 2.0,
            theta: variance,
            xi: 0.2,
            rho: -0.7,
            v0: variance,
            mu: 0.05,
        };
        run(&HestonModel::new(reference_terms(), params).unwrap(), 10_000, 50)
            .price()
            .call()
    };
    assert!(price(0.01) < price(0.09));
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_seeded_prices_repeat_exactly() {
    let params = VarianceGammaParams {
        sigma: 0.25,
        theta: -0.15,
        nu: 0.3,
    };
    let model = VarianceGammaModel::new(reference_terms(), params).unwrap();
    assert_eq!(run(&model, 5_000, 1), run(&model, 5_000, 1));
}
