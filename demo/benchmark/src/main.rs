//! Benchmark report for the LSM American option pricer.
//!
//! Prints the standard scenario sweeps (spot, maturity, volatility,
//! call sanity, jump diffusion), the two convergence series, the
//! out-of-sample stability trials, and the Longstaff-Schwartz (2001)
//! Table 1 reference grid with finite-difference comparison values.

use anyhow::Result;
use lsm_models::{
    laguerre_set, GeometricBrownianMotion, JumpDiffusion, VanillaPayoff,
};
use lsm_pricing::{ConvergenceAnalyzer, LsmConfig, LsmPricer, ValuationResult};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const STRIKE: f64 = 40.0;
const RATE: f64 = 0.06;
const SEED: u64 = 42;

fn separator(c: char) {
    println!("{}", c.to_string().repeat(72));
}

fn print_result(label: &str, spot: f64, res: &ValuationResult) {
    println!(
        "{:<30}  S={:<6.2}  Am={:<7.4}  Eu={:<7.4}  EEP={:<7.4}  SE={:.4}",
        label, spot, res.option_value, res.european_value, res.early_exercise_premium, res.std_error
    );
}

fn config(n_paths: usize, n_dates: usize, maturity: f64) -> Result<LsmConfig> {
    Ok(LsmConfig::builder()
        .n_paths(n_paths)
        .n_exercise_dates(n_dates)
        .maturity(maturity)
        .rate(RATE)
        .seed(SEED)
        .build()?)
}

fn put_pricer(
    sigma: f64,
    maturity: f64,
    n_paths: usize,
    n_dates: usize,
) -> Result<LsmPricer<GeometricBrownianMotion>> {
    Ok(LsmPricer::new(
        config(n_paths, n_dates, maturity)?,
        GeometricBrownianMotion::new(RATE, sigma),
        VanillaPayoff::put(STRIKE),
        laguerre_set(3)?,
    )?)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("lsm_benchmark=info".parse()?))
        .init();

    println!();
    separator('=');
    println!("  Longstaff-Schwartz LSM American Option Pricer");
    separator('=');

    put_by_spot()?;
    put_by_maturity()?;
    put_by_volatility()?;
    call_sanity()?;
    jump_diffusion_put()?;
    convergence_by_basis()?;
    convergence_by_paths()?;
    out_of_sample_stability()?;
    reference_table()?;

    separator('=');
    println!("Done.\n");
    Ok(())
}

fn put_by_spot() -> Result<()> {
    println!("\n[1] American Put  K=40  r=6%  sigma=20%  T=1yr  N=10,000");
    separator('-');
    println!("{:<30}  Spot    Am       Eu       EEP      SE", "Case");
    separator('-');
    for spot in [36.0, 38.0, 40.0, 42.0, 44.0] {
        let pricer = put_pricer(0.20, 1.0, 10_000, 50)?;
        print_result("AmericanPut", spot, &pricer.price(spot)?);
    }
    Ok(())
}

fn put_by_maturity() -> Result<()> {
    println!("\n[2] American Put: vary maturity  S=40  K=40  r=6%  sigma=20%");
    separator('-');
    for maturity in [0.5, 1.0, 2.0] {
        let n_dates = (50.0 * maturity) as usize;
        let pricer = put_pricer(0.20, maturity, 10_000, n_dates)?;
        print_result(&format!("T={}yr", maturity), 40.0, &pricer.price(40.0)?);
    }
    Ok(())
}

fn put_by_volatility() -> Result<()> {
    println!("\n[3] American Put: vary sigma  S=40  K=40  r=6%  T=1yr");
    separator('-');
    for sigma in [0.10, 0.20, 0.30, 0.40] {
        let pricer = put_pricer(sigma, 1.0, 10_000, 50)?;
        print_result(&format!("sigma={:.2}", sigma), 40.0, &pricer.price(40.0)?);
    }
    Ok(())
}

fn call_sanity() -> Result<()> {
    println!("\n[4] American Call  K=40  r=6%  sigma=20%  T=1yr  N=10,000");
    separator('-');
    println!("    (For non-dividend stocks, American call = European call;");
    println!("     early exercise premium should be ~0)");
    separator('-');
    for spot in [36.0, 40.0, 44.0] {
        let pricer = LsmPricer::new(
            config(10_000, 50, 1.0)?,
            GeometricBrownianMotion::new(RATE, 0.20),
            VanillaPayoff::call(STRIKE),
            laguerre_set(3)?,
        )?;
        print_result("AmericanCall", spot, &pricer.price(spot)?);
    }
    Ok(())
}

fn jump_diffusion_put() -> Result<()> {
    println!("\n[5] Jump-Diffusion Put  S=40  K=40  r=6%  T=1yr  N=10,000");
    separator('-');
    println!("    (lambda=0 is pure GBM; sigma adjusted to equalise variance)");
    separator('-');
    for lambda in [0.00, 0.05, 0.10] {
        let sigma = if lambda == 0.0 { 0.30 } else { 0.20 };
        let pricer = LsmPricer::new(
            config(10_000, 50, 1.0)?,
            JumpDiffusion::new(RATE, sigma, lambda),
            VanillaPayoff::put(STRIKE),
            laguerre_set(3)?,
        )?;
        print_result(&format!("lambda={:.2}", lambda), 40.0, &pricer.price(40.0)?);
    }
    Ok(())
}

fn convergence_by_basis() -> Result<()> {
    println!("\n[6] Convergence vs. Basis Functions M");
    println!("    S=40  K=40  r=6%  sigma=20%  T=1yr  N=10,000");
    println!("    (LSM value is a lower bound; should rise then stabilise with M)");
    separator('-');
    println!("{:>6}{:>12}{:>12}", "M", "Value", "Std Error");
    separator('-');
    let cfg = config(10_000, 50, 1.0)?;
    for point in ConvergenceAnalyzer::by_basis_size(&cfg, 40.0, STRIKE, 0.20, 5)? {
        println!("{:>6}{:>12.4}{:>12.4}", point.m, point.value, point.std_error);
    }
    Ok(())
}

fn convergence_by_paths() -> Result<()> {
    println!("\n[7] Convergence vs. Path Count N");
    println!("    S=40  K=40  r=6%  sigma=20%  T=1yr  M=3 Laguerre");
    println!("    (Standard error should fall proportionally to 1/sqrt(N))");
    separator('-');
    println!(
        "{:>10}{:>12}{:>12}{:>14}",
        "N", "Value", "Std Error", "SE * sqrt(N)"
    );
    separator('-');
    let cfg = config(10_000, 50, 1.0)?;
    let counts = [500, 1000, 2000, 5000, 10_000, 20_000];
    for point in ConvergenceAnalyzer::by_path_count(&cfg, 40.0, STRIKE, 0.20, &counts)? {
        println!(
            "{:>10}{:>12.4}{:>12.4}{:>14.4}",
            point.n_paths,
            point.value,
            point.std_error,
            point.std_error * (point.n_paths as f64).sqrt()
        );
    }
    Ok(())
}

fn out_of_sample_stability() -> Result<()> {
    println!("\n[8] Out-of-Sample Stability Test");
    println!("    S=40  K=40  r=6%  sigma=20%  T=1yr  N=5,000  5 trials");
    println!("    (In-sample and out-of-sample values should be close)");
    separator('-');
    println!(
        "{:>8}{:>14}{:>14}{:>12}",
        "Trial", "In-Sample", "Out-of-Sample", "Difference"
    );
    separator('-');
    let cfg = config(5_000, 50, 1.0)?;
    let trials = ConvergenceAnalyzer::out_of_sample(&cfg, 40.0, STRIKE, 0.20, 5)?;
    for (i, trial) in trials.iter().enumerate() {
        println!(
            "{:>8}{:>14.4}{:>14.4}{:>12.4}",
            i + 1,
            trial.in_sample.option_value,
            trial.out_of_sample.option_value,
            trial.out_of_sample.option_value - trial.in_sample.option_value
        );
    }
    Ok(())
}

fn reference_table() -> Result<()> {
    println!("\n[9] Benchmark Table  (L&S 2001 Table 1 reference cases)");
    println!("    K=40  r=6%  N=20,000  50 exercise dates/year");
    separator('-');
    println!(
        "{:>6}{:>7}{:>6}{:>10}{:>10}{:>10}{:>10}",
        "S", "sigma", "T", "LSM", "FD Ref", "Diff", "SE"
    );
    separator('-');

    // (spot, sigma, maturity, finite-difference reference)
    let cases: [(f64, f64, f64, f64); 20] = [
        (36.0, 0.20, 1.0, 4.478),
        (36.0, 0.20, 2.0, 4.840),
        (36.0, 0.40, 1.0, 7.101),
        (36.0, 0.40, 2.0, 8.508),
        (38.0, 0.20, 1.0, 3.250),
        (38.0, 0.20, 2.0, 3.745),
        (38.0, 0.40, 1.0, 6.148),
        (38.0, 0.40, 2.0, 7.670),
        (40.0, 0.20, 1.0, 2.314),
        (40.0, 0.20, 2.0, 2.885),
        (40.0, 0.40, 1.0, 5.312),
        (40.0, 0.40, 2.0, 6.920),
        (42.0, 0.20, 1.0, 1.617),
        (42.0, 0.20, 2.0, 2.212),
        (42.0, 0.40, 1.0, 4.582),
        (42.0, 0.40, 2.0, 6.248),
        (44.0, 0.20, 1.0, 1.110),
        (44.0, 0.20, 2.0, 1.690),
        (44.0, 0.40, 1.0, 3.948),
        (44.0, 0.40, 2.0, 5.647),
    ];

    for (spot, sigma, maturity, fd_ref) in cases {
        let n_dates = (50.0 * maturity) as usize;
        let pricer = put_pricer(sigma, maturity, 20_000, n_dates)?;
        let res = pricer.price(spot)?;
        println!(
            "{:>6.0}{:>7.2}{:>6.1}{:>10.3}{:>10.3}{:>10.3}{:>10.3}",
            spot,
            sigma,
            maturity,
            res.option_value,
            fd_ref,
            res.option_value - fd_ref,
            res.std_error
        );
    }
    Ok(())
}
