//! Benchmarks for the Roe flux kernel and the solver step.
//!
//! Run with: `cargo bench --bench flux_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use euler_rs::{roe_flux_euler_2d, ChamberConditions, Euler2D, EulerState2D, FluidSolver};

/// Generate face state pairs spanning smooth and shocked conditions.
fn generate_test_states(n: usize) -> Vec<(EulerState2D, EulerState2D)> {
    let eq = Euler2D::default();
    let mut states = Vec::with_capacity(n);
    for i in 0..n {
        let phase = (i as f64) * 0.1;

        let rho_l = 1.0 + 0.4 * phase.sin();
        let u_l = 400.0 + 200.0 * phase.cos();
        let v_l = 50.0 * phase.sin();
        let p_l = 101_325.0 * (1.0 + 0.5 * phase.sin());
        let left = EulerState2D::from_primitives(rho_l, u_l, v_l, p_l, eq.gamma);

        let rho_r = 1.0 + 0.3 * (phase + 0.5).sin();
        let u_r = 350.0 + 180.0 * (phase + 0.3).cos();
        let v_r = -40.0 * (phase + 0.2).sin();
        let p_r = 101_325.0 * (1.0 + 0.4 * (phase + 0.7).cos());
        let right = EulerState2D::from_primitives(rho_r, u_r, v_r, p_r, eq.gamma);

        states.push((left, right));
    }
    states
}

fn bench_roe_flux(c: &mut Criterion) {
    let eq = Euler2D::default();
    let states = generate_test_states(1000);

    let mut group = c.benchmark_group("roe_flux");
    for normal in [(1.0, 0.0), (0.0, 1.0)] {
        let label = if normal.0 == 1.0 { "x_faces" } else { "y_faces" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut total_mass = 0.0;
                for (left, right) in &states {
                    let flux = roe_flux_euler_2d(
                        black_box(left),
                        black_box(right),
                        black_box(normal),
                        black_box(&eq),
                    );
                    total_mass += flux.rho;
                }
                total_mass
            })
        });
    }
    group.finish();
}

fn bench_solver_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_step");
    group.sample_size(20);

    for (nx, ny) in [(150, 75), (300, 150)] {
        let mut solver = FluidSolver::new(nx, ny).unwrap();
        solver
            .update_boundary(ChamberConditions::default())
            .unwrap();
        solver.reset();
        // Warm up past the startup transient.
        for _ in 0..50 {
            solver.step(0.5);
        }

        group.bench_function(format!("{}x{}", nx, ny), |b| {
            b.iter(|| solver.step(black_box(0.5)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_roe_flux, bench_solver_step);
criterion_main!(benches);
