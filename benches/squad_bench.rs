//! Criterion benchmarks for squad model building and solving.
//!
//! Uses seeded synthetic pools so runs are comparable across machines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_squad::ip::{DefaultSolver, IpSolver, MicroLpSolver};
use u_squad::squad::{prepare_pool, PlayerRecord, RawPlayerRow, SquadConfig, SquadModel};

// ===========================================================================
// Synthetic pool: per line, half rookies (bench-priced) and half premiums
// ===========================================================================

fn synthetic_pool(per_line: usize, seed: u64) -> Vec<PlayerRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    for (code, scale) in [("DEF", 1), ("MID", 2), ("RUC", 1), ("FWD", 1)] {
        for i in 0..per_line * scale {
            let rookie = i % 2 == 0;
            let (price, avg) = if rookie {
                (rng.random_range(200_000..=400_000), rng.random_range(30.0..60.0))
            } else {
                (rng.random_range(500_000..=1_100_000), rng.random_range(70.0..120.0))
            };
            let bye = if rng.random_bool(0.25) { "12|13" } else { "14" };
            rows.push(RawPlayerRow::new(
                format!("{code}{i}"),
                code,
                price.to_string(),
                avg,
                Some(bye),
            ));
        }
    }
    // A few dual-position players.
    for i in 0..per_line / 2 {
        rows.push(RawPlayerRow::new(
            format!("DUAL{i}"),
            "DEF|MID",
            rng.random_range(300_000..=900_000).to_string(),
            rng.random_range(50.0..100.0),
            None,
        ));
    }

    prepare_pool(&rows).players
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("squad_build");
    let config = SquadConfig::default();

    for &per_line in &[10usize, 20, 40] {
        let players = synthetic_pool(per_line, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(players.len()),
            &players,
            |b, p| {
                b.iter(|| {
                    let model = SquadModel::build(black_box(p), black_box(&config));
                    black_box(model)
                })
            },
        );
    }
    group.finish();
}

fn bench_solve_with<S: IpSolver>(c: &mut Criterion, group: &str, solver: &S, sizes: &[usize]) {
    let mut group = c.benchmark_group(group);
    group.sample_size(10);
    let config = SquadConfig::default();

    for &per_line in sizes {
        let players = synthetic_pool(per_line, 42);
        let Ok(squad) = SquadModel::build(&players, &config) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(players.len()),
            &squad,
            |b, s| {
                b.iter(|| {
                    let solution = solver.solve(black_box(s.model()));
                    black_box(solution)
                })
            },
        );
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    bench_solve_with(c, "squad_solve_microlp", &MicroLpSolver::new(), &[10, 16]);
    // 176 and 352 players: full-size pools.
    bench_solve_with(c, "squad_solve_default", &DefaultSolver::default(), &[32, 64]);
}

criterion_group!(benches, bench_build, bench_solve);
criterion_main!(benches);
