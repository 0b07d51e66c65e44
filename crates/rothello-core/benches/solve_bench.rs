//! Endgame solver benchmarks
//!
//! Measures single-problem solve throughput at several depths and the
//! effect of a warm transposition table.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::hint::black_box;

use rothello_core::random::random_endgame;
use rothello_core::{solve_recursive, EndgameSolver, Problem, SearchParams, Value};

fn corpus(seed: u64, empties: u32, count: usize) -> Vec<Problem> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    (0..count)
        .map(|_| Problem::new(random_endgame(&mut rng, empties)))
        .collect()
}

fn bench_solve_by_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_by_depth");
    for empties in [8u32, 10, 12, 14] {
        let problems = corpus(0xBE7C, empties, 8);
        group.bench_with_input(
            BenchmarkId::from_parameter(empties),
            &problems,
            |b, problems| {
                b.iter(|| {
                    let mut solver = EndgameSolver::new(1 << 16, SearchParams::default());
                    let mut acc = 0i32;
                    for problem in problems {
                        acc += solver.solve(black_box(problem)).raw() as i32;
                    }
                    acc
                })
            },
        );
    }
    group.finish();
}

fn bench_recursive_reference(c: &mut Criterion) {
    let problems = corpus(0xBE7C, 10, 8);
    c.bench_function("recursive_reference_10", |b| {
        b.iter(|| {
            let mut acc = 0i32;
            for problem in &problems {
                acc += solve_recursive(black_box(problem.board), Value::MIN, Value::MAX).raw()
                    as i32;
            }
            acc
        })
    });
}

fn bench_warm_table(c: &mut Criterion) {
    let problems = corpus(0x7AB1E, 12, 8);
    c.bench_function("warm_table_resolve_12", |b| {
        let mut solver = EndgameSolver::new(1 << 16, SearchParams::default());
        for problem in &problems {
            solver.solve(problem);
        }
        b.iter(|| {
            let mut acc = 0i32;
            for problem in &problems {
                acc += solver.solve(black_box(problem)).raw() as i32;
            }
            acc
        })
    });
}

criterion_group!(
    benches,
    bench_solve_by_depth,
    bench_recursive_reference,
    bench_warm_table
);
criterion_main!(benches);
