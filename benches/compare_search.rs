use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use search::Algorithm;
use search::Budget;
use search::problems::graph::GraphProblem;
use search::problems::graph::TableHeuristic;

fn solve(algorithm: Algorithm, problem: &GraphProblem) -> usize {
    let outcome = algorithm.search(problem, TableHeuristic, Budget::unlimited());
    outcome.stats.expanded
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random Graph Search");

    for size in [1_000, 10_000] {
        for i in 0..3 {
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let problem = GraphProblem::random(&mut rng, size, 4, 20);
            let instance_name = format!("n={size}:{i}");

            for algorithm in Algorithm::ALL {
                group.bench_with_input(
                    BenchmarkId::new(algorithm.to_string(), &instance_name),
                    &problem,
                    |b, p| b.iter(|| solve(algorithm, p)),
                );
            }
        }
    }

    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
