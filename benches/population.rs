//! Benchmarks for steady-state population operations.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use steady_ga::compute::evolution::{Candidate, Dna, Organism, Population};

struct Sum(Dna);

impl Organism for Sum {
    fn dna(&self) -> &Dna {
        &self.0
    }

    fn evaluate(&self) -> f64 {
        self.0.genes().iter().sum()
    }
}

fn population(size: usize, strands: usize) -> Population<Sum> {
    let mut rng = StdRng::seed_from_u64(42);
    let organisms = (0..size)
        .map(|_| Sum(Dna::random(1, strands, &mut rng)))
        .collect();
    Population::seeded(organisms, 0.01, 42).expect("valid population")
}

fn bench_generate_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_child_dna");

    for strands in [20, 200, 2000] {
        let mut population = population(100, strands);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_strands", strands)),
            &strands,
            |b, _| {
                b.iter(|| black_box(population.generate_child_dna().expect("child")));
            },
        );
    }

    group.finish();
}

fn bench_steady_state_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_state_step");

    for size in [10, 100, 1000] {
        let mut population = population(size, 20);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let child = population.generate_child_dna().expect("child");
                let candidate = Candidate::evaluated(Sum(child));
                black_box(population.add_candidate(candidate).expect("admission"));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate_child, bench_steady_state_step);
criterion_main!(benches);
