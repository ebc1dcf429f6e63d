use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mimizuku_core::{AxiomStore, ConceptId};
use mimizuku_reasoner::saturate;

/// Binary-tree hierarchy: concept i is subsumed by i/2, giving the
/// logarithmic depth real ontologies exhibit.
fn tree_store(size: usize) -> AxiomStore {
    let num_concepts = 2 + size;
    let mut store = AxiomStore::new(num_concepts, 0);
    for i in 4..num_concepts {
        store
            .add_subsumption(i as ConceptId, (i / 2) as ConceptId)
            .unwrap();
    }
    store
}

/// Tree hierarchy plus existentials: every third concept points into a
/// sibling subtree, every fifth NF4 axiom maps links back to supers.
fn mixed_store(size: usize) -> AxiomStore {
    let num_concepts = 2 + size;
    let num_roles = 4;
    let mut store = AxiomStore::new(num_concepts, num_roles);
    for i in 4..num_concepts {
        let c = i as ConceptId;
        let parent = (i / 2) as ConceptId;
        let role = (i % num_roles) as u32;
        store.add_subsumption(c, parent).unwrap();
        if i % 3 == 0 {
            store.add_exist_right(c, role, parent).unwrap();
        }
        if i % 5 == 0 {
            store.add_exist_left(role, parent, c).unwrap();
        }
    }
    store
}

fn benchmark_tree_saturation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_saturation");
    for size in [10_000, 100_000] {
        let store = tree_store(size);
        group.bench_function(format!("tree_{}", size), |b| {
            b.iter(|| saturate(black_box(&store), 2 + size, 0))
        });
    }
    group.finish();
}

fn benchmark_mixed_saturation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_saturation");
    group.sample_size(20);
    for size in [10_000, 100_000] {
        let store = mixed_store(size);
        group.bench_function(format!("mixed_{}", size), |b| {
            b.iter(|| saturate(black_box(&store), 2 + size, 4))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_tree_saturation, benchmark_mixed_saturation);
criterion_main!(benches);
