use cladecut::extract::SubtreeExtractor;
use cladecut::parser::ByteParser;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const TREE_SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Caterpillar-and-cherry tree with `leaves` leaves: `((L0,L1)C0,((L2,L3)C1,...))`.
fn generate_tree(leaves: usize) -> String {
    let mut newick = String::with_capacity(leaves * 24);
    let cherries = leaves / 2;
    for _ in 1..cherries {
        newick.push('(');
    }
    for c in 0..cherries {
        newick.push_str(&format!(
            "(L{a}_ott{a}:0.1,L{b}_ott{b}:0.2)C{c}_ott{id}:0.05",
            a = 2 * c,
            b = 2 * c + 1,
            id = leaves + c
        ));
        if c > 0 {
            newick.push_str(&format!(")I{c}:0.01"));
        }
        if c + 1 < cherries {
            newick.push(',');
        }
    }
    newick.push(';');
    newick
}

fn extract(tree: &str, taxa: &[String]) {
    let extractor = SubtreeExtractor::new(taxa.iter().cloned());
    let result = extractor.extract(ByteParser::for_str(tree)).unwrap();
    black_box(result);
}

fn extraction_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_scan");
    for &leaves in TREE_SIZES {
        let tree = generate_tree(leaves);
        // First and last leaf force a scan of the whole tree
        let taxa = vec!["L0".to_string(), format!("L{}", leaves - 1)];
        group.throughput(Throughput::Bytes(tree.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &tree, |b, tree| {
            b.iter(|| extract(tree, &taxa));
        });
    }
    group.finish();
}

fn early_stop(c: &mut Criterion) {
    let tree = generate_tree(100_000);
    let taxa = vec!["L0".to_string(), "L1".to_string()];
    c.bench_function("early_stop", |b| {
        b.iter(|| extract(&tree, &taxa));
    });
}

criterion_group!(regression, early_stop);
criterion_group! {
    name = scaling;
    config = Criterion::default().sample_size(10);
    targets = extraction_scaling
}
criterion_main!(regression, scaling);
