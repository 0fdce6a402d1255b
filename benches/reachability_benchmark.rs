use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chainreach::chain::fast;
use chainreach::{Dag, IndexingScheme, OnlineSearch, RankedDag, ReachMatrix, Reachability};

fn random_dag(n: usize, edges_per_vertex: usize) -> RankedDag {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let mut adjacency = vec![Vec::new(); n];
    for u in 0..n.saturating_sub(1) {
        for _ in 0..edges_per_vertex {
            let span = (n - u - 1).min(64) as u64;
            adjacency[u].push(u + 1 + (next() % span) as usize);
        }
    }
    Dag::from_adjacency(&adjacency)
        .ranked()
        .expect("forward edges only")
}

fn query_pairs(n: usize, count: usize) -> Vec<(usize, usize)> {
    let mut state = 0xdead_beef_u64;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let s = (state >> 33) as usize % n;
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let t = (state >> 33) as usize % n;
            (s, t)
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let g = random_dag(2000, 3);
    let d = fast(&g);
    c.bench_function("index_build_2000v", |b| {
        b.iter(|| black_box(IndexingScheme::build(&g, &d).map(|s| s.chain_count())));
    });
    c.bench_function("matrix_build_2000v", |b| {
        b.iter(|| black_box(ReachMatrix::new(&g).vertex_count()));
    });
}

fn bench_queries(c: &mut Criterion) {
    let g = random_dag(2000, 3);
    let pairs = query_pairs(g.vertex_count(), 1000);
    let online = OnlineSearch::new(&g);
    let matrix = ReachMatrix::new(&g);
    let index = IndexingScheme::build(&g, &fast(&g)).expect("fast decompositions partition");

    let mut group = c.benchmark_group("is_reachable_1000");
    group.bench_function("online", |b| {
        b.iter(|| pairs.iter().filter(|&&(s, t)| online.is_reachable(s, t)).count());
    });
    group.bench_function("matrix", |b| {
        b.iter(|| pairs.iter().filter(|&&(s, t)| matrix.is_reachable(s, t)).count());
    });
    group.bench_function("index", |b| {
        b.iter(|| pairs.iter().filter(|&&(s, t)| index.is_reachable(s, t)).count());
    });
    group.finish();
}

criterion_group!(benches, bench_construction, bench_queries);
criterion_main!(benches);
