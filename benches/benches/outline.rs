// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_outline::{MoveTarget, Outline, OutlineConfig, SimpleNode, TreeState};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

type Node = SimpleNode<u32>;

/// A forest with `fanout` children per folder, `depth` levels deep. Every
/// other folder is open.
fn forest(fanout: u32, depth: u32) -> (Vec<Node>, usize) {
    fn build(next: &mut u32, fanout: u32, depth: u32) -> Node {
        let id = *next;
        *next += 1;
        if depth == 0 {
            return SimpleNode::new(id, "leaf");
        }
        let children = (0..fanout).map(|_| build(next, fanout, depth - 1)).collect();
        SimpleNode::folder(id, "folder", children).with_flag("open", id % 2 == 0)
    }
    let mut next = 0;
    let roots = (0..fanout).map(|_| build(&mut next, fanout, depth)).collect();
    (roots, next as usize)
}

fn config() -> OutlineConfig<Node> {
    OutlineConfig::new().with_open("open")
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline/enrich");

    // Full rebuilds are the only update path, so this bounds every interaction.
    for (fanout, depth) in [(10_u32, 2_u32), (10, 3), (10, 4)] {
        let (data, len) = forest(fanout, depth);
        let config = config();
        let state = TreeState::new();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| black_box(Outline::from_forest(data, &config, &state)));
        });
    }

    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline/flatten");

    for (fanout, depth) in [(10_u32, 2_u32), (10, 3), (10, 4)] {
        let (data, len) = forest(fanout, depth);
        let config = config();
        let state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);
        group.throughput(Throughput::Elements(outline.visible_len() as u64));

        group.bench_with_input(BenchmarkId::new("visible", len), &outline, |b, outline| {
            b.iter(|| black_box(outline.visible().count()));
        });

        group.bench_with_input(BenchmarkId::new("rows", len), &outline, |b, outline| {
            b.iter(|| black_box(outline.flatten().len()));
        });
    }

    group.finish();
}

fn bench_plan_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline/plan_move");

    for (fanout, depth) in [(10_u32, 3_u32), (10, 4)] {
        let (data, len) = forest(fanout, depth);
        let config = config();
        let state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);
        // Deepest leaf of the last root, dropped under the first root's deepest folder.
        let last = (len - 1) as u32;
        let deep = depth - 1;

        group.bench_with_input(BenchmarkId::from_parameter(len), &outline, |b, outline| {
            b.iter(|| black_box(outline.plan_move(&[last], &MoveTarget::child_of(deep))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_enrich, bench_flatten, bench_plan_move);
criterion_main!(benches);
