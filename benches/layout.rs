// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use caex_links::layout::{assign_lanes, PendingEdge};

mod fixtures;
mod profiler;

// Group names (`layout.pass`, `layout.draw`, `layout.lanes`) and case IDs stay stable so results
// remain comparable across refactors.
fn benches_layout(c: &mut Criterion) {
    let cases = [fixtures::Case::Small, fixtures::Case::MediumDense, fixtures::Case::LargeScrolled];

    {
        let mut group = c.benchmark_group("layout.pass");
        for case in cases {
            let fixtures::Fixture { tree, mut graph, .. } = fixtures::fixture(case);
            group.throughput(Throughput::Elements(graph.edge_count() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let drawing = graph.layout_pass(black_box(&tree), true);
                    black_box(drawing.commands.len().wrapping_add(drawing.lanes.len()))
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.draw");
        for case in cases {
            let fixtures::Fixture { tree, mut graph, .. } = fixtures::fixture(case);
            graph.calculate_visible_ranges(&tree, true);
            group.throughput(Throughput::Elements(graph.ranges().len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(graph.draw().commands.len()))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.lanes");
        for case in cases {
            let fixtures::Fixture { tree, mut graph, .. } = fixtures::fixture(case);
            graph.calculate_visible_ranges(&tree, false);
            let pending = graph
                .ranges()
                .iter()
                .filter_map(|(key, range)| {
                    let edge = graph.edge_by_key(*key)?;
                    Some(PendingEdge { key: *key, range: *range, length: edge.length() })
                })
                .collect::<Vec<_>>();
            group.throughput(Throughput::Elements(pending.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(assign_lanes(black_box(pending.clone()), false).len()))
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
