//! Query build benchmarks.
//!
//! Benchmarks:
//! - Clause chains of increasing length (MATCH ... MATCH ... RETURN)
//! - WHERE predicates with many parameters
//! - Nested CALL subqueries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cypher_builder::prelude::*;

/// Helper: MATCH chain of `n` labelled nodes joined to the previous one.
fn chain_query(n: usize) -> Query<Match> {
    let first = Variable::node();
    let mut head = Query::new(Match::new(NodePattern::new(&first).label("Person")));
    let mut previous = first;
    let mut tail: &mut Match = &mut head;
    for _ in 1..n {
        let next = Variable::node();
        tail = tail
            .match_(
                Pattern::new(&previous)
                    .related(RelationshipPattern::anonymous().rel_type("KNOWS"))
                    .to(NodePattern::new(&next).label("Person")),
            )
            .unwrap();
        previous = next;
    }
    tail.return_(&previous).unwrap();
    head
}

/// Helper: single MATCH filtered on `n` parameterised properties.
fn filtered_query(n: usize) -> Query<Match> {
    let node = Variable::node();
    let mut query = Query::new(Match::new(NodePattern::new(&node).label("Item")));
    for i in 0..n {
        query.and_where(node.property(format!("p{i}")).eq(Param::new(i)));
    }
    query.return_(&node).unwrap();
    query
}

/// Helper: `depth` nested CALL subqueries around a MATCH.
fn nested_call(depth: usize) -> Query<Call> {
    let node = Variable::node();
    let mut inner = Match::new(&node);
    inner.return_(&node).unwrap();
    let mut call = Call::new(inner);
    for _ in 1..depth {
        call = Call::new(call);
    }
    Query::new(call)
}

fn bench_clause_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_clause_chain");

    for size in &[1usize, 10, 100] {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let query = chain_query(size);
            b.iter(|| black_box(query.build_default().unwrap()));
        });
    }

    group.finish();
}

fn bench_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_parameters");

    for size in &[1usize, 10, 100] {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let query = filtered_query(size);
            b.iter(|| black_box(query.build_default().unwrap()));
        });
    }

    group.finish();
}

fn bench_nested_subqueries(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_nested_call");

    for depth in &[1usize, 5, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            let query = nested_call(depth);
            b.iter(|| black_box(query.build_default().unwrap()));
        });
    }

    group.finish();
}

fn bench_construct_and_build(c: &mut Criterion) {
    c.bench_function("construct_and_build_chain_10", |b| {
        b.iter(|| black_box(chain_query(black_box(10)).build_default().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_clause_chain,
    bench_parameters,
    bench_nested_subqueries,
    bench_construct_and_build
);
criterion_main!(benches);
