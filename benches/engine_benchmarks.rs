//! Benchmarks for move generation and the query pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_rules::board::Board;
use chess_rules::query::query;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    // Starting position
    let mut board = Board::new();

    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    // Complex middlegame position (Kiwipete)
    let mut kiwipete = Board::from_fen(KIWIPETE);

    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let mut startpos = Board::new();
    group.bench_function("startpos", |b| b.iter(|| black_box(startpos.legal_moves())));

    let mut middlegame =
        Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.legal_moves()))
    });

    // Kiwipete (many moves available)
    let mut kiwipete = Board::from_fen(KIWIPETE);
    group.bench_function("kiwipete", |b| b.iter(|| black_box(kiwipete.legal_moves())));

    group.finish();
}

fn bench_fen(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");

    group.bench_function("parse_kiwipete", |b| {
        b.iter(|| Board::try_from_fen(black_box(KIWIPETE)))
    });

    let board = Board::from_fen(KIWIPETE);
    group.bench_function("serialize_kiwipete", |b| b.iter(|| black_box(&board).to_fen()));

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    group.sample_size(50); // Fewer samples for slower benchmarks

    let startpos = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    group.bench_function("startpos", |b| {
        b.iter(|| query::<&str>(black_box(startpos), &[]))
    });

    let replay = ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4"];
    group.bench_function("sicilian_replay", |b| {
        b.iter(|| query(black_box(startpos), black_box(&replay)))
    });

    group.bench_function("kiwipete", |b| {
        b.iter(|| query::<&str>(black_box(KIWIPETE), &[]))
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_fen, bench_query);
criterion_main!(benches);
