//! Benchmarks for IRC line parsing and the line codec.

use bytes::BytesMut;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hatcog_proto::{outbound, Line, LineCodec};
use tokio_util::codec::Decoder;

/// Simple PING line
const SIMPLE_LINE: &str = "PING :irc.example.com";

/// Channel message with a user prefix
const PREFIX_LINE: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";

/// CTCP action
const ACTION_LINE: &str = ":nick!user@host PRIVMSG #channel :\x01ACTION waves at everyone\x01";

/// Names reply, the bulkiest thing seen on join
const NAMES_LINE: &str = ":irc.server.net 353 me = #rust :alice bob carol dave eve mallory trent victor walter peggy";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Line Parsing");

    for (name, raw) in [
        ("simple_ping", SIMPLE_LINE),
        ("with_prefix", PREFIX_LINE),
        ("ctcp_action", ACTION_LINE),
        ("names_reply", NAMES_LINE),
    ] {
        group.bench_with_input(BenchmarkId::new("parse", name), raw, |b, s| {
            b.iter(|| {
                let line = Line::parse(black_box(s)).unwrap();
                black_box(line)
            })
        });
    }

    group.finish();
}

fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("Line Codec");

    let burst: String = [SIMPLE_LINE, PREFIX_LINE, ACTION_LINE, NAMES_LINE]
        .iter()
        .map(|l| format!("{}\r\n", l))
        .collect::<String>()
        .repeat(25);

    group.bench_function("decode_burst", |b| {
        b.iter(|| {
            let mut codec = LineCodec::new();
            let mut buf = BytesMut::from(burst.as_str());
            let mut count = 0;
            while let Ok(Some(_)) = codec.decode(&mut buf) {
                count += 1;
            }
            black_box(count)
        })
    });

    group.finish();
}

fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Line Construction");

    group.bench_function("privmsg", |b| {
        b.iter(|| black_box(outbound::privmsg(black_box("#channel"), black_box("Hello!"))))
    });

    group.bench_function("action", |b| {
        b.iter(|| black_box(outbound::action(black_box("#channel"), black_box("waves"))))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parsing,
    benchmark_codec,
    benchmark_construction
);
criterion_main!(benches);
