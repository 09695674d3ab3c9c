//! Pattern compilation and rendering benchmarks

use std::hint::black_box;
use std::sync::Arc;

use chrono::{FixedOffset, TimeZone};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tracelog::domain::ports::FixedClock;
use tracelog::{
    compile, render, CallSite, Dispatcher, DispatcherConfig, LogEvent, LogLevel, LogWriter,
    PatternAppender,
};

const PATTERNS: [(&str, &str); 3] = [
    ("message_only", "%msg%n"),
    ("default", "%date{HH:mm:ss.SSS} %level %file[%line] - %msg%n"),
    (
        "full",
        "%date{yyyy-MM-dd'T'HH:mm:ss.SSS Z} %level %file.%fext[%line:%column] %func - %msg%n",
    ),
];

struct NullWriter;

impl LogWriter for NullWriter {
    fn append(&self, text: &str) {
        black_box(text);
    }
}

fn timestamp() -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .timestamp_millis_opt(12_343_123)
        .unwrap()
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for (name, pattern) in PATTERNS {
        group.bench_with_input(BenchmarkId::from_parameter(name), pattern, |b, pattern| {
            b.iter(|| black_box(compile(black_box(pattern))));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let site = CallSite::new("src/server/handler.rs", "handle_request", 42, 9);

    for (name, pattern) in PATTERNS {
        let compiled = compile(pattern);
        let event = LogEvent::new(timestamp(), LogLevel::Info, site, "request served");

        group.bench_function(name, |b| {
            b.iter(|| black_box(render(&compiled, black_box(&event))));
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let site = CallSite::new("src/server/handler.rs", "handle_request", 42, 9);
    let dispatcher = Dispatcher::new(
        DispatcherConfig::new()
            .with_clock(FixedClock(timestamp()))
            .with_appender(Arc::new(PatternAppender::with_writer(
                PATTERNS[1].1,
                LogLevel::Info,
                Arc::new(NullWriter),
            ))),
    );

    group.bench_function("admitted", |b| {
        b.iter(|| dispatcher.info(site, "served {} in {}ms", &[&"/index", &12]));
    });

    // Filtered calls never format their parameters
    group.bench_function("filtered", |b| {
        b.iter(|| dispatcher.debug(site, "served {} in {}ms", &[&"/index", &12]));
    });

    group.finish();
}

criterion_group!(benches, bench_compile, bench_render, bench_dispatch);
criterion_main!(benches);
