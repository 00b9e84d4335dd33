use chrono::{Datelike, Duration, NaiveDate, Weekday};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};
use tickmark_core::{align, Bar, Category, Event, Sentiment, Theme};

fn gen_weekday_bars(n: usize) -> Vec<Bar> {
    let mut day = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let mut v = Vec::with_capacity(n);
    while v.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            v.push(Bar { time: day, open: 10.0, high: 11.0, low: 9.0, close: 10.5, volume: 1 });
        }
        day += Duration::days(1);
    }
    v
}

fn gen_events(n: usize, span_days: i64) -> Vec<Event> {
    let start = NaiveDate::from_ymd_opt(1999, 12, 1).unwrap();
    (0..n)
        .map(|i| Event {
            // stride through calendar days, weekends included
            date: start + Duration::days((i as i64 * 7919) % span_days),
            headline: String::new(),
            category: Category::KNOWN[i % Category::KNOWN.len()],
            sentiment: [Sentiment::Bullish, Sentiment::Bearish, Sentiment::Neutral][i % 3],
            return_1d: None,
        })
        .collect()
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    let theme = Theme::dark();
    for &n in &[2_500usize, 25_000usize] {
        let bars = gen_weekday_bars(n);
        let events = gen_events(1_000, (n as i64) * 7 / 5);
        group.bench_with_input(BenchmarkId::from_parameter(format!("bars{n}_events1000")), &events, |b, ev| {
            b.iter_batched(
                || ev.clone(),
                |e| { let _ = black_box(align(&bars, &e, &theme)); },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
