use criterion::{criterion_group, criterion_main, Criterion};
use rota_core::RngHandle;
use rota_gen::{generate_sequence, RunConfig};

fn make_config() -> RunConfig {
    let names: Vec<String> = (0..12).map(|idx| format!("P{idx}")).collect();
    let json = serde_json::json!({
        "names": names,
        "num_rounds": 2,
        "history_length": 1,
        "max_tries": 100_000,
        "random_seed": 4242,
        "start_date": "2024-01-01"
    });
    RunConfig::from_json_str(&json.to_string()).expect("config")
}

fn bench_generate(c: &mut Criterion) {
    let config = make_config();
    c.bench_function("generate_sequence_12x2", |b| {
        b.iter(|| generate_sequence(&config, RngHandle::from_seed(4242)).expect("sequence"))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
