//! Compare two ways of building a small vector.
//!
//! Run with: `cargo run --release --example compare`

use minibench::{compare, output, BenchmarkSession, Config};

fn main() {
    let config = Config::new(1.0, 7);

    let mut with_capacity = BenchmarkSession::new()
        .named("Vec::with_capacity")
        .with_config(config.clone());
    while with_capacity.running() {
        let mut v: Vec<u64> = Vec::with_capacity(16);
        for i in 0..16 {
            v.push(i);
        }
        std::hint::black_box(v);
    }

    let mut growing = BenchmarkSession::new()
        .named("Vec::new")
        .with_config(config);
    while growing.running() {
        let mut v: Vec<u64> = Vec::new();
        for i in 0..16 {
            v.push(i);
        }
        std::hint::black_box(v);
    }

    match compare(&with_capacity, &growing) {
        Ok(comparison) => println!("{}", output::terminal::format_comparison(&comparison)),
        Err(err) => eprintln!("comparison failed: {err}"),
    }
}
