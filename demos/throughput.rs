//! Measure memcpy throughput across buffer sizes, reported in bytes.
//!
//! Run with: `cargo run --release --example throughput`

use minibench::{BenchmarkSession, Config};

fn main() {
    let mut size = 8usize;
    while size < 8 << 10 {
        let src = vec![b'x'; size];
        let mut dst = vec![0u8; size];

        let mut bench = BenchmarkSession::new()
            .named(format!("memcpy {size}"))
            .with_config(Config::new(0.25, 5));
        while bench.running() {
            dst.copy_from_slice(std::hint::black_box(&src));
        }
        std::hint::black_box(&dst);

        bench.units_of_measurement("byte", size as f64);
        match bench.summary() {
            Some(summary) => println!("{summary}"),
            None => eprintln!("no samples retained for size {size}"),
        }

        size *= 2;
    }
}
