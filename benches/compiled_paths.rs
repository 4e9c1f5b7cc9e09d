//! Compiled Path Performance Benchmarks
//!
//! Benchmarks for path execution including:
//! - Select over a compiled path vs. recompiling per call
//! - Transform throughput on wide documents
//! - Late-bound parameter binding cost
//! - Recursive path traversal

use std::time::{Duration, Instant};

use navpath::prelude::*;
use navpath::telemetry::global_stats;
use serde_json::{Value, json};

fn main() {
    println!("🏁 Compiled Path Performance Benchmarks\n");

    bench_compiled_vs_uncached_select();
    bench_transform_throughput();
    bench_parameter_binding();
    bench_recursive_traversal();

    match serde_json::to_string_pretty(&global_stats().snapshot()) {
        Ok(stats) => println!("📈 Engine statistics:\n{stats}"),
        Err(err) => println!("could not serialize statistics: {err}"),
    }
}

fn wide_document(width: usize) -> Value {
    let users: Vec<Value> = (0..width)
        .map(|i| json!({"id": i, "name": format!("user-{i}"), "scores": [i, i + 1, i + 2]}))
        .collect();
    json!({"users": users})
}

fn report(label: &str, iterations: u32, duration: Duration) {
    let avg = duration / iterations;
    let per_sec = 1_000_000_000f64 / avg.as_nanos().max(1) as f64;
    println!("   {label}: {iterations} runs in {duration:?}");
    println!("   Average: {avg:?} per run");
    println!("   Throughput: {per_sec:.0} runs/sec");
}

/// Benchmark a reused compiled path against compiling on every call
fn bench_compiled_vs_uncached_select() {
    println!("📊 1. Compiled vs. Uncached Select");

    let data = wide_document(1_000);
    let iterations = 500;
    let compiled = match compile_path(&Path::new().key("users").all().key("scores").all()) {
        Ok(compiled) => compiled,
        Err(err) => {
            println!("   compile failed: {err}");
            return;
        }
    };

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = compiled.select(&data);
    }
    report("compiled", iterations, start.elapsed());

    let start = Instant::now();
    for _ in 0..iterations {
        let path = Path::new().key("users").all().key("scores").all();
        let _ = select(&path, &data);
    }
    report("compile per call", iterations, start.elapsed());
    println!();
}

/// Benchmark transform throughput over a wide document
fn bench_transform_throughput() {
    println!("📊 2. Transform Throughput");

    let data = wide_document(1_000);
    let iterations = 200;
    let path = Path::new().key("users").all().key("scores").all();
    let bump = UpdateFn::unary(|v| json!(v.as_i64().unwrap_or(0) + 1));

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = transform(&path, &bump, data.clone());
    }
    report("transform", iterations, start.elapsed());
    println!();
}

/// Benchmark binding late parameters into a compiled template
fn bench_parameter_binding() {
    println!("📊 3. Late-Bound Parameter Binding");

    let template = match compile_path(&late::keypath().then(all()).then(late::keypath())) {
        Ok(template) => template,
        Err(err) => {
            println!("   compile failed: {err}");
            return;
        }
    };
    let iterations = 10_000;

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = template.bind(&[json!("users"), json!("name")]);
    }
    report("bind", iterations, start.elapsed());
    println!();
}

/// Benchmark recursive traversal of a deep tree
fn bench_recursive_traversal() {
    println!("📊 4. Recursive Traversal");

    let leaves = declare_recursive_path("leaves");
    if let Err(err) = provide(
        &leaves,
        if_path(pred(Value::is_array), all().recurse(&leaves), Some(stay())),
    ) {
        println!("   provide failed: {err}");
        return;
    }

    let mut tree = json!([1, 2, 3]);
    for _ in 0..8 {
        tree = json!([tree.clone(), tree]);
    }
    let iterations = 200;
    let path = leaves.path();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = select(&path, &tree);
    }
    report("recursive select", iterations, start.elapsed());
    println!();
}
