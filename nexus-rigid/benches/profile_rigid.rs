// benches/profile_rigid.rs
//! Per-operation latency profile for RigidList
//!
//! Compares against:
//! - std::collections::LinkedList (allocates per push)
//!
//! For stable numbers, disable turbo boost and pin to one core:
//!   echo 1 | sudo tee /sys/devices/system/cpu/intel_pstate/no_turbo
//!   sudo taskset -c 2 ./target/release/deps/profile_rigid-*

use std::collections::LinkedList;
use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use nexus_rigid::RigidList;

const WARMUP: usize = 100_000;
const SAMPLES: usize = 1_000_000;
const RESTING: usize = 1_024;

/// 64-byte cache-line sized order
#[derive(Clone, Copy, Default)]
#[repr(C, align(64))]
struct Order {
    id: u64,
    price: i64,
    qty: u64,
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn rdtscp() -> u64 {
    unsafe {
        let mut aux: u32 = 0;
        core::arch::x86_64::__rdtscp(&mut aux)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
fn rdtscp() -> u64 {
    Instant::now().elapsed().as_nanos() as u64
}

fn estimate_cpu_freq_ghz() -> f64 {
    let start_cycles = rdtscp();
    let start_time = Instant::now();
    thread::sleep(Duration::from_millis(10));
    let end_cycles = rdtscp();
    let elapsed = start_time.elapsed();
    end_cycles.wrapping_sub(start_cycles) as f64 / elapsed.as_nanos() as f64
}

fn order(id: u64) -> Order {
    Order {
        id,
        price: 100,
        qty: 10,
    }
}

fn new_histogram() -> Histogram<u64> {
    Histogram::<u64>::new_with_max(1_000_000, 3).unwrap()
}

// ============================================================================
// RigidList
// ============================================================================

fn bench_rigid_push_pop() -> Histogram<u64> {
    let mut list: RigidList<Order> = RigidList::with_capacity(RESTING + 1);
    for i in 0..RESTING as u64 {
        list.try_push_back(order(i)).unwrap();
    }

    for i in 0..WARMUP as u64 {
        list.try_push_back(order(i)).unwrap();
        black_box(list.take_front());
    }

    let mut hist = new_histogram();
    for i in 0..SAMPLES as u64 {
        let start = rdtscp();
        let key = list.try_push_back(order(i)).unwrap();
        black_box(list.take_front());
        let elapsed = rdtscp().wrapping_sub(start);
        black_box(key);
        let _ = hist.record(elapsed.min(1_000_000));
    }
    hist
}

fn bench_rigid_erase_middle() -> Histogram<u64> {
    let mut list: RigidList<Order> = RigidList::with_capacity(RESTING + 1);
    let mut keys: Vec<u32> = (0..RESTING as u64)
        .map(|i| list.try_push_back(order(i)).unwrap())
        .collect();

    let mut hist = new_histogram();
    for i in 0..(WARMUP + SAMPLES) {
        let slot = (i * 7919) % RESTING;

        let start = rdtscp();
        list.erase(keys[slot]);
        keys[slot] = list.try_push_back(order(i as u64)).unwrap();
        let elapsed = rdtscp().wrapping_sub(start);

        if i >= WARMUP {
            let _ = hist.record(elapsed.min(1_000_000));
        }
    }
    hist
}

fn bench_rigid_splice_from() -> Histogram<u64> {
    let mut bids: RigidList<Order> = RigidList::with_capacity(RESTING);
    let mut asks: RigidList<Order> = RigidList::with_capacity(RESTING);
    for i in 0..(RESTING / 2) as u64 {
        bids.try_push_back(order(i)).unwrap();
        asks.try_push_back(order(i)).unwrap();
    }

    let mut hist = new_histogram();
    for i in 0..(WARMUP + SAMPLES) {
        let (src, dst) = if i % 2 == 0 {
            (&mut bids, &mut asks)
        } else {
            (&mut asks, &mut bids)
        };

        let start = rdtscp();
        if let Some(key) = src.front_key() {
            let moved = dst.splice_from(None, src, key);
            black_box(moved.is_ok());
        }
        let elapsed = rdtscp().wrapping_sub(start);

        if i >= WARMUP {
            let _ = hist.record(elapsed.min(1_000_000));
        }
    }
    hist
}

// ============================================================================
// LinkedList
// ============================================================================

fn bench_linked_list_push_pop() -> Histogram<u64> {
    let mut list: LinkedList<Order> = LinkedList::new();
    for i in 0..RESTING as u64 {
        list.push_back(order(i));
    }

    for i in 0..WARMUP as u64 {
        list.push_back(order(i));
        black_box(list.pop_front());
    }

    let mut hist = new_histogram();
    for i in 0..SAMPLES as u64 {
        let start = rdtscp();
        list.push_back(order(i));
        black_box(list.pop_front());
        let elapsed = rdtscp().wrapping_sub(start);
        let _ = hist.record(elapsed.min(1_000_000));
    }
    hist
}

fn print_histogram(name: &str, hist: &Histogram<u64>, cpu_ghz: f64) {
    println!("{}:", name);
    println!("  Cycles:");
    println!("    min:   {:>7}", hist.min());
    println!("    p50:   {:>7}", hist.value_at_quantile(0.50));
    println!("    p99:   {:>7}", hist.value_at_quantile(0.99));
    println!("    p999:  {:>7}", hist.value_at_quantile(0.999));
    println!("    max:   {:>7}", hist.max());
    println!("  Nanoseconds:");
    println!(
        "    p50:   {:>7.1} ns",
        hist.value_at_quantile(0.50) as f64 / cpu_ghz
    );
    println!(
        "    p99:   {:>7.1} ns",
        hist.value_at_quantile(0.99) as f64 / cpu_ghz
    );
    println!(
        "    p999:  {:>7.1} ns",
        hist.value_at_quantile(0.999) as f64 / cpu_ghz
    );
    println!();
}

fn main() {
    println!("nexus-rigid Profile");
    println!("===================");
    println!();
    println!("Warmup:  {}", WARMUP);
    println!("Samples: {}", SAMPLES);
    println!("Resting: {}", RESTING);
    println!();

    let cpu_ghz = estimate_cpu_freq_ghz();
    println!("Estimated CPU freq: {:.2} GHz", cpu_ghz);
    println!();

    let rigid_push_pop = bench_rigid_push_pop();
    let rigid_erase = bench_rigid_erase_middle();
    let rigid_splice = bench_rigid_splice_from();
    let linked_push_pop = bench_linked_list_push_pop();

    println!("=== Push back + pop front ===");
    println!();
    print_histogram("RigidList", &rigid_push_pop, cpu_ghz);
    print_histogram("LinkedList", &linked_push_pop, cpu_ghz);

    println!("=== Erase middle + push back ===");
    println!();
    print_histogram("RigidList", &rigid_erase, cpu_ghz);

    println!("=== Splice one element across lists ===");
    println!();
    print_histogram("RigidList", &rigid_splice, cpu_ghz);

    println!("=== Summary (p50 cycles) ===");
    println!(
        "RigidList push/pop: {:>5}   LinkedList push/pop: {:>5}",
        rigid_push_pop.value_at_quantile(0.50),
        linked_push_pop.value_at_quantile(0.50)
    );
}
