//! Write a directory of synthetic per-processor benchmark tables.
//!
//! Usage: `generate_sample [DIR] [RUNS]` (defaults: `CPUs`, 10 runs).

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Cpu {
    name: &'static str,
    single: f64,
    multi: f64,
    l2_cache: f64,
    l3_cache: f64,
    cores: u32,
    threads: u32,
    tdp: u32,
    release_year: u32,
}

const CPUS: &[Cpu] = &[
    Cpu { name: "Ryzen 5 5600X", single: 1600.0, multi: 8100.0, l2_cache: 3.0, l3_cache: 32.0, cores: 6, threads: 12, tdp: 65, release_year: 2020 },
    Cpu { name: "Ryzen 9 7950X", single: 2050.0, multi: 19500.0, l2_cache: 16.0, l3_cache: 64.0, cores: 16, threads: 32, tdp: 170, release_year: 2022 },
    Cpu { name: "Core i5-12400", single: 1700.0, multi: 8800.0, l2_cache: 7.5, l3_cache: 18.0, cores: 6, threads: 12, tdp: 65, release_year: 2022 },
    Cpu { name: "Core i9-13900K", single: 2200.0, multi: 21000.0, l2_cache: 32.0, l3_cache: 36.0, cores: 24, threads: 32, tdp: 125, release_year: 2022 },
    Cpu { name: "Core i3-10100", single: 1150.0, multi: 4300.0, l2_cache: 1.0, l3_cache: 6.0, cores: 4, threads: 8, tdp: 65, release_year: 2020 },
];

/// Samples followed by the six metadata rows.
fn columns(cpu: &Cpu, runs: usize, rng: &mut SimpleRng) -> (Vec<String>, Vec<String>) {
    let mut single = Vec::with_capacity(runs + 6);
    let mut multi = Vec::with_capacity(runs + 6);

    for _ in 0..runs {
        // Occasionally throttle a run so the trimmed mean has something to drop.
        let factor = if rng.next_f64() < 0.1 { 0.7 } else { 1.0 };
        single.push(format!("{:.0}", rng.gauss(cpu.single, cpu.single * 0.02) * factor));
        multi.push(format!("{:.0}", rng.gauss(cpu.multi, cpu.multi * 0.03) * factor));
    }

    for _ in 0..3 {
        single.push(String::new());
        multi.push(String::new());
    }
    single.extend([cpu.l2_cache.to_string(), cpu.cores.to_string(), cpu.tdp.to_string()]);
    multi.extend([
        cpu.l3_cache.to_string(),
        cpu.threads.to_string(),
        cpu.release_year.to_string(),
    ]);

    (single, multi)
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| "CPUs".to_string()));
    let runs: usize = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid run count '{s}'"))?,
        None => 10,
    };

    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    for cpu in CPUS {
        let (single, multi) = columns(cpu, runs, &mut rng);

        let path = dir.join(format!("{}.csv", cpu.name));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(["single", "multi"])?;
        for (s, m) in single.iter().zip(&multi) {
            writer.write_record([s, m])?;
        }
        writer.flush()?;
    }

    println!(
        "Wrote {} processor tables ({runs} runs each) to {}",
        CPUS.len(),
        dir.display()
    );
    Ok(())
}
