//! Warmup/measure benchmark loop around the convolution engine.
//!
//! One iteration convolves all three channel planes. Warmup iterations are
//! executed and discarded; measured iterations are timed with
//! `std::time::Instant` around the triple. Output buffers are allocated
//! once and reused across every iteration.

use std::time::{Duration, Instant};

use convbench_bmp::BmpPlanes;
use convbench_core::{convolve_into, ChannelBuf, Kernel, ParallelOptions, TimingStats};

/// Iteration counts for the benchmark loop.
#[derive(Clone, Copy, Debug)]
pub struct BenchConfig {
    pub warmup: usize,
    pub runs: usize,
}

/// Convolve `planes` repeatedly and time the measured iterations.
///
/// Returns the final output planes and the timing summary (`None` when no
/// measured iterations were requested). The output planes are valid even
/// for zero-iteration configurations: a single untimed pass runs in that
/// case.
pub fn run_benchmark(
    planes: &BmpPlanes,
    kernel: &Kernel,
    config: BenchConfig,
    parallel: ParallelOptions,
) -> (BmpPlanes, Option<TimingStats>) {
    let mut out_b = ChannelBuf::default();
    let mut out_g = ChannelBuf::default();
    let mut out_r = ChannelBuf::default();

    let pass = |out_b: &mut ChannelBuf, out_g: &mut ChannelBuf, out_r: &mut ChannelBuf| {
        convolve_into(planes.b.as_view(), kernel, out_b, parallel);
        convolve_into(planes.g.as_view(), kernel, out_g, parallel);
        convolve_into(planes.r.as_view(), kernel, out_r, parallel);
    };

    for _ in 0..config.warmup {
        pass(&mut out_b, &mut out_g, &mut out_r);
    }

    let mut samples: Vec<Duration> = Vec::with_capacity(config.runs);
    for _ in 0..config.runs {
        let start = Instant::now();
        pass(&mut out_b, &mut out_g, &mut out_r);
        samples.push(start.elapsed());
    }

    if config.warmup == 0 && config.runs == 0 {
        pass(&mut out_b, &mut out_g, &mut out_r);
    }

    let stats = TimingStats::from_durations(&samples);
    (
        BmpPlanes {
            b: out_b,
            g: out_g,
            r: out_r,
        },
        stats,
    )
}
