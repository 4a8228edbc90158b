//! 负载扫描
//!
//! 每个负载点是一次独立运行：各自持有一份全新的拓扑副本，只共享只读的 `SimConfig`。
//! 运行在 scoped 线程上分批并行执行（每批不超过可用并行度），结果按负载顺序返回。

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use tracing::{debug, info};

use super::config::SimConfig;
use super::network_simulation::NetworkSimulation;
use super::stats::SimulationReport;
use crate::error::{ConfigError, ConfigResult};
use crate::net::Topology;

/// [min, max] 上步长为 `step` 的负载点（包含两端，容忍浮点误差）
pub fn load_points(min: f64, max: f64, step: f64) -> ConfigResult<Vec<f64>> {
    if min.is_nan() || min <= 0.0 || max < min {
        return Err(ConfigError::Invalid(format!(
            "invalid load range [{min}, {max}]"
        )));
    }
    if min == max {
        return Ok(vec![min]);
    }
    if step.is_nan() || step <= 0.0 {
        return Err(ConfigError::Invalid(format!("invalid load step {step}")));
    }
    let count = ((max - min) / step + 1e-9).floor() as usize;
    Ok((0..=count).map(|i| min + step * i as f64).collect())
}

/// 每批最多 `workers` 个线程，批内并行、批间顺序执行；结果保持输入顺序
pub(crate) fn run_in_batches(runs: Vec<NetworkSimulation>, workers: usize) -> Vec<SimulationReport> {
    let workers = workers.max(1);
    let mut reports = Vec::with_capacity(runs.len());
    let mut pending = runs.into_iter();
    loop {
        let batch: Vec<_> = pending.by_ref().take(workers).collect();
        if batch.is_empty() {
            break;
        }
        debug!(threads = batch.len(), "启动一批运行");
        thread::scope(|s| {
            let handles: Vec<_> = batch
                .into_iter()
                .map(|run| s.spawn(move || run.run()))
                .collect();
            for h in handles {
                match h.join() {
                    Ok(report) => reports.push(report),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
        });
    }
    reports
}

/// 在每个负载点上独立运行一次仿真
pub fn load_sweep(
    config: Arc<SimConfig>,
    topo: &Topology,
    loads: &[f64],
    seed: u64,
) -> ConfigResult<Vec<SimulationReport>> {
    let runs = loads
        .iter()
        .map(|&load| NetworkSimulation::new(Arc::clone(&config), topo.clone_fresh(), load, seed))
        .collect::<ConfigResult<Vec<_>>>()?;

    let workers = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
    let reports = run_in_batches(runs, workers);
    for r in &reports {
        info!(load = r.load, blocking_probability = r.blocking_probability, "负载点完成");
    }
    Ok(reports)
}
