//! 仿真配置
//!
//! `SimConfig` 构造一次之后不再修改，通过 `Arc` 在多次独立运行之间共享。
//! 所有物理开关（ASE、滤波器不理想性）都在 `PhysicalParams` 里，没有进程级全局状态。

use crate::error::{ConfigError, ConfigResult};
use crate::net::{CostModel, Topology};
use crate::phy::{ModulationScheme, TransmissionBitrate, default_bitrates, default_schemes};
use crate::rmsa::{
    RegeneratorAssignment, Rmsa, RoutingAlgorithm, RoutingCost, RoutingKind, SpectrumAssignment,
};

/// 构造 `SimConfig` 所需的全部选项
#[derive(Debug, Clone)]
pub struct RmsaOptions {
    pub routing: RoutingKind,
    pub cost: RoutingCost,
    pub spectrum: SpectrumAssignment,
    /// `None` 表示全透明网络
    pub regenerators: Option<RegeneratorAssignment>,
    pub schemes: Vec<ModulationScheme>,
    pub bitrates: Vec<TransmissionBitrate>,
    pub regenerator_bitrate: TransmissionBitrate,
    pub costs: CostModel,
    /// 每次运行生成的呼叫数
    pub num_calls: u64,
    /// 平均持续时间（秒）
    pub mean_holding_time: f64,
}

impl Default for RmsaOptions {
    fn default() -> Self {
        Self {
            routing: RoutingKind::Dijkstra,
            cost: RoutingCost::ShortestPath,
            spectrum: SpectrumAssignment::FirstFit,
            regenerators: None,
            schemes: default_schemes(),
            bitrates: default_bitrates(),
            regenerator_bitrate: TransmissionBitrate::from_gbps(100.0),
            costs: CostModel::default(),
            num_calls: 10_000,
            mean_holding_time: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub rmsa: Rmsa,
    pub bitrates: Vec<TransmissionBitrate>,
    pub costs: CostModel,
    pub num_calls: u64,
    pub mean_holding_time: f64,
}

impl SimConfig {
    /// 校验选项并构造配置；固定路由会在 `topo` 上建好路由缓存
    pub fn new(topo: &Topology, mut opts: RmsaOptions) -> ConfigResult<Self> {
        if opts.schemes.is_empty() {
            return Err(ConfigError::Invalid("modulation scheme set is empty".into()));
        }
        if let Some(bad) = opts.schemes.iter().find(|s| s.m() < 2) {
            return Err(ConfigError::Invalid(format!(
                "modulation scheme needs at least 2 constellation points, got {}",
                bad.m()
            )));
        }
        if opts.bitrates.is_empty() {
            return Err(ConfigError::Invalid("bitrate menu is empty".into()));
        }
        if opts.bitrates.iter().any(|b| b.bps() <= 0.0) || opts.regenerator_bitrate.bps() <= 0.0 {
            return Err(ConfigError::Invalid("bitrates must be positive".into()));
        }
        if topo.phy().slots_per_link == 0 {
            return Err(ConfigError::Invalid("slots per link must be positive".into()));
        }
        if let RoutingKind::KShortest { k: 0 } = opts.routing {
            return Err(ConfigError::Invalid("k-shortest routing needs k >= 1".into()));
        }
        if let RoutingCost::PowerSeries(psr) = &opts.cost {
            psr.validate()?;
        }
        if opts.mean_holding_time.is_nan() || opts.mean_holding_time <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "mean holding time must be positive, got {}",
                opts.mean_holding_time
            )));
        }
        if topo.num_nodes() < 2 {
            return Err(ConfigError::Invalid("topology needs at least two nodes".into()));
        }

        opts.schemes.sort();
        opts.schemes.dedup();
        let routing = RoutingAlgorithm::new(
            opts.routing,
            opts.cost,
            &opts.schemes,
            &opts.bitrates,
            topo,
        );
        Ok(Self {
            rmsa: Rmsa {
                routing,
                spectrum: opts.spectrum,
                regenerators: opts.regenerators,
                schemes: opts.schemes,
                regenerator_bitrate: opts.regenerator_bitrate,
            },
            bitrates: opts.bitrates,
            costs: opts.costs,
            num_calls: opts.num_calls,
            mean_holding_time: opts.mean_holding_time,
        })
    }
}
