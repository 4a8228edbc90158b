//! 网络负载仿真
//!
//! `OpticalWorld` 持有一次运行的全部可变状态（拓扑副本、在途呼叫、统计、随机数）；
//! 呼叫事件在执行时向下转型拿到它。

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use rand::SeedableRng;
use tracing::{debug, info};

use super::SimRng;
use super::call_events::CallRequisition;
use super::call_generator::CallGenerator;
use super::config::SimConfig;
use super::simulator::Simulator;
use super::stats::{NodeUsage, SimStats, SimulationReport};
use super::world::World;
use crate::error::{ConfigError, ConfigResult};
use crate::net::Topology;
use crate::rmsa::{Call, CallId};

/// 一次仿真运行的世界状态
pub struct OpticalWorld {
    pub topo: Topology,
    pub config: Arc<SimConfig>,
    pub generator: CallGenerator,
    /// 供随机频谱分配等策略使用，与呼叫生成的随机流独立
    pub rng: SimRng,
    /// 已评估、尚未结束的呼叫
    pub calls: HashMap<CallId, Call>,
    pub stats: SimStats,
}

impl World for OpticalWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl OpticalWorld {
    /// 还能否再生成新呼叫
    pub fn wants_more_calls(&self) -> bool {
        self.generator.generated() < self.config.num_calls
    }
}

/// 在一份拓扑上以固定负载和种子运行一次仿真
pub struct NetworkSimulation {
    config: Arc<SimConfig>,
    topo: Topology,
    load: f64,
    seed: u64,
}

impl NetworkSimulation {
    pub fn new(config: Arc<SimConfig>, topo: Topology, load: f64, seed: u64) -> ConfigResult<Self> {
        if load.is_nan() || load <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "offered load must be positive, got {load}"
            )));
        }
        if topo.num_nodes() < 2 {
            return Err(ConfigError::Invalid("topology needs at least two nodes".into()));
        }
        Ok(Self {
            config,
            topo,
            load,
            seed,
        })
    }

    pub fn run(self) -> SimulationReport {
        self.run_with_topology().0
    }

    /// 运行并交回最终拓扑（用于读取再生器使用统计）
    #[tracing::instrument(skip(self), fields(load = self.load, seed = self.seed))]
    pub fn run_with_topology(self) -> (SimulationReport, Topology) {
        info!(calls = self.config.num_calls, "▶️  开始网络负载仿真");
        let mut generator = CallGenerator::new(
            self.topo.num_nodes(),
            self.config.bitrates.clone(),
            self.load,
            self.config.mean_holding_time,
            self.seed,
        );
        let mut rng = SimRng::seed_from_u64(self.seed);
        rng.set_stream(1);

        let mut sim = Simulator::default();
        if self.config.num_calls > 0 {
            let first = generator.generate();
            sim.schedule(first.arrival(), CallRequisition { call: first });
        }
        let mut world = OpticalWorld {
            topo: self.topo,
            config: self.config,
            generator,
            rng,
            calls: HashMap::new(),
            stats: SimStats::default(),
        };
        sim.run(&mut world);

        // 所有结束事件都已执行，资源必须全部归还
        assert!(world.calls.is_empty(), "calls left in flight after the run");
        for link in world.topo.links() {
            assert_eq!(
                link.free_slot_count(),
                link.num_slots(),
                "link {:?} leaked slots",
                link.id()
            );
        }
        for node in world.topo.nodes() {
            assert_eq!(node.used_regenerators(), 0, "node {} leaked regenerators", node.id());
        }

        let report = SimulationReport {
            load: self.load,
            seed: self.seed,
            calls: world.stats.calls,
            blocked: world.stats.blocked,
            blocking_probability: world.stats.blocking_probability(),
            bitrate_blocking_probability: world.stats.bitrate_blocking_probability(),
            blocked_by_reason: world
                .stats
                .blocked_by_reason
                .iter()
                .map(|(r, n)| (r.to_string(), *n))
                .collect(),
            node_usage: world
                .topo
                .nodes()
                .iter()
                .map(|n| NodeUsage {
                    node: n.id().label(),
                    peak_regenerators: n.peak_used_regenerators(),
                    total_regenerators: n.total_requested_regenerators(),
                })
                .collect(),
            capex: world.topo.capex(&world.config.costs),
            opex: world.topo.opex(&world.config.costs),
            final_time_secs: sim.now().as_secs_f64(),
        };
        info!(
            calls = report.calls,
            blocked = report.blocked,
            blocking_probability = report.blocking_probability,
            "✅ 网络负载仿真完成"
        );
        debug!(events = sim.processed(), "事件统计");
        (report, world.topo)
    }
}
