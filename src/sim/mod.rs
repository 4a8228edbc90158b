//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件（仿真时间、事件、世界和仿真器），
//! 以及建立在其上的呼叫生成、网络负载仿真、负载扫描与再生器放置。

// 子模块声明
mod call_events;
mod call_generator;
mod config;
mod event;
mod network_simulation;
mod placement;
mod scheduled_event;
mod simulator;
mod spec;
mod stats;
mod sweep;
mod time;
mod world;

// 重新导出公共接口
pub use call_events::{CallEnding, CallRequisition};
pub use call_generator::CallGenerator;
pub use config::{RmsaOptions, SimConfig};
pub use event::Event;
pub use network_simulation::{NetworkSimulation, OpticalWorld};
pub use placement::place_most_used;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use spec::{LoadSpec, PlacementSpec, SchemeSpec, SimulationSpec, TopologySource};
pub use stats::{NodeUsage, SimStats, SimulationReport};
pub use sweep::{load_points, load_sweep};
#[cfg(test)]
pub(crate) use sweep::run_in_batches;
pub use time::SimTime;
pub use world::World;

/// 仿真使用的随机数发生器：给定种子即可完全复现
pub type SimRng = rand_chacha::ChaCha8Rng;
