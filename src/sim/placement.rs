//! 再生器放置（NX Most Simultaneously Used）
//!
//! 先把所有节点设为 Opaque 跑一次仿真，记录每个节点同时使用再生器的峰值；
//! 然后在峰值最高的 N 个节点上各放 X 个再生器，其余节点变为透明节点。

use std::sync::Arc;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::SimRng;
use super::config::SimConfig;
use super::network_simulation::NetworkSimulation;
use crate::error::{ConfigError, ConfigResult};
use crate::net::{NodeId, NodeType, Topology};

/// 返回放置好再生器的全新拓扑
pub fn place_most_used(
    config: Arc<SimConfig>,
    topo: &Topology,
    n: usize,
    x: u32,
    load: f64,
    seed: u64,
) -> ConfigResult<Topology> {
    if n > topo.num_nodes() {
        return Err(ConfigError::Invalid(format!(
            "cannot place regenerators on {} of {} nodes",
            n,
            topo.num_nodes()
        )));
    }
    if config.rmsa.regenerators.is_none() {
        return Err(ConfigError::Invalid(
            "regenerator placement needs a regenerator assignment strategy".into(),
        ));
    }

    let mut opaque = topo.clone_fresh();
    for id in topo.node_ids() {
        opaque.node_mut(id).set_node_type(NodeType::Opaque);
    }
    let (_, used) = NetworkSimulation::new(config, opaque, load, seed)?.run_with_topology();

    // 同峰值的节点按随机顺序
    let mut ranking: Vec<NodeId> = used.node_ids().collect();
    let mut rng = SimRng::seed_from_u64(seed);
    rng.set_stream(2);
    ranking.shuffle(&mut rng);
    ranking.sort_by_key(|&id| std::cmp::Reverse(used.node(id).peak_used_regenerators()));
    debug!(?ranking, "按峰值使用量排序");

    let mut placed = topo.clone_fresh();
    for id in topo.node_ids() {
        let node = placed.node_mut(id);
        node.set_node_type(NodeType::Transparent);
        node.set_num_regenerators(0);
    }
    for &id in ranking.iter().take(n) {
        let node = placed.node_mut(id);
        node.set_node_type(NodeType::Translucent);
        node.set_num_regenerators(x);
    }
    info!(n, x, "再生器放置完成");
    Ok(placed)
}
