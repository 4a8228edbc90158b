//! 环形拓扑构建

use std::sync::Arc;

use crate::error::TopologyResult;
use crate::net::{NodeArchitecture, NodeId, NodeType, Topology};
use crate::phy::PhysicalParams;

/// 环形拓扑配置选项
#[derive(Debug, Clone)]
pub struct RingOpts {
    pub nodes: usize,
    pub length_km: f64,
    pub node_type: NodeType,
    pub architecture: NodeArchitecture,
    pub regenerators: u32,
}

impl Default for RingOpts {
    fn default() -> Self {
        Self {
            nodes: 4,
            length_km: 100.0,
            node_type: NodeType::Transparent,
            architecture: NodeArchitecture::SwitchingSelect,
            regenerators: 0,
        }
    }
}

/// 构建双向环：n0 <-> n1 <-> ... <-> n(k-1) <-> n0
///
/// 链路插入顺序为 (i -> i+1, i+1 -> i)，i 从 0 开始。
pub fn build_ring(phy: Arc<PhysicalParams>, opts: &RingOpts) -> TopologyResult<Topology> {
    let mut topo = Topology::new(phy);
    let ids: Vec<NodeId> = (0..opts.nodes)
        .map(|_| topo.add_node(opts.node_type, opts.architecture, opts.regenerators))
        .collect();
    if ids.len() < 2 {
        return Ok(topo);
    }
    // 两个节点的"环"只有一对链路
    let edges = if ids.len() == 2 { 1 } else { ids.len() };
    for i in 0..edges {
        let a = ids[i];
        let b = ids[(i + 1) % ids.len()];
        topo.connect_bidirectional(a, b, opts.length_km)?;
    }
    Ok(topo)
}
