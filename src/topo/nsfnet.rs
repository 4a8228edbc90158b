//! NSFNet 拓扑构建（14 节点、21 条双向链路，长度单位 km）

use std::sync::Arc;

use crate::error::TopologyResult;
use crate::net::{NodeArchitecture, NodeId, NodeType, Topology};
use crate::phy::PhysicalParams;

/// 1 起始节点编号
const NSFNET_LINKS: [(usize, usize, f64); 21] = [
    (1, 2, 2100.0),
    (1, 3, 3000.0),
    (1, 8, 4800.0),
    (2, 3, 1200.0),
    (2, 4, 1500.0),
    (3, 6, 3600.0),
    (4, 5, 1200.0),
    (4, 11, 3900.0),
    (5, 6, 2400.0),
    (5, 7, 1200.0),
    (6, 10, 2100.0),
    (6, 14, 3600.0),
    (7, 8, 1500.0),
    (8, 9, 1500.0),
    (9, 10, 1500.0),
    (9, 12, 600.0),
    (9, 13, 600.0),
    (11, 12, 1200.0),
    (11, 13, 1500.0),
    (12, 14, 600.0),
    (13, 14, 300.0),
];

pub const NSFNET_NODES: usize = 14;

#[derive(Debug, Clone)]
pub struct NsfnetOpts {
    pub node_type: NodeType,
    pub architecture: NodeArchitecture,
    pub regenerators: u32,
}

impl Default for NsfnetOpts {
    fn default() -> Self {
        Self {
            node_type: NodeType::Transparent,
            architecture: NodeArchitecture::SwitchingSelect,
            regenerators: 0,
        }
    }
}

pub fn build_nsfnet(phy: Arc<PhysicalParams>, opts: &NsfnetOpts) -> TopologyResult<Topology> {
    let mut topo = Topology::new(phy);
    for _ in 0..NSFNET_NODES {
        topo.add_node(opts.node_type, opts.architecture, opts.regenerators);
    }
    for (a, b, len) in NSFNET_LINKS {
        topo.connect_bidirectional(NodeId(a - 1), NodeId(b - 1), len)?;
    }
    Ok(topo)
}
