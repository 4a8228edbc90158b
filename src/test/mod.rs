mod call_generator;
mod network_simulation;
mod signal;
mod simulator;
mod spectrum;
mod sweep;
mod units;

use std::sync::Arc;

use crate::net::{NodeArchitecture, NodeId, NodeType, Topology};
use crate::phy::PhysicalParams;

/// ASE 关闭、每条链路 `slots` 个频隙的物理参数
pub(crate) fn quiet_phy(slots: usize) -> PhysicalParams {
    PhysicalParams {
        consider_ase_noise: false,
        slots_per_link: slots,
        ..PhysicalParams::default()
    }
}

/// 双向线形拓扑 n1 - n2 - ... - nk，每段长度相同
pub(crate) fn line(
    phy: PhysicalParams,
    nodes: usize,
    length_km: f64,
    node_type: NodeType,
) -> Topology {
    let mut topo = Topology::new(Arc::new(phy));
    let ids: Vec<NodeId> = (0..nodes)
        .map(|_| topo.add_node(node_type, NodeArchitecture::SwitchingSelect, 0))
        .collect();
    for w in ids.windows(2) {
        topo.connect_bidirectional(w[0], w[1], length_km)
            .expect("line link");
    }
    topo
}
