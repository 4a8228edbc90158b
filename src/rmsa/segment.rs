//! 透明段
//!
//! 两个再生点（或端点）之间、使用同一调制格式的连续子路径。

use crate::net::{LinkId, NodeId, SlotWindow, Topology};
use crate::phy::{ModulationScheme, Signal};

#[derive(Debug, Clone, PartialEq)]
pub struct TransparentSegment {
    pub links: Vec<LinkId>,
    pub scheme: ModulationScheme,
    pub num_slots: usize,
    /// 分配频谱之后才有值
    pub window: Option<SlotWindow>,
    /// 在段末节点占用的再生器数（最后一段为 0）
    pub regenerators_at_end: u32,
}

impl TransparentSegment {
    pub fn new(links: Vec<LinkId>, scheme: ModulationScheme, num_slots: usize) -> Self {
        Self {
            links,
            scheme,
            num_slots,
            window: None,
            regenerators_at_end: 0,
        }
    }

    pub fn first_node(&self, topo: &Topology) -> NodeId {
        topo.link(self.links[0]).from()
    }

    pub fn last_node(&self, topo: &Topology) -> NodeId {
        topo.link(self.links[self.links.len() - 1]).to()
    }
}

/// 沿一段链路透明传输后的信号：源节点 add，逐链路传播，中间节点 bypass，末节点 drop。
pub fn segment_signal(topo: &Topology, links: &[LinkId], num_slots: usize) -> Signal {
    let phy = topo.phy();
    let mut signal = Signal::new(num_slots, phy);
    let Some(first) = links.first() else {
        return signal;
    };
    signal = topo.node(topo.link(*first).from()).add(signal, phy);
    for (i, &l) in links.iter().enumerate() {
        let link = topo.link(l);
        signal = link.bypass(signal, phy);
        let node = topo.node(link.to());
        signal = if i + 1 == links.len() {
            node.drop(signal, phy)
        } else {
            node.bypass(signal, phy)
        };
    }
    signal
}
