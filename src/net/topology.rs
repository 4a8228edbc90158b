//! 网络拓扑管理
//!
//! 拓扑是节点与链路的 arena：链路以节点 ID 引用端点，节点以链路 ID 引用相邻链路，
//! 没有相互持有的引用。可变资源状态（频隙、再生器计数）也都保存在这里，
//! 因此独立试验只需要 `clone_fresh()` 一份副本。

use std::collections::HashMap;
use std::sync::Arc;

use super::cost::CostModel;
use super::id::{LinkId, NodeId};
use super::link::Link;
use super::node::{Node, NodeArchitecture, NodeType};
use crate::error::{TopologyError, TopologyResult};
use crate::phy::{PhysicalParams, Power};
use tracing::{debug, trace};

/// 光网络拓扑
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    links: Vec<Link>,
    edges: HashMap<(NodeId, NodeId), LinkId>,
    phy: Arc<PhysicalParams>,
}

impl Topology {
    pub fn new(phy: Arc<PhysicalParams>) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            edges: HashMap::new(),
            phy,
        }
    }

    pub fn phy(&self) -> &PhysicalParams {
        &self.phy
    }

    pub fn phy_arc(&self) -> Arc<PhysicalParams> {
        Arc::clone(&self.phy)
    }

    /// 添加节点，ID 按插入顺序分配
    pub fn add_node(
        &mut self,
        node_type: NodeType,
        architecture: NodeArchitecture,
        num_regenerators: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(
            id,
            node_type,
            architecture,
            num_regenerators,
            &self.phy,
        ));
        trace!(node = %id, ?node_type, ?architecture, num_regenerators, "添加节点");
        id
    }

    /// 添加单向链路
    ///
    /// 链路同时登记到 `from` 的出链路与 `to` 的入链路列表中。`from` 的扇出变化后
    /// 会重建其器件链，并更新所有进入 `from` 的链路的前置放大器。
    #[tracing::instrument(skip(self), fields(from = %from, to = %to))]
    pub fn add_link(&mut self, from: NodeId, to: NodeId, length_km: f64) -> TopologyResult<LinkId> {
        for n in [from, to] {
            if n.0 >= self.nodes.len() {
                return Err(TopologyError::UnknownNode(n.label()));
            }
        }
        if from == to {
            return Err(TopologyError::SelfLoop(from.label()));
        }
        if !length_km.is_finite() || length_km < 0.0 {
            return Err(TopologyError::InvalidLength {
                from: from.label(),
                to: to.label(),
                length: length_km,
            });
        }
        if self.edges.contains_key(&(from, to)) {
            return Err(TopologyError::DuplicateLink {
                from: from.label(),
                to: to.label(),
            });
        }

        let id = LinkId(self.links.len());
        let entry_loss = self.nodes[to.0].entry_loss();
        self.links
            .push(Link::new(id, from, to, length_km, entry_loss, &self.phy));
        self.edges.insert((from, to), id);

        let origin = &mut self.nodes[from.0];
        origin.outgoing.push(id);
        if !origin.neighbours.contains(&to) {
            origin.neighbours.push(to);
        }
        origin.rebuild_devices(&self.phy);
        self.nodes[to.0].incoming.push(id);

        // 入口损耗可能随扇出改变
        let entry_loss = self.nodes[from.0].entry_loss();
        let incoming = self.nodes[from.0].incoming.clone();
        for l in incoming {
            self.links[l.0].set_destination_entry_loss(entry_loss, &self.phy);
        }

        debug!(link = ?id, length_km, "添加链路");
        Ok(id)
    }

    /// 添加一对方向相反、长度相同的链路
    pub fn connect_bidirectional(
        &mut self,
        a: NodeId,
        b: NodeId,
        length_km: f64,
    ) -> TopologyResult<(LinkId, LinkId)> {
        let ab = self.add_link(a, b, length_km)?;
        let ba = self.add_link(b, a, length_km)?;
        Ok((ab, ba))
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.links[id.0]
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn link_between(&self, from: NodeId, to: NodeId) -> Option<LinkId> {
        self.edges.get(&(from, to)).copied()
    }

    pub fn longest_link_km(&self) -> f64 {
        self.links
            .iter()
            .map(Link::length_km)
            .fold(0.0, f64::max)
    }

    /// 所有链路中最大的自身噪声，用于归一化
    pub fn max_link_noise(&self) -> Power {
        self.links
            .iter()
            .map(Link::noise)
            .fold(Power::ZERO, |a, b| if b.watts() > a.watts() { b } else { a })
    }

    pub fn set_link_active(&mut self, id: LinkId, active: bool) {
        self.links[id.0].set_active(active);
    }

    pub fn set_node_active(&mut self, id: NodeId, active: bool) {
        self.nodes[id.0].set_active(active);
    }

    /// 复制一份结构相同、资源全部空闲的拓扑
    pub fn clone_fresh(&self) -> Self {
        let mut t = self.clone();
        t.reset_usage();
        t
    }

    /// 释放所有频隙并清零再生器计数
    pub fn reset_usage(&mut self) {
        for link in &mut self.links {
            link.reset_slots();
        }
        for node in &mut self.nodes {
            node.reset_usage();
        }
    }

    /// 链路序列经过的节点序列（含两端）
    pub fn route_nodes(&self, route: &[LinkId]) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(route.len() + 1);
        if let Some(first) = route.first() {
            nodes.push(self.links[first.0].from());
        }
        nodes.extend(route.iter().map(|l| self.links[l.0].to()));
        nodes
    }

    /// 总 CapEx：每个节点 再生器数 * 单价 + 扇出 * 器件 CapEx 之和，加上链路上的放大器。
    /// SSS 按端口数（扇出 + 本地上下路端口）定价。
    pub fn capex(&self, costs: &CostModel) -> f64 {
        let nodes: f64 = self
            .nodes
            .iter()
            .map(|n| {
                let devices: f64 = n
                    .devices()
                    .iter()
                    .map(|d| costs.device_capex(d, n.fan_out() + 1))
                    .sum();
                n.num_regenerators() as f64 * costs.regenerator_capex + n.fan_out() as f64 * devices
            })
            .sum();
        let links: f64 = self
            .links
            .iter()
            .flat_map(|l| l.devices())
            .map(|d| costs.device_capex(d, 0))
            .sum();
        nodes + links
    }

    /// 总 OpEx，结构同 `capex`
    pub fn opex(&self, costs: &CostModel) -> f64 {
        let nodes: f64 = self
            .nodes
            .iter()
            .map(|n| {
                let devices: f64 = n.devices().iter().map(|d| costs.device_opex(d)).sum();
                n.num_regenerators() as f64 * costs.regenerator_opex + n.fan_out() as f64 * devices
            })
            .sum();
        let links: f64 = self
            .links
            .iter()
            .flat_map(|l| l.devices())
            .map(|d| costs.device_opex(d))
            .sum();
        nodes + links
    }
}
