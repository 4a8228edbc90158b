//! 节点类型
//!
//! 定义光网络节点：节点类型（决定再生器容量）、节点架构（决定器件链形状）、
//! 相邻链路列表，以及带使用计数的再生器池。

use super::id::{LinkId, NodeId};
use crate::phy::{AmplifierKind, Device, Gain, PhysicalParams, Signal, propagate};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// 无再生器
    Transparent,
    /// 有限数量的再生器
    Translucent,
    /// 再生器数量不受限
    Opaque,
}

impl NodeType {
    /// 拓扑文件中的关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            NodeType::Transparent => "TransparentNode",
            NodeType::Translucent => "TranslucentNode",
            NodeType::Opaque => "OpaqueNode",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "TransparentNode" => Some(NodeType::Transparent),
            "TranslucentNode" => Some(NodeType::Translucent),
            "OpaqueNode" => Some(NodeType::Opaque),
            _ => None,
        }
    }
}

/// 节点架构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeArchitecture {
    /// 入口 SSS + 出口 SSS
    SwitchingSelect,
    /// 入口功分器 + 出口 SSS
    BroadcastAndSelect,
}

impl NodeArchitecture {
    pub fn keyword(&self) -> &'static str {
        match self {
            NodeArchitecture::SwitchingSelect => "SwitchingSelect",
            NodeArchitecture::BroadcastAndSelect => "BroadcastAndSelect",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "SwitchingSelect" | "SS" => Some(NodeArchitecture::SwitchingSelect),
            "BroadcastAndSelect" | "BS" => Some(NodeArchitecture::BroadcastAndSelect),
            _ => None,
        }
    }
}

/// 光网络节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    node_type: NodeType,
    architecture: NodeArchitecture,
    num_regenerators: u32,
    used_regenerators: u32,
    peak_used_regenerators: u32,
    total_requested_regenerators: u64,
    active: bool,
    pub(crate) neighbours: Vec<NodeId>,
    pub(crate) outgoing: Vec<LinkId>,
    pub(crate) incoming: Vec<LinkId>,
    devices: Vec<Device>,
}

impl Node {
    /// 创建新节点（还没有相邻链路）
    pub fn new(
        id: NodeId,
        node_type: NodeType,
        architecture: NodeArchitecture,
        num_regenerators: u32,
        phy: &PhysicalParams,
    ) -> Self {
        let mut node = Self {
            id,
            node_type,
            architecture,
            num_regenerators,
            used_regenerators: 0,
            peak_used_regenerators: 0,
            total_requested_regenerators: 0,
            active: true,
            neighbours: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            devices: Vec::new(),
        };
        node.rebuild_devices(phy);
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn architecture(&self) -> NodeArchitecture {
        self.architecture
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn neighbours(&self) -> &[NodeId] {
        &self.neighbours
    }

    pub fn outgoing_links(&self) -> &[LinkId] {
        &self.outgoing
    }

    pub fn incoming_links(&self) -> &[LinkId] {
        &self.incoming
    }

    pub fn fan_out(&self) -> usize {
        self.neighbours.len()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// 按架构与当前扇出重建器件链：入口交换单元 -> 出口 SSS -> 功放。
    pub(crate) fn rebuild_devices(&mut self, phy: &PhysicalParams) {
        let entry = match self.architecture {
            NodeArchitecture::SwitchingSelect => Device::sss(phy),
            NodeArchitecture::BroadcastAndSelect => Device::splitter(self.fan_out()),
        };
        let exit = Device::sss(phy);
        let booster = Device::amplifier(AmplifierKind::Booster, -exit.gain(), phy);
        self.devices = vec![entry, exit, booster];
    }

    /// 入口交换单元的损耗（由前置放大器补偿）
    pub fn entry_loss(&self) -> Gain {
        self.devices
            .iter()
            .find(|d| d.is_switching_element())
            .map(Device::gain)
            .unwrap_or(Gain::UNITY)
    }

    fn switch_index(&self) -> usize {
        self.devices
            .iter()
            .position(Device::is_switching_element)
            .unwrap_or(0)
    }

    /// 中间节点：穿过整条器件链
    pub fn bypass(&self, signal: Signal, phy: &PhysicalParams) -> Signal {
        trace!(node = %self.id, "bypass");
        propagate(&self.devices, signal, phy)
    }

    /// 下路：到（并包含）第一个交换单元为止
    pub fn drop(&self, signal: Signal, phy: &PhysicalParams) -> Signal {
        trace!(node = %self.id, "drop");
        propagate(&self.devices[..=self.switch_index()], signal, phy)
    }

    /// 上路：从第一个交换单元之后开始
    pub fn add(&self, signal: Signal, phy: &PhysicalParams) -> Signal {
        trace!(node = %self.id, "add");
        propagate(&self.devices[self.switch_index() + 1..], signal, phy)
    }

    /// 再生器容量；`None` 表示不受限（Opaque）
    pub fn regenerator_capacity(&self) -> Option<u32> {
        match self.node_type {
            NodeType::Opaque => None,
            _ => Some(self.num_regenerators),
        }
    }

    pub fn num_regenerators(&self) -> u32 {
        self.num_regenerators
    }

    pub fn used_regenerators(&self) -> u32 {
        self.used_regenerators
    }

    pub fn available_regenerators(&self) -> u32 {
        match self.regenerator_capacity() {
            None => u32::MAX,
            Some(cap) => cap.saturating_sub(self.used_regenerators),
        }
    }

    pub fn has_available_regenerators(&self, needed: u32) -> bool {
        self.available_regenerators() >= needed
    }

    pub fn peak_used_regenerators(&self) -> u32 {
        self.peak_used_regenerators
    }

    pub fn total_requested_regenerators(&self) -> u64 {
        self.total_requested_regenerators
    }

    /// 占用再生器。超过容量属于调用方错误。
    pub fn request_regenerators(&mut self, n: u32) {
        assert!(
            self.node_type == NodeType::Opaque
                || self.used_regenerators + n <= self.num_regenerators,
            "node {} requested {} regenerators, only {} available",
            self.id,
            n,
            self.available_regenerators()
        );
        self.used_regenerators += n;
        self.total_requested_regenerators += n as u64;
        self.peak_used_regenerators = self.peak_used_regenerators.max(self.used_regenerators);
    }

    /// 释放再生器。释放多于已占用的数量属于调用方错误。
    pub fn free_regenerators(&mut self, n: u32) {
        assert!(
            self.used_regenerators >= n,
            "node {} freed {} regenerators, only {} in use",
            self.id,
            n,
            self.used_regenerators
        );
        self.used_regenerators -= n;
    }

    pub fn set_num_regenerators(&mut self, n: u32) {
        self.num_regenerators = n;
        self.used_regenerators = 0;
    }

    pub fn set_node_type(&mut self, node_type: NodeType) {
        self.node_type = node_type;
    }

    /// 清零使用计数与统计（用于独立试验）
    pub fn reset_usage(&mut self) {
        self.used_regenerators = 0;
        self.peak_used_regenerators = 0;
        self.total_requested_regenerators = 0;
    }
}
