//! 光网络结构模块
//!
//! 此模块包含光网络的静态结构与可变资源状态：节点（再生器池）、链路（频隙数组）、
//! 拓扑（节点/链路的 arena）以及 CapEx/OpEx 成本模型。

// 子模块声明
mod cost;
mod id;
mod link;
mod node;
mod slot;
mod topology;

// 重新导出公共接口
pub use cost::CostModel;
pub use id::{LinkId, NodeId};
pub use link::Link;
#[cfg(test)]
pub(crate) use link::inline_amplifier_count;
pub use node::{Node, NodeArchitecture, NodeType};
pub use slot::{Slot, SlotWindow};
pub use topology::Topology;
