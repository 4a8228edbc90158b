//! 标识符类型
//!
//! 节点和链路都以 arena 下标标识；拓扑文件中的节点 ID 为下标 + 1。

use std::fmt;

/// 节点标识符（0 起始的 arena 下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// 链路标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

impl NodeId {
    /// 拓扑文件中使用的 1 起始编号
    pub fn label(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.label())
    }
}
