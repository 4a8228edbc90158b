//! 错误类型
//!
//! 只覆盖构造期错误（拓扑、配置）。单个呼叫的不可行（无路由、无频谱……）不是错误，
//! 而是 `BlockReason`；资源不变量被破坏则直接 panic。

use thiserror::Error;

/// 拓扑构造/解析错误
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("duplicate node id {0}")]
    DuplicateNode(usize),

    #[error("node ids must be sequential: expected {expected}, got {got}")]
    NonSequentialNode { expected: usize, got: usize },

    #[error("link references unknown node {0}")]
    UnknownNode(usize),

    #[error("link {from} -> {to} has invalid length {length}")]
    InvalidLength { from: usize, to: usize, length: f64 },

    #[error("link {0} -> {0} is a self loop")]
    SelfLoop(usize),

    #[error("duplicate link {from} -> {to}")]
    DuplicateLink { from: usize, to: usize },

    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 仿真配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid simulation spec: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
