//! 阻塞统计

use std::collections::BTreeMap;

use serde::Serialize;

use crate::rmsa::{BlockReason, Call, CallStatus};

#[derive(Debug, Default, Clone)]
pub struct SimStats {
    pub calls: u64,
    pub implemented: u64,
    pub blocked: u64,
    pub blocked_by_reason: BTreeMap<BlockReason, u64>,
    pub requested_gbps: f64,
    pub blocked_gbps: f64,
}

impl SimStats {
    /// 记录一次已评估呼叫的结果
    pub fn record(&mut self, call: &Call) {
        self.calls += 1;
        self.requested_gbps += call.bitrate().gbps();
        match call.status() {
            CallStatus::Implemented => self.implemented += 1,
            CallStatus::Blocked => {
                self.blocked += 1;
                self.blocked_gbps += call.bitrate().gbps();
                if let Some(reason) = call.block_reason() {
                    *self.blocked_by_reason.entry(reason).or_insert(0) += 1;
                }
            }
            CallStatus::NotEvaluated => {
                panic!("call {:?} recorded before evaluation", call.id())
            }
        }
    }

    pub fn blocking_probability(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.blocked as f64 / self.calls as f64
        }
    }

    pub fn bitrate_blocking_probability(&self) -> f64 {
        if self.requested_gbps <= 0.0 {
            0.0
        } else {
            self.blocked_gbps / self.requested_gbps
        }
    }
}

/// 节点的再生器使用情况（节点编号 1 起始）
#[derive(Debug, Clone, Serialize)]
pub struct NodeUsage {
    pub node: usize,
    pub peak_regenerators: u32,
    pub total_regenerators: u64,
}

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub load: f64,
    pub seed: u64,
    pub calls: u64,
    pub blocked: u64,
    pub blocking_probability: f64,
    pub bitrate_blocking_probability: f64,
    pub blocked_by_reason: BTreeMap<String, u64>,
    pub node_usage: Vec<NodeUsage>,
    pub capex: f64,
    pub opex: f64,
    pub final_time_secs: f64,
}
