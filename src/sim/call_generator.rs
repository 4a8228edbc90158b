//! 呼叫生成器
//!
//! 泊松到达（速率 = 负载 / 平均持续时间），持续时间服从指数分布，
//! 端点在不同节点对上均匀选取，速率在速率菜单上均匀选取。

use rand::{Rng, SeedableRng};

use super::SimRng;
use super::time::SimTime;
use crate::net::NodeId;
use crate::phy::TransmissionBitrate;
use crate::rmsa::{Call, CallId};

#[derive(Debug, Clone)]
pub struct CallGenerator {
    rng: SimRng,
    num_nodes: usize,
    bitrates: Vec<TransmissionBitrate>,
    arrival_rate: f64,
    mean_holding_time: f64,
    /// 最近一次到达时刻（秒），以浮点累加避免舍入漂移
    clock: f64,
    next_id: u64,
}

impl CallGenerator {
    /// `load` 为 Erlang 数，`mean_holding_time` 以秒计
    pub fn new(
        num_nodes: usize,
        bitrates: Vec<TransmissionBitrate>,
        load: f64,
        mean_holding_time: f64,
        seed: u64,
    ) -> Self {
        assert!(num_nodes >= 2, "call generation needs at least two nodes");
        assert!(!bitrates.is_empty(), "bitrate menu is empty");
        Self {
            rng: SimRng::seed_from_u64(seed),
            num_nodes,
            bitrates,
            arrival_rate: load / mean_holding_time,
            mean_holding_time,
            clock: 0.0,
            next_id: 0,
        }
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    pub fn generated(&self) -> u64 {
        self.next_id
    }

    /// 指数分布采样：-ln(1 - u) / rate
    fn exponential(&mut self, rate: f64) -> f64 {
        let u: f64 = self.rng.random();
        -(1.0 - u).ln() / rate
    }

    /// 生成下一个呼叫，到达时间严格不早于上一个
    pub fn generate(&mut self) -> Call {
        self.clock += self.exponential(self.arrival_rate);
        let holding = self.exponential(1.0 / self.mean_holding_time);

        let origin = self.rng.random_range(0..self.num_nodes);
        let mut destination = self.rng.random_range(0..self.num_nodes - 1);
        if destination >= origin {
            destination += 1;
        }
        let bitrate = self.bitrates[self.rng.random_range(0..self.bitrates.len())];

        let id = CallId(self.next_id);
        self.next_id += 1;
        let arrival = SimTime::from_secs_f64(self.clock);
        // 持续时间至少 1ns，保证结束事件严格晚于到达事件
        let ending = SimTime::from_secs_f64(self.clock + holding).max(arrival + SimTime(1));
        Call::new(
            id,
            NodeId(origin),
            NodeId(destination),
            bitrate,
            arrival,
            ending,
        )
    }
}
