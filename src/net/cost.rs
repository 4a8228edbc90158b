//! CapEx / OpEx 成本模型

use serde::{Deserialize, Serialize};

use crate::phy::Device;

/// 器件成本表（单位为归一化成本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// (最大端口数, CapEx)；超出最后一档时按最后一档计价
    pub sss_capex_tiers: Vec<(usize, f64)>,
    pub sss_opex: f64,
    pub splitter_capex: f64,
    pub splitter_opex: f64,
    pub amplifier_capex: f64,
    pub amplifier_opex: f64,
    pub regenerator_capex: f64,
    pub regenerator_opex: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            sss_capex_tiers: vec![(4, 2.35), (8, 4.70), (20, 7.05), (40, 10.58)],
            sss_opex: 0.2,
            splitter_capex: 0.05,
            splitter_opex: 0.2,
            amplifier_capex: 0.1,
            amplifier_opex: 0.05,
            regenerator_capex: 1.0,
            regenerator_opex: 0.5,
        }
    }
}

impl CostModel {
    pub fn sss_capex(&self, ports: usize) -> f64 {
        self.sss_capex_tiers
            .iter()
            .find(|(max, _)| ports <= *max)
            .or(self.sss_capex_tiers.last())
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    }

    /// 单个器件的 CapEx；`ports` 为 SSS 端口数
    pub fn device_capex(&self, device: &Device, ports: usize) -> f64 {
        match device {
            Device::Fiber { .. } => 0.0,
            Device::Amplifier { .. } => self.amplifier_capex,
            Device::Sss { .. } => self.sss_capex(ports),
            Device::Splitter { .. } => self.splitter_capex,
        }
    }

    pub fn device_opex(&self, device: &Device) -> f64 {
        match device {
            Device::Fiber { .. } => 0.0,
            Device::Amplifier { .. } => self.amplifier_opex,
            Device::Sss { .. } => self.sss_opex,
            Device::Splitter { .. } => self.splitter_opex,
        }
    }
}
