//! 物理层参数
//!
//! 所有"全局开关"（ASE 噪声、滤波器不理想性）都集中在这个不可变配置里，
//! 由调用方显式传入，而不是进程级可变状态。

use serde::{Deserialize, Serialize};

use super::units::{Gain, Power};

/// 普朗克常数（J·s）
pub const PLANCK: f64 = 6.626_070_15e-34;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalParams {
    /// 发射端信号功率（dBm）
    pub input_power_dbm: f64,
    /// 发射端 OSNR（dB）
    pub input_osnr_db: f64,
    pub fiber_attenuation_db_per_km: f64,
    /// 在线放大器的平均间距（km）
    pub amplifier_spacing_km: f64,
    pub amplifier_noise_figure_db: f64,
    pub sss_loss_db: f64,
    /// OSNR 参考带宽（Hz）
    pub reference_bandwidth_hz: f64,
    pub carrier_frequency_hz: f64,
    pub polarizations: f64,
    /// 单个频隙带宽（Hz）
    pub slot_bandwidth_hz: f64,
    pub slots_per_link: usize,
    pub consider_ase_noise: bool,
    pub consider_filter_imperfection: bool,
    pub sss_filter_order: u32,
    pub tx_filter_order: u32,
    pub samples_per_slot: usize,
    /// 滤波后保留功率比例的下限
    pub power_ratio_threshold: f64,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            input_power_dbm: 0.0,
            input_osnr_db: 30.0,
            fiber_attenuation_db_per_km: 0.2,
            amplifier_spacing_km: 80.0,
            amplifier_noise_figure_db: 5.0,
            sss_loss_db: 5.0,
            reference_bandwidth_hz: 12.5e9,
            carrier_frequency_hz: 193.4e12,
            polarizations: 2.0,
            slot_bandwidth_hz: 12.5e9,
            slots_per_link: 64,
            consider_ase_noise: true,
            consider_filter_imperfection: false,
            sss_filter_order: 4,
            tx_filter_order: 1,
            samples_per_slot: 100,
            power_ratio_threshold: 0.5,
        }
    }
}

impl PhysicalParams {
    pub fn input_power(&self) -> Power {
        Power::from_dbm(self.input_power_dbm)
    }

    pub fn input_osnr(&self) -> Gain {
        Gain::from_db(self.input_osnr_db)
    }

    pub fn sss_loss(&self) -> Gain {
        Gain::from_db(-self.sss_loss_db)
    }

    /// 光纤段损耗（负增益）
    pub fn fiber_loss(&self, length_km: f64) -> Gain {
        Gain::from_db(-self.fiber_attenuation_db_per_km * length_km)
    }

    /// 放大器的 ASE 噪声功率：0.5 * npol * h * f * Bref * NF * (G - 1)。
    ///
    /// 关闭 ASE 建模时返回 0。
    pub fn ase_noise(&self, gain: Gain) -> Power {
        if !self.consider_ase_noise {
            return Power::ZERO;
        }
        let g = gain.linear();
        if g <= 1.0 {
            return Power::ZERO;
        }
        let nf = Gain::from_db(self.amplifier_noise_figure_db).linear();
        Power::from_watts(
            0.5 * self.polarizations
                * PLANCK
                * self.carrier_frequency_hz
                * self.reference_bandwidth_hz
                * nf
                * (g - 1.0),
        )
    }
}
