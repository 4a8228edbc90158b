//! 光信号
//!
//! 信号是一个瞬态值：携带信号功率、累积噪声功率，以及（开启滤波器不理想性时）
//! 采样得到的频谱密度。它不会被持久化。

use super::device::Device;
use super::params::PhysicalParams;
use super::spectral::SpectralDensity;
use super::units::{Gain, Power};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Signal {
    num_slots: usize,
    power: Power,
    noise: Power,
    spectrum: Option<SpectralDensity>,
}

impl Signal {
    /// 以发射端功率/OSNR 初始化一个占用 `num_slots` 个频隙的信号
    pub fn new(num_slots: usize, phy: &PhysicalParams) -> Self {
        let power = phy.input_power();
        let noise = power * (-phy.input_osnr());
        let spectrum = phy
            .consider_filter_imperfection
            .then(|| SpectralDensity::new(num_slots, phy));
        Self {
            num_slots,
            power,
            noise,
            spectrum,
        }
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    pub fn power(&self) -> Power {
        self.power
    }

    pub fn noise(&self) -> Power {
        self.noise
    }

    /// 施加一个器件：增益 -> 噪声 -> 传递函数
    pub fn apply(&mut self, dev: &Device, phy: &PhysicalParams) {
        let g = dev.gain();
        self.power *= g;
        self.noise *= g;
        self.noise += dev.noise();
        if dev.filters() {
            if let Some(spec) = self.spectrum.as_mut() {
                spec.filter(phy.sss_filter_order);
            }
        }
        trace!(
            device = ?dev,
            power_dbm = self.power.dbm(),
            noise_dbm = self.noise.dbm(),
            "信号穿过器件"
        );
    }

    /// OSNR = 信号功率(dBm) - 噪声功率(dBm)
    pub fn osnr(&self) -> Gain {
        Gain::from_db(self.power.dbm() - self.noise.dbm())
    }

    /// 经过所有滤波后保留的功率比例；未建模滤波时恒为 1。
    pub fn retained_power_ratio(&self) -> f64 {
        self.spectrum
            .as_ref()
            .map(SpectralDensity::retained_ratio)
            .unwrap_or(1.0)
    }
}
