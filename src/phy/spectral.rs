//! 频谱密度与高斯传递函数
//!
//! 只在开启滤波器不理想性建模时使用。频谱以载波为中心、在信号占用带宽内等间隔采样。

use super::params::PhysicalParams;

#[derive(Debug, Clone)]
pub struct SpectralDensity {
    /// 相对载波的频率偏移（Hz）
    offsets: Vec<f64>,
    bandwidth_hz: f64,
    initial: Vec<f64>,
    current: Vec<f64>,
}

/// 超高斯形状：2^(-scale * (2Δf/B)^(2n))
fn super_gaussian(offset: f64, bandwidth: f64, order: u32, scale: f64) -> f64 {
    let x = 2.0 * offset / bandwidth;
    (-scale * x.powi(2 * order as i32)).exp2()
}

impl SpectralDensity {
    pub fn new(num_slots: usize, phy: &PhysicalParams) -> Self {
        let num_slots = num_slots.max(1);
        let bandwidth_hz = num_slots as f64 * phy.slot_bandwidth_hz;
        let samples = (phy.samples_per_slot.max(1) * num_slots).max(2) + 1;
        let step = bandwidth_hz / (samples - 1) as f64;
        let offsets: Vec<f64> = (0..samples)
            .map(|i| -bandwidth_hz / 2.0 + step * i as f64)
            .collect();
        let initial: Vec<f64> = offsets
            .iter()
            .map(|&f| super_gaussian(f, bandwidth_hz, phy.tx_filter_order, 1.0))
            .collect();
        Self {
            current: initial.clone(),
            offsets,
            bandwidth_hz,
            initial,
        }
    }

    /// 乘以一个 `order` 阶高斯滤波器的功率传递函数
    pub fn filter(&mut self, order: u32) {
        for (d, &f) in self.current.iter_mut().zip(&self.offsets) {
            *d *= super_gaussian(f, self.bandwidth_hz, order, 2.0);
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.current
    }

    /// 当前积分功率 / 发射时积分功率
    pub fn retained_ratio(&self) -> f64 {
        let step = self.bandwidth_hz / (self.offsets.len() - 1) as f64;
        let before = trapezoid(&self.initial, step);
        if before <= 0.0 {
            return 0.0;
        }
        trapezoid(&self.current, step) / before
    }
}

/// 等间隔采样的梯形积分
pub fn trapezoid(samples: &[f64], step: f64) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let inner: f64 = samples[1..samples.len() - 1].iter().sum();
    step * (inner + 0.5 * (samples[0] + samples[samples.len() - 1]))
}
