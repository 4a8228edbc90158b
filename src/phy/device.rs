//! 光器件
//!
//! 每个器件对信号做三件事：乘以增益、叠加噪声功率、（可选）施加频谱传递函数。
//! 节点/链路的 bypass、add、drop 只是同一条有序器件序列的不同切片。

use super::params::PhysicalParams;
use super::signal::Signal;
use super::units::{Gain, Power};

/// 放大器在链路/节点中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplifierKind {
    /// 链路中的在线放大器，补偿前一段光纤损耗
    InLine,
    /// 链路末端（节点入口）前置放大器
    Pre,
    /// 节点出口功率放大器
    Booster,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    Fiber { length_km: f64, loss: Gain },
    Amplifier {
        kind: AmplifierKind,
        gain: Gain,
        noise: Power,
    },
    /// 波长选择开关（Spectrum Selective Switch）
    Sss { loss: Gain },
    /// 广播-选择架构中的功分器，损耗取决于节点扇出
    Splitter { ports: usize, loss: Gain },
}

impl Device {
    pub fn fiber(length_km: f64, phy: &PhysicalParams) -> Self {
        Device::Fiber {
            length_km,
            loss: phy.fiber_loss(length_km),
        }
    }

    pub fn amplifier(kind: AmplifierKind, gain: Gain, phy: &PhysicalParams) -> Self {
        Device::Amplifier {
            kind,
            gain,
            noise: phy.ase_noise(gain),
        }
    }

    pub fn sss(phy: &PhysicalParams) -> Self {
        Device::Sss {
            loss: phy.sss_loss(),
        }
    }

    /// 功分器：1/(N+1) 的线性损耗
    pub fn splitter(fan_out: usize) -> Self {
        Device::Splitter {
            ports: fan_out,
            loss: Gain::from_linear(1.0 / (fan_out as f64 + 1.0)),
        }
    }

    pub fn gain(&self) -> Gain {
        match self {
            Device::Fiber { loss, .. } => *loss,
            Device::Amplifier { gain, .. } => *gain,
            Device::Sss { loss } => *loss,
            Device::Splitter { loss, .. } => *loss,
        }
    }

    pub fn noise(&self) -> Power {
        match self {
            Device::Amplifier { noise, .. } => *noise,
            _ => Power::ZERO,
        }
    }

    /// 交换单元（drop/add 的分界点）
    pub fn is_switching_element(&self) -> bool {
        matches!(self, Device::Sss { .. } | Device::Splitter { .. })
    }

    /// 只有 SSS 带有非理想通带
    pub fn filters(&self) -> bool {
        matches!(self, Device::Sss { .. })
    }

    pub fn is_amplifier(&self) -> bool {
        matches!(self, Device::Amplifier { .. })
    }
}

/// 让信号依次穿过一段器件序列
pub fn propagate(devices: &[Device], mut signal: Signal, phy: &PhysicalParams) -> Signal {
    for dev in devices {
        signal.apply(dev, phy);
    }
    signal
}
