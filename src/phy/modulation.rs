//! 调制格式与传输速率
//!
//! OSNR 门限与所需频隙数都由 (调制格式, 速率) 推导得出，而不是查表。

use std::cmp::Ordering;
use std::fmt;

use super::params::PhysicalParams;
use super::units::Gain;

/// 传输速率（bit/s）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TransmissionBitrate(f64);

impl TransmissionBitrate {
    pub fn from_bps(bps: f64) -> Self {
        Self(bps)
    }

    pub fn from_gbps(gbps: f64) -> Self {
        Self(gbps * 1e9)
    }

    pub fn bps(&self) -> f64 {
        self.0
    }

    pub fn gbps(&self) -> f64 {
        self.0 / 1e9
    }
}

impl fmt::Display for TransmissionBitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Gbps", self.gbps())
    }
}

/// M-QAM 调制格式：(星座点数 M, 每比特最小 SNR)
///
/// 排序按频谱效率（log2 M）升序。
#[derive(Debug, Clone, Copy)]
pub struct ModulationScheme {
    m: u32,
    snr_per_bit: Gain,
}

impl ModulationScheme {
    pub fn new(m: u32, snr_per_bit: Gain) -> Self {
        Self { m, snr_per_bit }
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn snr_per_bit(&self) -> Gain {
        self.snr_per_bit
    }

    pub fn bits_per_symbol(&self) -> f64 {
        (self.m as f64).log2()
    }

    /// OSNR 门限：(Rb / (2 Bref)) * SNRb（线性域）
    pub fn threshold_osnr(&self, bitrate: TransmissionBitrate, phy: &PhysicalParams) -> Gain {
        Gain::from_linear(
            bitrate.bps() / (2.0 * phy.reference_bandwidth_hz) * self.snr_per_bit.linear(),
        )
    }

    /// 所需频隙数：ceil(Rb / (2 log2(M) Bslot))，双偏振。
    pub fn num_slots(&self, bitrate: TransmissionBitrate, phy: &PhysicalParams) -> usize {
        let per_slot = 2.0 * self.bits_per_symbol() * phy.slot_bandwidth_hz;
        (bitrate.bps() / per_slot).ceil().max(1.0) as usize
    }
}

impl PartialEq for ModulationScheme {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ModulationScheme {}

impl Ord for ModulationScheme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.m
            .cmp(&other.m)
            .then_with(|| self.snr_per_bit.db().total_cmp(&other.snr_per_bit.db()))
    }
}

impl PartialOrd for ModulationScheme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ModulationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-QAM", self.m)
    }
}

/// 默认调制格式集合（按频谱效率升序）
pub fn default_schemes() -> Vec<ModulationScheme> {
    vec![
        ModulationScheme::new(4, Gain::from_db(6.8)),
        ModulationScheme::new(16, Gain::from_db(10.5)),
        ModulationScheme::new(64, Gain::from_db(14.8)),
    ]
}

/// 默认速率菜单
pub fn default_bitrates() -> Vec<TransmissionBitrate> {
    [10.0, 40.0, 100.0, 160.0, 400.0]
        .into_iter()
        .map(TransmissionBitrate::from_gbps)
        .collect()
}
