//! 传输质量判定
//!
//! 一段路径在某调制格式下可行，当且仅当：OSNR 不低于门限（开启 ASE 时）、
//! 沿途公共连续空闲频隙足够，以及（开启滤波器不理想性时）保留功率比例达标。

use super::segment::segment_signal;
use super::spectrum::max_contiguous;
use crate::net::{LinkId, Topology};
use crate::phy::{ModulationScheme, PhysicalParams, Signal, TransmissionBitrate};

/// 只看物理层：OSNR 与滤波
pub fn is_signal_feasible(
    signal: &Signal,
    scheme: &ModulationScheme,
    bitrate: TransmissionBitrate,
    phy: &PhysicalParams,
) -> bool {
    let osnr_ok = !phy.consider_ase_noise
        || signal.osnr().db() >= scheme.threshold_osnr(bitrate, phy).db();
    let filter_ok = !phy.consider_filter_imperfection
        || signal.retained_power_ratio() >= phy.power_ratio_threshold;
    osnr_ok && filter_ok
}

/// 物理层可行
pub fn is_physically_feasible(
    topo: &Topology,
    links: &[LinkId],
    scheme: &ModulationScheme,
    bitrate: TransmissionBitrate,
) -> bool {
    let phy = topo.phy();
    let width = scheme.num_slots(bitrate, phy);
    let signal = segment_signal(topo, links, width);
    is_signal_feasible(&signal, scheme, bitrate, phy)
}

/// 物理层可行且频谱足够
pub fn is_feasible(
    topo: &Topology,
    links: &[LinkId],
    scheme: &ModulationScheme,
    bitrate: TransmissionBitrate,
) -> bool {
    let width = scheme.num_slots(bitrate, topo.phy());
    max_contiguous(topo, links) >= width && is_physically_feasible(topo, links, scheme, bitrate)
}

/// 按频谱效率从高到低，返回第一个可行的调制格式。`schemes` 按效率升序排列。
pub fn most_efficient_scheme(
    topo: &Topology,
    links: &[LinkId],
    schemes: &[ModulationScheme],
    bitrate: TransmissionBitrate,
) -> Option<ModulationScheme> {
    schemes
        .iter()
        .rev()
        .find(|s| is_feasible(topo, links, s, bitrate))
        .copied()
}

/// 同上，但不考虑频谱占用
pub fn most_efficient_physical_scheme(
    topo: &Topology,
    links: &[LinkId],
    schemes: &[ModulationScheme],
    bitrate: TransmissionBitrate,
) -> Option<ModulationScheme> {
    schemes
        .iter()
        .rev()
        .find(|s| is_physically_feasible(topo, links, s, bitrate))
        .copied()
}
