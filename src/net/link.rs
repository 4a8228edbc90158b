//! 光链路
//!
//! 定义单向光纤链路：固定数量的频隙数组、在线放大器链和末端前置放大器。

use super::id::{LinkId, NodeId};
use super::slot::{Slot, SlotWindow};
use crate::phy::{AmplifierKind, Device, Gain, PhysicalParams, Power, Signal, propagate};
use tracing::trace;

/// 单向光纤链路
#[derive(Debug, Clone)]
pub struct Link {
    id: LinkId,
    from: NodeId,
    to: NodeId,
    length_km: f64,
    slots: Vec<Slot>,
    devices: Vec<Device>,
    num_inline_amplifiers: usize,
    active: bool,
}

/// 在线放大器个数：每 `spacing` 公里一个，长度恰为整数倍时末端那个由前置放大器代替。
pub(crate) fn inline_amplifier_count(length_km: f64, spacing_km: f64) -> usize {
    if spacing_km <= 0.0 {
        return 0;
    }
    let ratio = length_km / spacing_km;
    let n = ratio.floor() as usize;
    if ratio.fract() == 0.0 {
        n.saturating_sub(1)
    } else {
        n
    }
}

impl Link {
    /// 创建链路。`entry_loss` 是目的节点入口交换单元的损耗，由前置放大器补偿。
    pub fn new(
        id: LinkId,
        from: NodeId,
        to: NodeId,
        length_km: f64,
        entry_loss: Gain,
        phy: &PhysicalParams,
    ) -> Self {
        let mut link = Self {
            id,
            from,
            to,
            length_km,
            slots: (0..phy.slots_per_link).map(Slot::new).collect(),
            devices: Vec::new(),
            num_inline_amplifiers: inline_amplifier_count(length_km, phy.amplifier_spacing_km),
            active: true,
        };
        link.rebuild_devices(entry_loss, phy);
        link
    }

    fn rebuild_devices(&mut self, entry_loss: Gain, phy: &PhysicalParams) {
        let spans = self.num_inline_amplifiers + 1;
        let span_km = self.length_km / spans as f64;
        let mut devices = Vec::with_capacity(2 * spans);
        for _ in 0..self.num_inline_amplifiers {
            let fiber = Device::fiber(span_km, phy);
            let gain = -fiber.gain();
            devices.push(fiber);
            devices.push(Device::amplifier(AmplifierKind::InLine, gain, phy));
        }
        let fiber = Device::fiber(span_km, phy);
        let gain = -fiber.gain() - entry_loss;
        devices.push(fiber);
        devices.push(Device::amplifier(AmplifierKind::Pre, gain, phy));
        self.devices = devices;
    }

    /// 目的节点扇出变化后重建前置放大器
    pub(crate) fn set_destination_entry_loss(&mut self, entry_loss: Gain, phy: &PhysicalParams) {
        self.rebuild_devices(entry_loss, phy);
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    pub fn num_inline_amplifiers(&self) -> usize {
        self.num_inline_amplifiers
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn is_slot_free(&self, index: usize) -> bool {
        self.slots[index].is_free()
    }

    pub fn free_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_free()).count()
    }

    pub fn occupied_slot_count(&self) -> usize {
        self.num_slots() - self.free_slot_count()
    }

    /// 窗口内全部空闲
    pub fn is_window_free(&self, window: SlotWindow) -> bool {
        window.end() <= self.slots.len() && window.indices().all(|i| self.slots[i].is_free())
    }

    pub fn occupy(&mut self, window: SlotWindow) {
        trace!(link = ?self.id, start = window.start, width = window.width, "占用频隙");
        for i in window.indices() {
            self.slots[i].occupy();
        }
    }

    pub fn release(&mut self, window: SlotWindow) {
        trace!(link = ?self.id, start = window.start, width = window.width, "释放频隙");
        for i in window.indices() {
            self.slots[i].release();
        }
    }

    /// 最长连续空闲频隙数
    pub fn max_contiguous_free(&self) -> usize {
        let mut best = 0;
        let mut run = 0;
        for slot in &self.slots {
            if slot.is_free() {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        best
    }

    /// 能放下 `width` 个连续频隙的起始位置个数
    pub fn placements(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        let mut count = 0;
        let mut run = 0;
        for slot in &self.slots {
            if slot.is_free() {
                run += 1;
                if run >= width {
                    count += 1;
                }
            } else {
                run = 0;
            }
        }
        count
    }

    /// 信号穿过整条链路
    pub fn bypass(&self, signal: Signal, phy: &PhysicalParams) -> Signal {
        propagate(&self.devices, signal, phy)
    }

    /// 链路自身贡献的噪声（以链路输出为参考）
    pub fn noise(&self) -> Power {
        self.devices
            .iter()
            .fold(Power::ZERO, |noise, dev| noise * dev.gain() + dev.noise())
    }

    pub fn reset_slots(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::new(slot.index());
        }
    }
}
