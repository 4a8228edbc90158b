//! RMSA 编排
//!
//! 路由 -> 再生器分配 -> 频谱分配。任何一步不可行都只会把呼叫标记为阻塞，
//! 并归还这次尝试已经预留的部分资源；不会有错误逃出这一层。

use rand::Rng;
use tracing::{debug, trace};

use super::call::{BlockReason, Call, Reservation};
use super::quality::is_signal_feasible;
use super::regenerator::RegeneratorAssignment;
use super::routing::{Route, RoutingAlgorithm};
use super::segment::{TransparentSegment, segment_signal};
use super::spectrum::{SpectrumAssignment, max_contiguous};
use crate::net::Topology;
use crate::phy::{ModulationScheme, TransmissionBitrate};

#[derive(Debug, Clone)]
pub struct Rmsa {
    pub routing: RoutingAlgorithm,
    pub spectrum: SpectrumAssignment,
    /// `None` 表示全透明网络
    pub regenerators: Option<RegeneratorAssignment>,
    /// 按频谱效率升序
    pub schemes: Vec<ModulationScheme>,
    pub regenerator_bitrate: TransmissionBitrate,
}

impl Rmsa {
    /// 为呼叫分配资源，并把结果写回 `call`
    #[tracing::instrument(skip_all, fields(call = call.id().0, origin = %call.origin(), destination = %call.destination()))]
    pub fn admit<R: Rng + ?Sized>(&self, topo: &mut Topology, call: &mut Call, rng: &mut R) {
        let routes = self
            .routing
            .route(topo, call.origin(), call.destination(), call.bitrate());
        if routes.is_empty() {
            debug!("无路由，呼叫阻塞");
            call.block(BlockReason::NoRoute);
            return;
        }

        // 多条候选路由时取第一条能完整分配的；都失败时报告第一条的原因
        let mut first_reason = None;
        for route in &routes {
            match self.try_route(topo, route, call.bitrate(), rng) {
                Ok((segments, reservation)) => {
                    debug!(
                        hops = route.len(),
                        segments = segments.len(),
                        regenerators = reservation.num_regenerators(),
                        "呼叫建立"
                    );
                    call.implement(segments, reservation);
                    return;
                }
                Err(reason) => {
                    trace!(%reason, "候选路由失败");
                    first_reason.get_or_insert(reason);
                }
            }
        }
        let reason = first_reason.unwrap_or(BlockReason::NoRoute);
        debug!(%reason, "呼叫阻塞");
        call.block(reason);
    }

    fn try_route<R: Rng + ?Sized>(
        &self,
        topo: &mut Topology,
        route: &Route,
        bitrate: TransmissionBitrate,
        rng: &mut R,
    ) -> Result<(Vec<TransparentSegment>, Reservation), BlockReason> {
        let mut segments = match self.regenerators {
            Some(ra) => ra.plan(topo, route, &self.schemes, bitrate, self.regenerator_bitrate)?,
            None => vec![self.transparent_segment(topo, route, bitrate)?],
        };

        let mut reservation = Reservation::default();
        for seg in &mut segments {
            match self.spectrum.assign(topo, &seg.links, seg.num_slots, rng) {
                Some(window) => {
                    seg.window = Some(window);
                    reservation
                        .slots
                        .extend(seg.links.iter().map(|&l| (l, window)));
                }
                None => {
                    release(topo, &reservation);
                    return Err(BlockReason::NoSpectrum);
                }
            }
        }
        for seg in &segments {
            if seg.regenerators_at_end > 0 {
                let node = seg.last_node(topo);
                topo.node_mut(node).request_regenerators(seg.regenerators_at_end);
                reservation.regenerators.push((node, seg.regenerators_at_end));
            }
        }
        Ok((segments, reservation))
    }

    /// 全透明网络：按效率从高到低逐个测试端到端可行性
    fn transparent_segment(
        &self,
        topo: &Topology,
        route: &Route,
        bitrate: TransmissionBitrate,
    ) -> Result<TransparentSegment, BlockReason> {
        let phy = topo.phy();
        let mut physically_ok = false;
        for scheme in self.schemes.iter().rev() {
            let width = scheme.num_slots(bitrate, phy);
            let signal = segment_signal(topo, route, width);
            if !is_signal_feasible(&signal, scheme, bitrate, phy) {
                continue;
            }
            physically_ok = true;
            if max_contiguous(topo, route) >= width {
                return Ok(TransparentSegment::new(route.clone(), *scheme, width));
            }
        }
        if physically_ok {
            Err(BlockReason::NoSpectrum)
        } else {
            Err(BlockReason::NoModulationScheme)
        }
    }
}

/// 归还一次预留
pub fn release(topo: &mut Topology, reservation: &Reservation) {
    for &(l, window) in &reservation.slots {
        topo.link_mut(l).release(window);
    }
    for &(n, count) in &reservation.regenerators {
        topo.node_mut(n).free_regenerators(count);
    }
}
