//! 呼叫及其生命周期
//!
//! NotEvaluated -> {Implemented | Blocked}，之后只允许一次释放。

use std::fmt;

use super::segment::TransparentSegment;
use crate::net::{LinkId, NodeId, SlotWindow};
use crate::phy::{ModulationScheme, TransmissionBitrate};
use crate::sim::SimTime;

/// 呼叫标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    NotEvaluated,
    Implemented,
    Blocked,
}

/// 呼叫被阻塞的原因（不是错误，只是统计维度）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockReason {
    NoRoute,
    NoRegenerationPlan,
    NoSpectrum,
    NoModulationScheme,
}

impl BlockReason {
    pub const ALL: [BlockReason; 4] = [
        BlockReason::NoRoute,
        BlockReason::NoRegenerationPlan,
        BlockReason::NoSpectrum,
        BlockReason::NoModulationScheme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockReason::NoRoute => "no_route",
            BlockReason::NoRegenerationPlan => "no_regeneration_plan",
            BlockReason::NoSpectrum => "no_spectrum",
            BlockReason::NoModulationScheme => "no_modulation_scheme",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一个呼叫占用的全部资源
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reservation {
    pub slots: Vec<(LinkId, SlotWindow)>,
    pub regenerators: Vec<(NodeId, u32)>,
}

impl Reservation {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.regenerators.is_empty()
    }

    pub fn num_regenerators(&self) -> u32 {
        self.regenerators.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Call {
    id: CallId,
    origin: NodeId,
    destination: NodeId,
    bitrate: TransmissionBitrate,
    arrival: SimTime,
    ending: SimTime,
    status: CallStatus,
    block_reason: Option<BlockReason>,
    segments: Vec<TransparentSegment>,
    reservation: Reservation,
    released: bool,
}

impl Call {
    pub fn new(
        id: CallId,
        origin: NodeId,
        destination: NodeId,
        bitrate: TransmissionBitrate,
        arrival: SimTime,
        ending: SimTime,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            bitrate,
            arrival,
            ending,
            status: CallStatus::NotEvaluated,
            block_reason: None,
            segments: Vec::new(),
            reservation: Reservation::default(),
            released: false,
        }
    }

    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn bitrate(&self) -> TransmissionBitrate {
        self.bitrate
    }

    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    pub fn ending(&self) -> SimTime {
        self.ending
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn block_reason(&self) -> Option<BlockReason> {
        self.block_reason
    }

    pub fn segments(&self) -> &[TransparentSegment] {
        &self.segments
    }

    pub fn reservation(&self) -> &Reservation {
        &self.reservation
    }

    /// 第一段的调制格式
    pub fn scheme(&self) -> Option<ModulationScheme> {
        self.segments.first().map(|s| s.scheme)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub(crate) fn implement(&mut self, segments: Vec<TransparentSegment>, reservation: Reservation) {
        assert_eq!(
            self.status,
            CallStatus::NotEvaluated,
            "call {:?} evaluated twice",
            self.id
        );
        self.status = CallStatus::Implemented;
        self.segments = segments;
        self.reservation = reservation;
    }

    pub(crate) fn block(&mut self, reason: BlockReason) {
        assert_eq!(
            self.status,
            CallStatus::NotEvaluated,
            "call {:?} evaluated twice",
            self.id
        );
        self.status = CallStatus::Blocked;
        self.block_reason = Some(reason);
    }

    /// 标记为已释放并返回要归还的资源。阻塞/未评估的呼叫返回 `None`；
    /// 第二次释放直接 panic。
    pub(crate) fn take_reservation(&mut self) -> Option<Reservation> {
        if self.status != CallStatus::Implemented {
            return None;
        }
        assert!(!self.released, "call {:?} released twice", self.id);
        self.released = true;
        Some(self.reservation.clone())
    }
}
