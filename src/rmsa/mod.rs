//! RMSA 模块
//!
//! 此模块包含路由、调制格式、频谱与再生器分配（Routing, Modulation, Spectrum
//! and regenerator Assignment）的全部组件，以及把它们串起来的编排器。

// 子模块声明
mod call;
mod engine;
mod quality;
mod regenerator;
pub mod routing;
mod segment;
mod spectrum;
mod transparency;

// 重新导出公共接口
pub use call::{BlockReason, Call, CallId, CallStatus, Reservation};
pub use engine::{Rmsa, release};
pub use quality::{
    is_feasible, is_physically_feasible, is_signal_feasible, most_efficient_physical_scheme,
    most_efficient_scheme,
};
pub use regenerator::{RegeneratorAssignment, regenerators_needed};
pub use routing::{Route, RoutingAlgorithm, RoutingCost, RoutingKind};
pub use segment::{TransparentSegment, segment_signal};
pub use spectrum::{SpectrumAssignment, availability_mask, free_runs, max_contiguous};
pub use transparency::{SchemeChoice, TransparencyEntry, transparency_analysis};
