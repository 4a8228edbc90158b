//! 物理层模块
//!
//! 此模块包含光信号在器件链上传播所需的组件：增益/功率单位、物理参数、
//! 光器件、信号与频谱密度，以及调制格式与传输速率。

// 子模块声明
mod device;
mod modulation;
mod params;
mod signal;
mod spectral;
mod units;

// 重新导出公共接口
pub use device::{AmplifierKind, Device, propagate};
pub use modulation::{ModulationScheme, TransmissionBitrate, default_bitrates, default_schemes};
pub use params::{PLANCK, PhysicalParams};
pub use signal::Signal;
pub use spectral::{SpectralDensity, trapezoid};
pub use units::{Gain, Power};
