//! 拓扑构建模块
//!
//! 内置拓扑（环形、NSFNet）以及拓扑文本格式的读写。

// 子模块声明
pub mod file;
pub mod nsfnet;
pub mod ring;

// 重新导出公共接口
pub use file::{load_topology, parse_topology, save_topology, write_topology};
pub use nsfnet::{NsfnetOpts, build_nsfnet};
pub use ring::{RingOpts, build_ring};
