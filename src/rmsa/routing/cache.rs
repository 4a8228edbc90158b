//! 固定路由缓存
//!
//! 构造一次后只读，可以用 `Arc` 在多次独立运行之间共享。

use std::collections::HashMap;

use crate::net::{NodeId, Topology};
use tracing::debug;

use super::Route;
use super::search::{Exclusions, dijkstra};

#[derive(Debug, Default)]
pub struct RouteCache {
    routes: HashMap<(NodeId, NodeId), Route>,
}

impl RouteCache {
    /// 对所有有序节点对在给定权重上求一次最短路
    pub fn build(topo: &Topology, weights: &[Option<f64>]) -> Self {
        let mut routes = HashMap::new();
        let excl = Exclusions::default();
        for o in topo.node_ids() {
            for d in topo.node_ids() {
                if o == d {
                    continue;
                }
                if let Some(r) = dijkstra(topo, weights, o, d, &excl) {
                    routes.insert((o, d), r);
                }
            }
        }
        debug!(pairs = routes.len(), "路由缓存构建完成");
        Self { routes }
    }

    pub fn get(&self, origin: NodeId, destination: NodeId) -> Option<&Route> {
        self.routes.get(&(origin, destination))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
