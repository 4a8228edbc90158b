//! 图搜索
//!
//! 所有搜索都在预先算好的链路权重上进行：`weights[l]` 为 `None` 表示链路不可用
//! （链路或其端点处于 inactive 状态，或被 Yen 算法临时排除）。

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::net::{LinkId, NodeId, Topology};

use super::Route;

/// 搜索时临时排除的节点与链路
#[derive(Debug, Default, Clone)]
pub struct Exclusions {
    pub nodes: HashSet<NodeId>,
    pub links: HashSet<LinkId>,
}

#[derive(Debug, Clone, Copy)]
struct Label {
    dist: f64,
    node: NodeId,
}

// 最小距离优先
impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

fn usable(topo: &Topology, weights: &[Option<f64>], l: LinkId, excl: &Exclusions) -> Option<f64> {
    if excl.links.contains(&l) {
        return None;
    }
    let link = topo.link(l);
    if excl.nodes.contains(&link.to()) || excl.nodes.contains(&link.from()) {
        return None;
    }
    weights[l.0]
}

/// 沿前驱链回溯。每条前驱边只能被取用一次，遇到环会提前停下，
/// 随后的端点检查会把结果判为"无路由"。
fn unwind(
    topo: &Topology,
    mut pred: Vec<Option<LinkId>>,
    origin: NodeId,
    destination: NodeId,
) -> Option<Route> {
    let mut route = Vec::new();
    let mut cur = destination;
    while cur != origin {
        let Some(l) = pred[cur.0].take() else {
            break;
        };
        route.push(l);
        cur = topo.link(l).from();
    }
    route.reverse();
    let first = route.first()?;
    let last = route.last()?;
    if topo.link(*first).from() == origin && topo.link(*last).to() == destination {
        Some(route)
    } else {
        None
    }
}

/// 标号设定最短路。到达目的节点即停止；出队次数不超过节点数。
pub fn dijkstra(
    topo: &Topology,
    weights: &[Option<f64>],
    origin: NodeId,
    destination: NodeId,
    excl: &Exclusions,
) -> Option<Route> {
    let n = topo.num_nodes();
    if origin == destination || excl.nodes.contains(&origin) {
        return None;
    }
    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<LinkId>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    dist[origin.0] = 0.0;
    heap.push(Label {
        dist: 0.0,
        node: origin,
    });

    let mut settled = 0;
    while let Some(Label { dist: d, node }) = heap.pop() {
        if d > dist[node.0] {
            continue;
        }
        if node == destination {
            break;
        }
        settled += 1;
        if settled > n {
            break;
        }
        for &l in topo.node(node).outgoing_links() {
            let Some(w) = usable(topo, weights, l, excl) else {
                continue;
            };
            let next = topo.link(l).to();
            let nd = d + w;
            if nd < dist[next.0] {
                dist[next.0] = nd;
                pred[next.0] = Some(l);
                heap.push(Label { dist: nd, node: next });
            }
        }
    }
    unwind(topo, pred, origin, destination)
}

/// 标号修正最短路，允许负权链路；松弛轮数不超过节点数。
pub fn bellman_ford(
    topo: &Topology,
    weights: &[Option<f64>],
    origin: NodeId,
    destination: NodeId,
    excl: &Exclusions,
) -> Option<Route> {
    let n = topo.num_nodes();
    if origin == destination || excl.nodes.contains(&origin) {
        return None;
    }
    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<LinkId>> = vec![None; n];
    dist[origin.0] = 0.0;
    for _ in 0..n {
        let mut changed = false;
        for link in topo.links() {
            let Some(w) = usable(topo, weights, link.id(), excl) else {
                continue;
            };
            let (u, v) = (link.from(), link.to());
            if dist[u.0].is_finite() && dist[u.0] + w < dist[v.0] {
                dist[v.0] = dist[u.0] + w;
                pred[v.0] = Some(link.id());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    unwind(topo, pred, origin, destination)
}

pub fn route_cost(weights: &[Option<f64>], route: &[LinkId]) -> f64 {
    route
        .iter()
        .map(|l| weights[l.0].unwrap_or(f64::INFINITY))
        .sum()
}

/// Yen K 最短无环路径，按代价升序（同代价按跳数）
pub fn k_shortest(
    topo: &Topology,
    weights: &[Option<f64>],
    origin: NodeId,
    destination: NodeId,
    k: usize,
) -> Vec<Route> {
    let mut found: Vec<Route> = Vec::new();
    let Some(first) = dijkstra(topo, weights, origin, destination, &Exclusions::default()) else {
        return found;
    };
    found.push(first);
    let mut candidates: Vec<(f64, Route)> = Vec::new();

    while found.len() < k {
        let last = found[found.len() - 1].clone();
        let last_nodes = topo.route_nodes(&last);
        for i in 0..last.len() {
            let spur = last_nodes[i];
            let root = &last[..i];
            let mut excl = Exclusions::default();
            for p in &found {
                if p.len() > i && p[..i] == *root {
                    excl.links.insert(p[i]);
                }
            }
            excl.nodes.extend(last_nodes[..i].iter().copied());

            if let Some(spur_path) = dijkstra(topo, weights, spur, destination, &excl) {
                let mut total = root.to_vec();
                total.extend(spur_path);
                if !found.contains(&total) && !candidates.iter().any(|(_, c)| *c == total) {
                    candidates.push((route_cost(weights, &total), total));
                }
            }
        }
        if candidates.is_empty() {
            break;
        }
        let best = candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.0.total_cmp(&b.0).then(a.1.len().cmp(&b.1.len())))
            .map(|(i, _)| i);
        match best {
            Some(i) => found.push(candidates.swap_remove(i).1),
            None => break,
        }
    }
    found
}
