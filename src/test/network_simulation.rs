use std::collections::HashMap;
use std::sync::Arc;

use rand::SeedableRng;

use super::quiet_phy;
use crate::net::{NodeId, SlotWindow, Topology};
use crate::phy::{Gain, ModulationScheme, PhysicalParams, TransmissionBitrate};
use crate::rmsa::{BlockReason, Call, CallId, CallStatus, RegeneratorAssignment, RoutingKind, release};
use crate::sim::{
    CallGenerator, CallRequisition, NetworkSimulation, OpticalWorld, RmsaOptions, SimConfig, SimRng,
    SimStats, SimTime, Simulator,
};
use crate::topo::{RingOpts, build_ring};

fn ring(phy: PhysicalParams, nodes: usize, length_km: f64) -> Topology {
    build_ring(
        Arc::new(phy),
        &RingOpts {
            nodes,
            length_km,
            ..RingOpts::default()
        },
    )
    .unwrap()
}

/// 4 节点环、链路长 1、每链路 8 个频隙、单一速率需要 2 个频隙、ASE 关闭
fn small_ring_config(topo: &Topology) -> SimConfig {
    SimConfig::new(
        topo,
        RmsaOptions {
            schemes: vec![ModulationScheme::new(4, Gain::from_db(6.8))],
            bitrates: vec![TransmissionBitrate::from_gbps(100.0)],
            ..RmsaOptions::default()
        },
    )
    .unwrap()
}

fn adjacent_call(id: u64) -> Call {
    Call::new(
        CallId(id),
        NodeId(0),
        NodeId(1),
        TransmissionBitrate::from_gbps(100.0),
        SimTime::ZERO,
        SimTime::from_secs(10),
    )
}

#[test]
fn ring_fills_a_link_in_first_fit_order() {
    let mut topo = ring(quiet_phy(8), 4, 1.0);
    let config = small_ring_config(&topo);
    let mut rng = SimRng::seed_from_u64(1);
    let direct = topo.link_between(NodeId(0), NodeId(1)).unwrap();

    let mut calls = Vec::new();
    for i in 0..4 {
        let mut c = adjacent_call(i);
        config.rmsa.admit(&mut topo, &mut c, &mut rng);
        assert_eq!(c.status(), CallStatus::Implemented);
        assert_eq!(c.reservation().slots, vec![(direct, SlotWindow::new(2 * i as usize, 2))]);
        calls.push(c);
    }
    assert_eq!(topo.link(direct).free_slot_count(), 0);

    // 最短路由上已没有频谱
    let mut blocked = adjacent_call(4);
    config.rmsa.admit(&mut topo, &mut blocked, &mut rng);
    assert_eq!(blocked.status(), CallStatus::Blocked);
    assert_eq!(blocked.block_reason(), Some(BlockReason::NoSpectrum));

    // 释放第一个呼叫后，同一窗口可以复用
    let r = calls[0].take_reservation().unwrap();
    release(&mut topo, &r);
    let mut again = adjacent_call(5);
    config.rmsa.admit(&mut topo, &mut again, &mut rng);
    assert_eq!(again.reservation().slots, vec![(direct, SlotWindow::new(0, 2))]);
}

#[test]
fn k_shortest_falls_back_to_the_longer_route() {
    let mut topo = ring(quiet_phy(8), 4, 1.0);
    let config = SimConfig::new(
        &topo,
        RmsaOptions {
            routing: RoutingKind::KShortest { k: 2 },
            schemes: vec![ModulationScheme::new(4, Gain::from_db(6.8))],
            bitrates: vec![TransmissionBitrate::from_gbps(100.0)],
            ..RmsaOptions::default()
        },
    )
    .unwrap();
    let mut rng = SimRng::seed_from_u64(1);
    for i in 0..4 {
        let mut c = adjacent_call(i);
        config.rmsa.admit(&mut topo, &mut c, &mut rng);
    }
    let mut fifth = adjacent_call(4);
    config.rmsa.admit(&mut topo, &mut fifth, &mut rng);
    assert_eq!(fifth.status(), CallStatus::Implemented);
    assert_eq!(fifth.reservation().slots.len(), 3);
}

fn run(topo: &Topology, opts: RmsaOptions, load: f64, seed: u64) -> crate::sim::SimulationReport {
    let config = Arc::new(SimConfig::new(topo, opts).unwrap());
    NetworkSimulation::new(config, topo.clone_fresh(), load, seed)
        .unwrap()
        .run()
}

#[test]
fn simulation_counts_every_call() {
    let topo = ring(quiet_phy(64), 6, 100.0);
    let opts = RmsaOptions {
        num_calls: 500,
        ..RmsaOptions::default()
    };
    let report = run(&topo, opts, 50.0, 3);
    assert_eq!(report.calls, 500);
    assert!(report.blocked <= report.calls);
    let by_reason: u64 = report.blocked_by_reason.values().sum();
    assert_eq!(by_reason, report.blocked);
    assert!(report.final_time_secs > 0.0);
}

#[test]
fn same_seed_gives_same_report() {
    let topo = ring(quiet_phy(16), 6, 100.0);
    let opts = RmsaOptions {
        num_calls: 800,
        ..RmsaOptions::default()
    };
    let a = run(&topo, opts.clone(), 80.0, 42);
    let b = run(&topo, opts, 80.0, 42);
    assert_eq!(a.blocked, b.blocked);
    assert_eq!(a.final_time_secs, b.final_time_secs);
}

#[test]
fn blocking_does_not_drop_when_load_grows() {
    let topo = ring(quiet_phy(64), 6, 100.0);
    let opts = RmsaOptions {
        num_calls: 3_000,
        ..RmsaOptions::default()
    };
    let light = run(&topo, opts.clone(), 20.0, 9);
    let heavy = run(&topo, opts, 300.0, 9);
    assert!(heavy.blocking_probability >= light.blocking_probability);
    assert!(heavy.blocking_probability > 0.0);
}

#[test]
fn translucent_run_releases_every_regenerator() {
    let phy = PhysicalParams::default();
    let mut topo = ring(phy, 6, 3000.0);
    for id in topo.node_ids().collect::<Vec<_>>() {
        let node = topo.node_mut(id);
        node.set_node_type(crate::net::NodeType::Translucent);
        node.set_num_regenerators(8);
    }
    let opts = RmsaOptions {
        regenerators: Some(RegeneratorAssignment::FirstLongestReach),
        num_calls: 1_000,
        ..RmsaOptions::default()
    };
    // 运行结束时的泄漏检查在 run() 内部断言
    let report = run(&topo, opts, 40.0, 5);
    assert_eq!(report.calls, 1_000);
    let total: u64 = report.node_usage.iter().map(|u| u.total_regenerators).sum();
    assert!(total > 0);
    assert!(report.node_usage.iter().all(|u| u.peak_regenerators <= 8));
}

#[test]
fn non_positive_load_is_rejected() {
    let topo = ring(quiet_phy(8), 4, 1.0);
    let config = Arc::new(small_ring_config(&topo));
    assert!(NetworkSimulation::new(config, topo.clone_fresh(), 0.0, 1).is_err());
}

#[test]
fn degenerate_constellation_is_rejected() {
    let topo = ring(quiet_phy(8), 4, 1.0);
    for m in [0, 1] {
        let opts = RmsaOptions {
            schemes: vec![
                ModulationScheme::new(4, Gain::from_db(6.8)),
                ModulationScheme::new(m, Gain::from_db(3.0)),
            ],
            ..RmsaOptions::default()
        };
        assert!(
            matches!(SimConfig::new(&topo, opts), Err(crate::error::ConfigError::Invalid(_))),
            "m = {m} accepted"
        );
    }
}

#[test]
fn ending_releases_before_an_arrival_at_the_same_instant() {
    // 一对节点、每条链路 2 个频隙：第一个呼叫占满链路，
    // 下一个呼叫恰好在它结束的时刻到达
    let topo = ring(quiet_phy(2), 2, 1.0);
    let config = Arc::new(
        SimConfig::new(
            &topo,
            RmsaOptions {
                schemes: vec![ModulationScheme::new(4, Gain::from_db(6.8))],
                bitrates: vec![TransmissionBitrate::from_gbps(100.0)],
                num_calls: 1,
                ..RmsaOptions::default()
            },
        )
        .unwrap(),
    );
    let generator = CallGenerator::new(2, config.bitrates.clone(), 1.0, 1.0, 5);
    let next = generator.clone().generate();
    let first = Call::new(
        CallId(1_000),
        next.origin(),
        next.destination(),
        next.bitrate(),
        SimTime::ZERO,
        next.arrival(),
    );

    let mut world = OpticalWorld {
        topo,
        config,
        generator,
        rng: SimRng::seed_from_u64(5),
        calls: HashMap::new(),
        stats: SimStats::default(),
    };
    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, CallRequisition { call: first });
    sim.run(&mut world);

    assert_eq!(world.stats.calls, 2);
    assert_eq!(world.stats.blocked, 0);
    assert!(world.calls.is_empty());
}
