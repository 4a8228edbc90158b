use std::sync::Arc;

use super::line;
use crate::net::{NodeArchitecture, NodeType, Topology, inline_amplifier_count};
use crate::phy::{AmplifierKind, Device, PhysicalParams, Signal};
use crate::rmsa::segment_signal;

#[test]
fn new_signal_starts_at_input_power_and_osnr() {
    let phy = PhysicalParams::default();
    let s = Signal::new(2, &phy);
    assert!((s.power().dbm() - phy.input_power_dbm).abs() < 1e-9);
    assert!((s.osnr().db() - phy.input_osnr_db).abs() < 1e-9);
    assert_eq!(s.retained_power_ratio(), 1.0);
}

#[test]
fn link_chain_places_inline_and_preamplifier() {
    let topo = line(PhysicalParams::default(), 2, 200.0, NodeType::Transparent);
    let link = topo.link(topo.link_between(topo.nodes()[0].id(), topo.nodes()[1].id()).unwrap());
    assert_eq!(link.num_inline_amplifiers(), 2);
    let devices = link.devices();
    assert_eq!(devices.len(), 6);
    assert!(matches!(devices[1], Device::Amplifier { kind: AmplifierKind::InLine, .. }));
    assert!(matches!(devices[5], Device::Amplifier { kind: AmplifierKind::Pre, .. }));
    // 前置放大器补偿最后一段光纤和目的节点入口 SSS
    let span_loss = devices[4].gain().db();
    assert!((devices[5].gain().db() + span_loss - 5.0).abs() < 1e-9);
}

#[test]
fn drop_and_add_split_the_node_chain_at_the_switch() {
    let topo = line(PhysicalParams::default(), 3, 100.0, NodeType::Transparent);
    let node = &topo.nodes()[1];
    assert_eq!(node.devices().len(), 3);
    let phy = topo.phy();
    let s = Signal::new(1, phy);
    let dropped = node.drop(s.clone(), phy);
    let added = node.add(s.clone(), phy);
    let bypassed = node.bypass(s, phy);
    assert!((dropped.power().dbm() + 5.0).abs() < 1e-9);
    assert!(added.power().dbm().abs() < 1e-9);
    assert!((bypassed.power().dbm() + 5.0).abs() < 1e-9);
}

#[test]
fn splitter_loss_tracks_fan_out() {
    let mut topo = Topology::new(Arc::new(PhysicalParams::default()));
    let hub = topo.add_node(NodeType::Transparent, NodeArchitecture::BroadcastAndSelect, 0);
    let leaves: Vec<_> = (0..3)
        .map(|_| topo.add_node(NodeType::Transparent, NodeArchitecture::SwitchingSelect, 0))
        .collect();
    for &leaf in &leaves {
        topo.connect_bidirectional(hub, leaf, 50.0).unwrap();
    }
    let hub_node = topo.node(hub);
    assert_eq!(hub_node.fan_out(), 3);
    // 1 / (3 + 1)
    assert!((hub_node.entry_loss().linear() - 0.25).abs() < 1e-12);

    // 进入 hub 的链路的前置放大器跟着更新
    let into_hub = topo.link_between(leaves[0], hub).unwrap();
    let devices = topo.link(into_hub).devices();
    let pre = devices[devices.len() - 1].gain().db();
    let span = devices[devices.len() - 2].gain().db();
    assert!((pre + span + hub_node.entry_loss().db()).abs() < 1e-9);
}

#[test]
fn amplified_segment_keeps_launch_power() {
    let topo = line(PhysicalParams::default(), 4, 500.0, NodeType::Transparent);
    let route: Vec<_> = (0..3)
        .map(|i| topo.link_between(topo.nodes()[i].id(), topo.nodes()[i + 1].id()).unwrap())
        .collect();
    let s = segment_signal(&topo, &route, 2);
    assert!(s.power().dbm().abs() < 1e-6);
}

#[test]
fn osnr_degrades_with_distance_only_when_ase_is_on() {
    let noisy = line(PhysicalParams::default(), 4, 500.0, NodeType::Transparent);
    let route: Vec<_> = (0..3)
        .map(|i| noisy.link_between(noisy.nodes()[i].id(), noisy.nodes()[i + 1].id()).unwrap())
        .collect();
    let one = segment_signal(&noisy, &route[..1], 1).osnr().db();
    let three = segment_signal(&noisy, &route, 1).osnr().db();
    assert!(one < 30.0);
    assert!(three < one);

    let quiet = line(super::quiet_phy(64), 4, 500.0, NodeType::Transparent);
    let osnr = segment_signal(&quiet, &route, 1).osnr().db();
    assert!((osnr - 30.0).abs() < 1e-6);
}

#[test]
fn filtering_loses_power_at_every_sss() {
    let phy = PhysicalParams {
        consider_filter_imperfection: true,
        samples_per_slot: 20,
        ..PhysicalParams::default()
    };
    let topo = line(phy, 4, 100.0, NodeType::Transparent);
    let route: Vec<_> = (0..3)
        .map(|i| topo.link_between(topo.nodes()[i].id(), topo.nodes()[i + 1].id()).unwrap())
        .collect();
    let short = segment_signal(&topo, &route[..1], 2).retained_power_ratio();
    let long = segment_signal(&topo, &route, 2).retained_power_ratio();
    assert!(short < 1.0);
    assert!(long < short);
    assert!(long > 0.0);
}

#[test]
fn inline_amplifiers_skip_exact_multiple() {
    assert_eq!(inline_amplifier_count(0.0, 80.0), 0);
    assert_eq!(inline_amplifier_count(79.0, 80.0), 0);
    assert_eq!(inline_amplifier_count(80.0, 80.0), 0);
    assert_eq!(inline_amplifier_count(81.0, 80.0), 1);
    assert_eq!(inline_amplifier_count(160.0, 80.0), 1);
    assert_eq!(inline_amplifier_count(2100.0, 80.0), 26);
}
