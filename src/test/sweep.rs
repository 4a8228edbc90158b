use std::sync::Arc;

use super::quiet_phy;
use crate::sim::{NetworkSimulation, RmsaOptions, SimConfig, load_points, load_sweep, run_in_batches};
use crate::topo::{RingOpts, build_ring};

#[test]
fn load_points_include_both_ends() {
    assert_eq!(load_points(10.0, 30.0, 10.0).unwrap(), vec![10.0, 20.0, 30.0]);
    assert_eq!(load_points(5.0, 5.0, 0.0).unwrap(), vec![5.0]);
    assert_eq!(load_points(0.1, 0.3, 0.1).unwrap().len(), 3);
    assert!(load_points(0.0, 10.0, 1.0).is_err());
    assert!(load_points(10.0, 5.0, 1.0).is_err());
    assert!(load_points(1.0, 5.0, 0.0).is_err());
}

#[test]
fn parallel_sweep_matches_sequential_runs() {
    let topo = build_ring(
        Arc::new(quiet_phy(16)),
        &RingOpts {
            nodes: 5,
            length_km: 50.0,
            ..RingOpts::default()
        },
    )
    .unwrap();
    let config = Arc::new(
        SimConfig::new(
            &topo,
            RmsaOptions {
                num_calls: 400,
                ..RmsaOptions::default()
            },
        )
        .unwrap(),
    );
    let loads = [20.0, 60.0, 100.0];
    let reports = load_sweep(Arc::clone(&config), &topo, &loads, 4).unwrap();
    assert_eq!(reports.len(), 3);
    for (report, &load) in reports.iter().zip(&loads) {
        assert_eq!(report.load, load);
        let alone = NetworkSimulation::new(Arc::clone(&config), topo.clone_fresh(), load, 4)
            .unwrap()
            .run();
        assert_eq!(report.blocked, alone.blocked);
        assert_eq!(report.calls, 400);
    }
}

#[test]
fn batches_never_exceed_the_worker_count_and_keep_order() {
    let topo = build_ring(
        Arc::new(quiet_phy(8)),
        &RingOpts {
            nodes: 4,
            length_km: 10.0,
            ..RingOpts::default()
        },
    )
    .unwrap();
    let config = Arc::new(
        SimConfig::new(
            &topo,
            RmsaOptions {
                num_calls: 50,
                ..RmsaOptions::default()
            },
        )
        .unwrap(),
    );
    let loads = load_points(1.0, 7.0, 1.0).unwrap();
    let runs = loads
        .iter()
        .map(|&load| NetworkSimulation::new(Arc::clone(&config), topo.clone_fresh(), load, 2).unwrap())
        .collect();
    let reports = run_in_batches(runs, 3);
    let got: Vec<f64> = reports.iter().map(|r| r.load).collect();
    assert_eq!(got, loads);
    assert!(reports.iter().all(|r| r.calls == 50));

    // workers = 0 按 1 处理
    let runs = vec![NetworkSimulation::new(config, topo.clone_fresh(), 3.0, 2).unwrap()];
    assert_eq!(run_in_batches(runs, 0).len(), 1);
}
