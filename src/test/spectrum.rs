use rand::SeedableRng;

use super::{line, quiet_phy};
use crate::net::{LinkId, NodeId, NodeType, SlotWindow, Topology};
use crate::rmsa::{SpectrumAssignment, availability_mask, free_runs, max_contiguous};
use crate::sim::SimRng;

fn path(topo: &Topology) -> Vec<LinkId> {
    (0..topo.num_nodes() - 1)
        .map(|i| topo.link_between(NodeId(i), NodeId(i + 1)).unwrap())
        .collect()
}

fn occupy(topo: &mut Topology, l: LinkId, start: usize, width: usize) {
    topo.link_mut(l).occupy(SlotWindow::new(start, width));
}

#[test]
fn mask_is_the_and_of_all_links() {
    let mut topo = line(quiet_phy(8), 3, 1.0, NodeType::Transparent);
    let p = path(&topo);
    occupy(&mut topo, p[0], 1, 1);
    occupy(&mut topo, p[1], 4, 2);
    let mask = availability_mask(&topo, &p);
    assert_eq!(mask, vec![true, false, true, true, false, false, true, true]);
    assert_eq!(free_runs(&mask), vec![(0, 1), (2, 2), (6, 2)]);
    assert_eq!(max_contiguous(&topo, &p), 2);
}

#[test]
fn first_fit_reserves_lowest_window_without_overlap() {
    let mut topo = line(quiet_phy(8), 3, 1.0, NodeType::Transparent);
    let p = path(&topo);
    let mut rng = SimRng::seed_from_u64(7);

    let w1 = SpectrumAssignment::FirstFit
        .assign(&mut topo, &p, 3, &mut rng)
        .unwrap();
    assert_eq!(w1, SlotWindow::new(0, 3));
    for &l in &p {
        assert!(w1.indices().all(|i| !topo.link(l).is_slot_free(i)));
    }
    let w2 = SpectrumAssignment::FirstFit
        .assign(&mut topo, &p, 3, &mut rng)
        .unwrap();
    assert_eq!(w2, SlotWindow::new(3, 3));
    assert!(!w1.overlaps(&w2));
    assert!(SpectrumAssignment::FirstFit
        .assign(&mut topo, &p, 3, &mut rng)
        .is_none());
}

#[test]
fn failed_assignment_reserves_nothing() {
    let mut topo = line(quiet_phy(8), 3, 1.0, NodeType::Transparent);
    let p = path(&topo);
    occupy(&mut topo, p[1], 0, 4);
    occupy(&mut topo, p[0], 4, 4);
    let mut rng = SimRng::seed_from_u64(1);
    assert!(SpectrumAssignment::FirstFit
        .assign(&mut topo, &p, 1, &mut rng)
        .is_none());
    assert_eq!(topo.link(p[0]).free_slot_count(), 4);
    assert_eq!(topo.link(p[1]).free_slot_count(), 4);
}

#[test]
fn policies_pick_different_windows() {
    let mut topo = line(quiet_phy(16), 2, 1.0, NodeType::Transparent);
    let p = path(&topo);
    // 空闲游程：[0,4) [5,7) [8,16)
    occupy(&mut topo, p[0], 4, 1);
    occupy(&mut topo, p[0], 7, 1);
    let mut rng = SimRng::seed_from_u64(3);

    let find = |policy: SpectrumAssignment, width: usize, rng: &mut SimRng| {
        policy.find(&topo, &p, width, rng)
    };
    assert_eq!(find(SpectrumAssignment::FirstFit, 2, &mut rng), Some(SlotWindow::new(0, 2)));
    assert_eq!(find(SpectrumAssignment::LastFit, 2, &mut rng), Some(SlotWindow::new(14, 2)));
    assert_eq!(find(SpectrumAssignment::BestFit, 2, &mut rng), Some(SlotWindow::new(5, 2)));
    assert_eq!(find(SpectrumAssignment::ExactFit, 2, &mut rng), Some(SlotWindow::new(5, 2)));
    assert_eq!(find(SpectrumAssignment::BestFit, 4, &mut rng), Some(SlotWindow::new(0, 4)));
    assert_eq!(find(SpectrumAssignment::ExactFit, 3, &mut rng), Some(SlotWindow::new(0, 3)));
    assert_eq!(find(SpectrumAssignment::FirstFit, 9, &mut rng), None);

    for _ in 0..50 {
        let w = find(SpectrumAssignment::RandomFit, 3, &mut rng).unwrap();
        assert!(topo.link(p[0]).is_window_free(w));
    }
}

#[test]
fn random_fit_is_reproducible_for_a_seed() {
    let topo = line(quiet_phy(64), 2, 1.0, NodeType::Transparent);
    let p = path(&topo);
    let draw = |seed| {
        let mut rng = SimRng::seed_from_u64(seed);
        (0..10)
            .map(|_| SpectrumAssignment::RandomFit.find(&topo, &p, 2, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(11), draw(11));
}

#[test]
fn spectrum_nicknames_parse() {
    assert_eq!("FF".parse::<SpectrumAssignment>(), Ok(SpectrumAssignment::FirstFit));
    assert_eq!("random_fit".parse::<SpectrumAssignment>(), Ok(SpectrumAssignment::RandomFit));
    assert!("??".parse::<SpectrumAssignment>().is_err());
}
