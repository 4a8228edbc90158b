use crate::phy::{
    Gain, ModulationScheme, PhysicalParams, Power, TransmissionBitrate, default_schemes,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn gain_db_and_linear_agree() {
    assert!(close(Gain::from_db(10.0).linear(), 10.0));
    assert!(close(Gain::from_linear(100.0).db(), 20.0));
    assert!(close((Gain::from_db(3.0) + Gain::from_db(-5.0)).db(), -2.0));
    assert!(close((-Gain::from_db(4.0)).db(), -4.0));
}

#[test]
fn power_dbm_and_watts_agree() {
    assert!(close(Power::from_dbm(0.0).watts(), 1e-3));
    assert!(close(Power::from_watts(1.0).dbm(), 30.0));
    let p = Power::from_dbm(0.0) * Gain::from_db(-10.0);
    assert!(close(p.dbm(), -10.0));
    assert_eq!(Power::ZERO.dbm(), f64::NEG_INFINITY);
}

#[test]
fn ase_noise_follows_gain_and_toggle() {
    let phy = PhysicalParams::default();
    assert_eq!(phy.ase_noise(Gain::UNITY), Power::ZERO);
    let small = phy.ase_noise(Gain::from_db(10.0));
    let large = phy.ase_noise(Gain::from_db(20.0));
    assert!(small.watts() > 0.0);
    // (G - 1) 从 9 变到 99
    assert!(close(large.watts() / small.watts(), 11.0));

    let quiet = PhysicalParams {
        consider_ase_noise: false,
        ..PhysicalParams::default()
    };
    assert_eq!(quiet.ase_noise(Gain::from_db(20.0)), Power::ZERO);
}

#[test]
fn slot_count_depends_on_constellation_and_bitrate() {
    let phy = PhysicalParams::default();
    let schemes = default_schemes();
    let b100 = TransmissionBitrate::from_gbps(100.0);
    let b400 = TransmissionBitrate::from_gbps(400.0);
    assert_eq!(schemes[0].num_slots(b100, &phy), 2);
    assert_eq!(schemes[1].num_slots(b100, &phy), 1);
    assert_eq!(schemes[0].num_slots(b400, &phy), 8);
    assert_eq!(schemes[2].num_slots(b400, &phy), 3);
}

#[test]
fn threshold_osnr_scales_with_bitrate() {
    let phy = PhysicalParams::default();
    let qpsk = ModulationScheme::new(4, Gain::from_db(6.8));
    let t100 = qpsk.threshold_osnr(TransmissionBitrate::from_gbps(100.0), &phy);
    let t400 = qpsk.threshold_osnr(TransmissionBitrate::from_gbps(400.0), &phy);
    // 100G / (2 * 12.5G) = 4
    assert!(close(t100.db(), 6.8 + 10.0 * 4f64.log10()));
    assert!(close(t400.db() - t100.db(), 10.0 * 4f64.log10()));
}

#[test]
fn schemes_order_by_spectral_efficiency() {
    let mut schemes = default_schemes();
    schemes.reverse();
    schemes.sort();
    let ms: Vec<u32> = schemes.iter().map(|s| s.m()).collect();
    assert_eq!(ms, vec![4, 16, 64]);
    assert!(schemes[0] < schemes[2]);
    assert_eq!(schemes[1].to_string(), "16-QAM");
}
