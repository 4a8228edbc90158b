use crate::phy::{TransmissionBitrate, default_bitrates};
use crate::sim::CallGenerator;

#[test]
fn calls_have_distinct_endpoints_and_ordered_times() {
    let mut generator = CallGenerator::new(5, default_bitrates(), 10.0, 1.0, 17);
    let mut last = None;
    for _ in 0..2_000 {
        let c = generator.generate();
        assert_ne!(c.origin(), c.destination());
        assert!(c.origin().0 < 5 && c.destination().0 < 5);
        assert!(c.ending() > c.arrival());
        if let Some(prev) = last {
            assert!(c.arrival() >= prev);
        }
        last = Some(c.arrival());
    }
    assert_eq!(generator.generated(), 2_000);
}

#[test]
fn mean_interarrival_matches_load_over_holding_time() {
    // 速率 = 负载 / 平均持续时间 = 20 次/秒
    let mut generator = CallGenerator::new(4, default_bitrates(), 10.0, 0.5, 3);
    assert_eq!(generator.arrival_rate(), 20.0);
    let n = 20_000;
    let mut holding = 0.0;
    let mut last = None;
    for _ in 0..n {
        let c = generator.generate();
        holding += c.ending().as_secs_f64() - c.arrival().as_secs_f64();
        last = Some(c.arrival());
    }
    let elapsed = last.map(|t| t.as_secs_f64()).unwrap_or(0.0);
    let mean_gap = elapsed / n as f64;
    assert!((mean_gap - 0.05).abs() < 0.05 * 0.05, "mean gap {mean_gap}");
    let mean_holding = holding / n as f64;
    assert!((mean_holding - 0.5).abs() < 0.5 * 0.05, "mean holding {mean_holding}");
}

#[test]
fn bitrates_come_from_the_menu() {
    let menu = vec![
        TransmissionBitrate::from_gbps(10.0),
        TransmissionBitrate::from_gbps(400.0),
    ];
    let mut generator = CallGenerator::new(3, menu.clone(), 5.0, 1.0, 8);
    let mut seen = [false; 2];
    for _ in 0..200 {
        let b = generator.generate().bitrate();
        let i = menu.iter().position(|m| *m == b).expect("bitrate from menu");
        seen[i] = true;
    }
    assert_eq!(seen, [true, true]);
}

#[test]
fn same_seed_same_calls() {
    let draw = |seed| {
        let mut g = CallGenerator::new(6, default_bitrates(), 30.0, 1.0, seed);
        (0..50)
            .map(|_| {
                let c = g.generate();
                (c.origin(), c.destination(), c.arrival(), c.ending())
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(5), draw(5));
    assert_ne!(draw(5), draw(6));
}
