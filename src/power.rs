//! Battery telemetry seam and the supply-voltage discharge curve.

/// Battery level source, polled at a throttled interval by the
/// controller.  A read may block briefly (ADC conversion).
pub trait BatteryGauge {
    /// Current charge estimate in percent, `None` while unknown.
    fn percent(&mut self) -> Option<f32>;
}

/// Cell voltage below which the pack is treated as empty (mV).
const EMPTY_MV: u32 = 3400;

/// (millivolts, percent) anchors of a typical 1S LiPo discharge curve
/// under light load, descending.
const CURVE: [(u32, f32); 8] = [
    (4200, 100.0),
    (4060, 90.0),
    (3980, 80.0),
    (3920, 70.0),
    (3850, 60.0),
    (3780, 40.0),
    (3650, 20.0),
    (3500, 5.0),
];

/// Map a measured cell voltage onto a 0-100 % charge estimate by linear
/// interpolation between the curve anchors.
pub fn vbat_to_percent(millivolts: u32) -> f32 {
    if millivolts <= EMPTY_MV {
        return 0.0;
    }
    if millivolts >= CURVE[0].0 {
        return 100.0;
    }

    for pair in CURVE.windows(2) {
        let (hi_mv, hi_pct) = pair[0];
        let (lo_mv, lo_pct) = pair[1];
        if millivolts >= lo_mv {
            let span = (hi_mv - lo_mv) as f32;
            let above = (millivolts - lo_mv) as f32;
            return lo_pct + (hi_pct - lo_pct) * above / span;
        }
    }

    // Between the last anchor and empty.
    let (tail_mv, tail_pct) = CURVE[CURVE.len() - 1];
    tail_pct * (millivolts - EMPTY_MV) as f32 / (tail_mv - EMPTY_MV) as f32
}
