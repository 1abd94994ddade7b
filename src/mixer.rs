use crate::core::FrameFn;

/// Live time and tempo handles supplied by the host engine. `time` reports
/// seconds since the session started; `bpm` the current tempo. Both are
/// frame-evaluated callables, so fades and pulses track whatever the engine
/// reports at each frame.
#[derive(Clone, Debug)]
pub struct Clock {
    time: FrameFn,
    bpm: FrameFn,
}

impl Clock {
    pub fn new(time: FrameFn, bpm: FrameFn) -> Self {
        Self { time, bpm }
    }

    /// Frozen clock, mostly for offline composition.
    pub fn fixed(time_secs: f64, bpm: f64) -> Self {
        Self::new(FrameFn::constant(time_secs), FrameFn::constant(bpm))
    }

    pub fn time_secs(&self) -> f64 {
        self.time.call()
    }

    pub fn bpm(&self) -> f64 {
        self.bpm.call()
    }
}

/// Ramp from 0 to `max` over `duration_secs`, starting when the fader is
/// constructed, then hold `max`.
pub fn fade_in(clock: &Clock, duration_secs: f64, max: f64) -> FrameFn {
    let start = clock.time_secs();
    let time = clock.time.clone();
    FrameFn::new(move || ((time.call() - start) / duration_secs).min(1.0) * max)
}

/// Ramp from 1 down to `min` over `duration_secs`, starting when the fader
/// is constructed, then hold `min`.
pub fn fade_out(clock: &Clock, duration_secs: f64, min: f64) -> FrameFn {
    let end = clock.time_secs() + duration_secs;
    let time = clock.time.clone();
    FrameFn::new(move || ((end - time.call()) / duration_secs).max(0.0) * (1.0 - min) + min)
}

/// Square pulse: 1.0 during the first `duration_ms` of every `period_ms`
/// window, 0.0 otherwise.
pub fn pulse(clock: &Clock, period_ms: f64, duration_ms: f64) -> FrameFn {
    let time = clock.time.clone();
    FrameFn::new(move || {
        if (time.call() * 1000.0) % period_ms < duration_ms {
            1.0
        } else {
            0.0
        }
    })
}

/// Like [`pulse`], with the period derived from the clock's live tempo:
/// one pulse per beat at `speed` = 1, two at `speed` = 2.
pub fn pulse_bpm(clock: &Clock, speed: f64, duration_ms: f64) -> FrameFn {
    let time = clock.time.clone();
    let bpm = clock.bpm.clone();
    FrameFn::new(move || {
        let period_ms = 60.0 * 1000.0 / (bpm.call() * speed);
        if (time.call() * 1000.0) % period_ms < duration_ms {
            1.0
        } else {
            0.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // Clock backed by a settable time so tests can step frames by hand.
    fn test_clock(bpm: f64) -> (Arc<Mutex<f64>>, Clock) {
        let now = Arc::new(Mutex::new(0.0));
        let handle = Arc::clone(&now);
        let time = FrameFn::new(move || *handle.lock().unwrap());
        (now, Clock::new(time, FrameFn::constant(bpm)))
    }

    #[test]
    fn fade_in_ramps_and_clamps() {
        let (now, clock) = test_clock(120.0);
        let fader = fade_in(&clock, 2.0, 0.8);

        assert_eq!(fader.call(), 0.0);
        *now.lock().unwrap() = 1.0;
        assert!((fader.call() - 0.4).abs() < 1e-12);
        *now.lock().unwrap() = 5.0;
        assert_eq!(fader.call(), 0.8);
    }

    #[test]
    fn fade_in_start_is_captured_at_construction() {
        let (now, clock) = test_clock(120.0);
        *now.lock().unwrap() = 10.0;
        let fader = fade_in(&clock, 2.0, 1.0);
        *now.lock().unwrap() = 11.0;
        assert!((fader.call() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fade_out_ramps_down_to_min() {
        let (now, clock) = test_clock(120.0);
        let fader = fade_out(&clock, 2.0, 0.2);

        assert_eq!(fader.call(), 1.0);
        *now.lock().unwrap() = 1.0;
        assert!((fader.call() - 0.6).abs() < 1e-12);
        *now.lock().unwrap() = 10.0;
        assert!((fader.call() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn pulse_duty_boundary() {
        let (now, clock) = test_clock(120.0);
        let p = pulse(&clock, 1000.0, 100.0);

        assert_eq!(p.call(), 1.0);
        *now.lock().unwrap() = 0.099;
        assert_eq!(p.call(), 1.0);
        *now.lock().unwrap() = 0.1;
        assert_eq!(p.call(), 0.0);
        *now.lock().unwrap() = 1.05;
        assert_eq!(p.call(), 1.0);
    }

    #[test]
    fn pulse_bpm_follows_tempo() {
        // 120 bpm at speed 1 => 500ms period.
        let (now, clock) = test_clock(120.0);
        let p = pulse_bpm(&clock, 1.0, 100.0);

        *now.lock().unwrap() = 0.05;
        assert_eq!(p.call(), 1.0);
        *now.lock().unwrap() = 0.3;
        assert_eq!(p.call(), 0.0);
        *now.lock().unwrap() = 0.55;
        assert_eq!(p.call(), 1.0);
    }
}
