//! Pointer input and throw charging
//!
//! The host captures device events and forwards them already normalized:
//! pixel coordinates plus a timestamp in seconds on the same clock that
//! drives the frame loop. Holding the pointer down charges a throw; the
//! held duration maps to launch speed.

/// Normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Press at pixel position, with timestamp (seconds)
    Down { x: f32, y: f32, time: f64 },
    /// Motion at pixel position
    Move { x: f32, y: f32 },
    /// Release at pixel position, with timestamp (seconds)
    Up { x: f32, y: f32, time: f64 },
}

impl PointerEvent {
    /// Pixel position carried by the event.
    pub fn position(&self) -> (f32, f32) {
        match *self {
            PointerEvent::Down { x, y, .. }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y, .. } => (x, y),
        }
    }
}

/// Press/release bookkeeping for one charge-and-throw cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargeState {
    charging: bool,
    press_time: f64,
}

impl ChargeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start charging. A second press restarts the charge.
    ///
    /// A press with a non-finite timestamp is ignored.
    pub fn press(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        self.charging = true;
        self.press_time = time;
    }

    /// Finish charging and return the held duration in seconds.
    ///
    /// Returns `None` if no press is in progress. A release stamped before
    /// the press, or with a non-finite timestamp, yields zero.
    pub fn release(&mut self, time: f64) -> Option<f32> {
        if !self.charging {
            return None;
        }
        self.charging = false;
        if !time.is_finite() {
            return Some(0.0);
        }
        Some((time - self.press_time).max(0.0) as f32)
    }

    /// Drop an in-progress charge without throwing.
    pub fn cancel(&mut self) {
        self.charging = false;
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    #[inline]
    pub fn press_time(&self) -> Option<f64> {
        self.charging.then_some(self.press_time)
    }

    /// Charge-bar progress in [0, 1]: held time over `full_charge` seconds.
    ///
    /// Zero when not charging.
    pub fn progress(&self, now: f64, full_charge: f32) -> f32 {
        if !self.charging || full_charge.is_nan() || full_charge <= 0.0 {
            return 0.0;
        }
        let progress = ((now - self.press_time) / full_charge as f64) as f32;
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0)
    }
}

/// Map a held duration onto [0, 1] between the minimum and maximum charge times.
///
/// Releases shorter than `min_time` give 0, longer than `max_time` give 1.
pub fn normalized_charge(held: f32, min_time: f32, max_time: f32) -> f32 {
    let span = max_time - min_time;
    if span <= 0.0 {
        return if held >= max_time { 1.0 } else { 0.0 };
    }
    let held = held.clamp(0.0, max_time);
    ((held - min_time) / span).clamp(0.0, 1.0)
}
