//! Vibration patterns

/// Haptic triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticEvent {
    Tap,
    HeavyPress,
    ModeSwitch,
    /// One beat of the scanner sweep
    ScanPulse,
    Unlock,
}

impl HapticEvent {
    /// Alternating on/off durations in milliseconds (starts with "on")
    pub fn pattern(&self) -> &'static [u32] {
        match self {
            HapticEvent::Tap => &[10],
            HapticEvent::HeavyPress => &[40, 30, 60],
            HapticEvent::ModeSwitch => &[20, 40, 20],
            HapticEvent::ScanPulse => &[15],
            HapticEvent::Unlock => &[30, 50, 30, 50, 120],
        }
    }

    /// Total wall time of the pattern
    pub fn total_ms(&self) -> u32 {
        self.pattern().iter().sum()
    }
}

/// Fire a vibration if the device supports it and the user allows it
#[cfg(target_arch = "wasm32")]
pub fn vibrate(event: HapticEvent, enabled: bool) {
    use wasm_bindgen::JsValue;

    if !enabled {
        return;
    }
    let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
        return;
    };
    // Safari has no Vibration API; calling it would throw
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false);
    if !supported {
        log::debug!("Vibration API unavailable");
        return;
    }

    let pattern: js_sys::Array = event
        .pattern()
        .iter()
        .map(|ms| JsValue::from(*ms))
        .collect();
    if !navigator.vibrate_with_pattern(&pattern) {
        log::debug!("Vibration rejected for {:?}", event);
    }
}

/// Native stub
#[cfg(not(target_arch = "wasm32"))]
pub fn vibrate(event: HapticEvent, enabled: bool) {
    if enabled {
        log::trace!("haptic {:?} ({} ms)", event, event.total_ms());
    }
}
