// Browser helpers shared by the components.
use wasm_bindgen::JsValue;

/// Milliseconds on the same clock as event and animation-frame timestamps.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// Very light tap used when the carousel commits to another image.
pub fn selection_haptic() {
    let Some(win) = web_sys::window() else {
        return;
    };
    let navigator = win.navigator();
    // Safari has no Vibration API; calling it would throw.
    if js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false) {
        let _ = navigator.vibrate_with_duration(5);
    }
}

/// `2024-05-01T10:00:00` -> `1 mei 2024`. Unparseable input is returned as is.
pub fn format_date(raw: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return raw.to_owned();
    }
    let options = js_sys::Object::new();
    for (k, v) in [("year", "numeric"), ("month", "short"), ("day", "numeric")] {
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str(k), &JsValue::from_str(v));
    }
    date.to_locale_date_string("nl-NL", &options).into()
}
