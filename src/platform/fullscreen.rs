//! Fullscreen control for the cinematic gateway

#[cfg(target_arch = "wasm32")]
pub fn is_fullscreen() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.fullscreen_element())
        .is_some()
}

/// Request fullscreen on the document element (must run inside a user gesture)
#[cfg(target_arch = "wasm32")]
pub fn enter() {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Err(e) = root.request_fullscreen() {
        log::warn!("Fullscreen request failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn exit() {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
        }
    }
}

/// Toggle, returning the requested state
#[cfg(target_arch = "wasm32")]
pub fn toggle() -> bool {
    if is_fullscreen() {
        exit();
        false
    } else {
        enter();
        true
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn is_fullscreen() -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn enter() {}

#[cfg(not(target_arch = "wasm32"))]
pub fn exit() {}

#[cfg(not(target_arch = "wasm32"))]
pub fn toggle() -> bool {
    false
}
