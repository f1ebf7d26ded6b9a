use crate::effects::Effect;
use crate::state::AppState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShellScreen {
    UrlEntry,
    Browsing,
    BrowsingWithScanOverlay,
}

/// Registration of the hardware back listener. Held by the screen between
/// `mount` and `unmount`; presses outside that window are never handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackSubscription {
    active: bool,
}

impl BackSubscription {
    pub const fn new() -> Self {
        Self { active: false }
    }

    pub fn register(&mut self) {
        self.active = true;
    }

    pub fn unregister(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for BackSubscription {
    fn default() -> Self {
        Self::new()
    }
}

/// The single "Buscar"/"Volver" button.
pub fn toggle_search(state: &mut AppState) {
    if state.search_mode {
        // Leaving the browser unmounts the scan view with it.
        state.camera_overlay_visible = false;
    }
    state.search_mode = !state.search_mode;
}

pub fn update_url(state: &mut AppState, url: &str) {
    state.url.clear();
    state.url.push_str(url);
}

/// Returns whether the press was consumed. An unconsumed press falls through
/// to the platform default (leaving the screen).
pub fn handle_hardware_back(state: &mut AppState, can_go_back: bool) -> bool {
    if !state.back_subscription.is_active() {
        return false;
    }
    match state.current_screen() {
        ShellScreen::BrowsingWithScanOverlay => {
            state.camera_overlay_visible = false;
            true
        }
        ShellScreen::Browsing if can_go_back => {
            state.push_effect(Effect::WebViewGoBack);
            true
        }
        ShellScreen::Browsing | ShellScreen::UrlEntry => false,
    }
}
