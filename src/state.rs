use crate::config::{default_config, ShellConfig};
use crate::effects::Effect;
use crate::features::navigation::{BackSubscription, ShellScreen};

pub struct AppState {
    pub url: String,
    pub search_mode: bool,
    pub camera_overlay_visible: bool,
    pub locale: String,
    pub config: Option<ShellConfig>,
    pub back_subscription: BackSubscription,
    pub pending_effects: Vec<Effect>,
    pub last_error: Option<String>,
}

impl AppState {
    // const so it can be used in static initialization
    pub const fn new() -> Self {
        Self {
            url: String::new(),
            search_mode: false,
            camera_overlay_visible: false,
            locale: String::new(),
            config: None,
            back_subscription: BackSubscription::new(),
            pending_effects: Vec::new(),
            last_error: None,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        self.config.as_ref().unwrap_or_else(|| default_config())
    }

    pub fn locale(&self) -> &str {
        if self.locale.is_empty() {
            "es"
        } else {
            &self.locale
        }
    }

    pub fn current_screen(&self) -> ShellScreen {
        match (self.search_mode, self.camera_overlay_visible) {
            (false, _) => ShellScreen::UrlEntry,
            (true, false) => ShellScreen::Browsing,
            (true, true) => ShellScreen::BrowsingWithScanOverlay,
        }
    }

    pub fn push_effect(&mut self, effect: Effect) {
        self.pending_effects.push(effect);
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending_effects)
    }

    /// Back to the first frame of the screen. Configuration, locale and the
    /// back listener belong to the host lifecycle and survive.
    pub fn reset_runtime(&mut self) {
        self.url.clear();
        self.search_mode = false;
        self.camera_overlay_visible = false;
        self.pending_effects.clear();
        self.last_error = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
