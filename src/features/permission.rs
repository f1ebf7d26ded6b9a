use crate::effects::Effect;
use crate::state::AppState;

/// Outcome reported by the host once the consent dialog closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionReply {
    pub result: Option<String>,
    pub error: Option<String>,
}

/// Ask for camera access. Platforms without runtime consent need nothing
/// here: the camera view itself carries the implicit grant.
pub fn request_camera_permission(state: &mut AppState) {
    let config = state.config();
    if !config.platform.requires_runtime_consent() {
        log::debug!("camera permission implicit on {:?}", config.platform);
        return;
    }
    let effect = Effect::camera_permission(&config.consent_dialog);
    state.push_effect(effect);
}

/// Collapse a dialog outcome to granted / not granted. Errors are logged and
/// count as a denial; nothing here fails.
pub fn resolve_permission(reply: &PermissionReply) -> bool {
    if let Some(err) = &reply.error {
        log::warn!("camera permission request failed: {err}");
        return false;
    }
    match reply.result.as_deref() {
        Some("granted") => true,
        Some("denied") | Some("never_ask_again") | None => false,
        Some(other) => {
            log::warn!("unexpected camera permission result: {other}");
            false
        }
    }
}
