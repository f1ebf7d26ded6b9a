//! Message channel between the embedded page and the shell.
//!
//! Inbound traffic is one bare string per `postMessage`; outbound traffic is
//! a script calling the page's receiver function with a single string.
//! Every inbound command yields at most one outbound call and there is no
//! correlation id.

use crate::effects::Effect;
use crate::features::permission::request_camera_permission;
use crate::state::AppState;

pub const CMD_REQUEST_CAMERA_PERMISSION: &str = "requestCameraPermission";
// Misspelled on the wire; existing pages send exactly this.
pub const CMD_REQUEST_MESSAGE: &str = "requesrMessage";
pub const CMD_READ_QR: &str = "readQR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeCommand {
    RequestCameraPermission,
    RequestMessage,
    ReadQr,
}

impl BridgeCommand {
    /// `None` for anything outside the vocabulary, including `readQR` when
    /// scanning is unavailable.
    pub fn parse(data: &str, qr_scan_available: bool) -> Option<Self> {
        match data {
            CMD_REQUEST_CAMERA_PERMISSION => Some(BridgeCommand::RequestCameraPermission),
            CMD_REQUEST_MESSAGE => Some(BridgeCommand::RequestMessage),
            CMD_READ_QR if qr_scan_available => Some(BridgeCommand::ReadQr),
            _ => None,
        }
    }
}

pub fn handle_bridge_message(state: &mut AppState, data: &str) {
    let Some(command) = BridgeCommand::parse(data, state.config().qr_scan_available()) else {
        log::debug!("ignoring bridge payload {data:?}");
        return;
    };

    match command {
        // Outcome is not echoed back; the page only sees its side effects.
        BridgeCommand::RequestCameraPermission => request_camera_permission(state),
        BridgeCommand::RequestMessage => {
            let greeting = state.config().greeting.clone();
            inject_reply(state, &greeting);
        }
        BridgeCommand::ReadQr => {
            state.camera_overlay_visible = true;
        }
    }
}

/// Forward a scanned payload to the page and close the scan view. Late frames
/// arriving after the overlay closed are dropped so one scan yields one reply.
pub fn deliver_scan(state: &mut AppState, text: &str) -> bool {
    if !state.camera_overlay_visible {
        log::debug!("dropping scan result, overlay already closed");
        return false;
    }
    state.camera_overlay_visible = false;
    inject_reply(state, text);
    true
}

fn inject_reply(state: &mut AppState, text: &str) {
    let script = reply_script(&state.config().receiver_function, text);
    log::debug!("inject: {script}");
    state.push_effect(Effect::InjectJavaScript { script });
}

/// `receiver("<text>");` with `text` quoted as a JS string literal so the page
/// gets it unchanged.
pub fn reply_script(receiver: &str, text: &str) -> String {
    let literal = serde_json::Value::String(text.to_string()).to_string();
    format!("{receiver}({literal});")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use rstest::rstest;

    fn browsing() -> AppState {
        let mut state = AppState::new();
        state.search_mode = true;
        state
    }

    fn scripts(state: &mut AppState) -> Vec<String> {
        state
            .take_effects()
            .into_iter()
            .filter_map(|e| match e {
                Effect::InjectJavaScript { script } => Some(script),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn greeting_is_injected_once() {
        let mut state = browsing();
        handle_bridge_message(&mut state, "requesrMessage");
        assert_eq!(
            scripts(&mut state),
            vec![r#"readMessage("Hola vengo desde la app nativa");"#.to_string()]
        );
    }

    #[test]
    fn greeting_ignores_url_and_overlay() {
        let mut state = browsing();
        state.url = "https://example.org/?q='x'".into();
        state.camera_overlay_visible = true;
        handle_bridge_message(&mut state, "requesrMessage");
        assert_eq!(scripts(&mut state).len(), 1);
        assert!(state.camera_overlay_visible);
    }

    #[test]
    fn correctly_spelled_request_is_not_recognized() {
        let mut state = browsing();
        handle_bridge_message(&mut state, "requestMessage");
        assert!(state.take_effects().is_empty());
    }

    #[cfg(feature = "qr-scan")]
    #[test]
    fn read_qr_is_idempotent() {
        let mut state = browsing();
        handle_bridge_message(&mut state, "readQR");
        assert!(state.camera_overlay_visible);
        handle_bridge_message(&mut state, "readQR");
        assert!(state.camera_overlay_visible);
        assert!(state.take_effects().is_empty());
    }

    #[test]
    fn read_qr_ignored_when_disabled() {
        let mut state = browsing();
        state.config = Some(ShellConfig {
            qr_scan_enabled: false,
            ..ShellConfig::default()
        });
        handle_bridge_message(&mut state, "readQR");
        assert!(!state.camera_overlay_visible);
    }

    #[cfg(not(feature = "qr-scan"))]
    #[test]
    fn read_qr_is_unknown_without_scanner() {
        let mut state = browsing();
        handle_bridge_message(&mut state, "readQR");
        assert!(!state.camera_overlay_visible);
    }

    #[test]
    fn permission_command_requests_without_reply() {
        let mut state = browsing();
        handle_bridge_message(&mut state, "requestCameraPermission");
        let effects = state.take_effects();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::RequestCameraPermission { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("readqr")]
    #[case(" readQR")]
    #[case("hello")]
    #[case("{\"cmd\":\"readQR\"}")]
    fn unknown_payloads_change_nothing(#[case] payload: &str) {
        let mut state = browsing();
        state.url = "example.org".into();
        handle_bridge_message(&mut state, payload);
        assert!(state.take_effects().is_empty());
        assert!(!state.camera_overlay_visible);
        assert!(state.search_mode);
        assert_eq!(state.url, "example.org");
    }

    #[test]
    fn scan_hides_overlay_and_replies_verbatim() {
        let mut state = browsing();
        state.camera_overlay_visible = true;
        let payload = "it's \"quoted\"\\n\nline2 ñ 🚀";
        assert!(deliver_scan(&mut state, payload));
        assert!(!state.camera_overlay_visible);
        let out = scripts(&mut state);
        assert_eq!(out.len(), 1);
        let arg = out[0]
            .strip_prefix("readMessage(")
            .and_then(|s| s.strip_suffix(");"))
            .unwrap();
        let decoded: String = serde_json::from_str(arg).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn scan_after_close_is_dropped() {
        let mut state = browsing();
        assert!(!deliver_scan(&mut state, "late"));
        assert!(state.take_effects().is_empty());
    }

    #[test]
    fn custom_receiver_is_used() {
        assert_eq!(reply_script("bridge.onMessage", "ok"), r#"bridge.onMessage("ok");"#);
    }
}
