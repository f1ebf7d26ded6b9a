use crate::features::navigation::ShellScreen;
use crate::state::AppState;
use crate::ui::{
    Button as UiButton, CameraOverlay as UiCameraOverlay, Column as UiColumn,
    Text as UiText, TextInput as UiTextInput, WebView as UiWebView,
};
use rust_i18n::t;
use serde_json::Value;

pub const ACTION_URL_CHANGED: &str = "url_changed";
pub const ACTION_TOGGLE_SEARCH: &str = "toggle_search";
pub const ACTION_BRIDGE_MESSAGE: &str = "bridge_message";
pub const ACTION_QR_SCANNED: &str = "qr_scanned";
pub const URL_BIND_KEY: &str = "url";

pub fn render_screen(state: &AppState) -> Value {
    match state.current_screen() {
        ShellScreen::UrlEntry => render_url_entry(state),
        ShellScreen::Browsing => render_browsing(state, false),
        ShellScreen::BrowsingWithScanOverlay => render_browsing(state, true),
    }
}

fn render_url_entry(state: &AppState) -> Value {
    let locale = state.locale();
    let hint = t!("ui.url_hint", locale = locale);
    let search = t!("ui.search", locale = locale);

    let mut children = vec![
        serde_json::to_value(
            UiTextInput::new(URL_BIND_KEY)
                .text(&state.url)
                .hint(&hint)
                .action_on_change(ACTION_URL_CHANGED)
                .action_on_submit(ACTION_TOGGLE_SEARCH)
                .single_line(true),
        )
        .unwrap(),
        serde_json::to_value(UiButton::new(&search, ACTION_TOGGLE_SEARCH).id("search")).unwrap(),
    ];
    push_error(&mut children, state);

    serde_json::to_value(UiColumn::new(children).padding(24).centered(true)).unwrap()
}

fn render_browsing(state: &AppState, with_overlay: bool) -> Value {
    let locale = state.locale();
    let back = t!("ui.back", locale = locale);

    let mut children = vec![
        serde_json::to_value(UiWebView::new(&state.url, ACTION_BRIDGE_MESSAGE)).unwrap(),
        serde_json::to_value(UiButton::new(&back, ACTION_TOGGLE_SEARCH).id("back")).unwrap(),
    ];
    if with_overlay {
        let hint = t!("ui.scan_hint", locale = locale);
        children.push(
            serde_json::to_value(UiCameraOverlay::new(ACTION_QR_SCANNED).hint(&hint)).unwrap(),
        );
    }
    push_error(&mut children, state);

    serde_json::to_value(UiColumn::new(children)).unwrap()
}

fn push_error(children: &mut Vec<Value>, state: &AppState) {
    if let Some(err) = &state.last_error {
        children.push(
            serde_json::to_value(
                UiText::new(&format!("Error: {err}"))
                    .size(12.0)
                    .content_description("shell_error"),
            )
            .unwrap(),
        );
    }
}
