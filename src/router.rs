use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::features::bridge::{deliver_scan, handle_bridge_message};
use crate::features::navigation::{handle_hardware_back, toggle_search, update_url};
use crate::features::permission::{request_camera_permission, resolve_permission, PermissionReply};
use crate::features::screens::{render_screen, URL_BIND_KEY};
use crate::i18n::update_locale;
use crate::logging;
use crate::state::AppState;

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{collections::HashMap, ptr, sync::Mutex};

static STATE: Mutex<AppState> = Mutex::new(AppState::new());

#[derive(Deserialize, Default)]
struct Command {
    action: String,
    data: Option<String>,
    bindings: Option<HashMap<String, String>>,
    result: Option<String>,
    error: Option<String>,
    can_go_back: Option<bool>,
    locale: Option<String>,
    config: Option<Value>,
}

#[derive(Debug)]
enum Action {
    Init {
        config: Option<Value>,
        locale: Option<String>,
    },
    Mount,
    Unmount,
    Reset,
    UrlChanged {
        url: String,
    },
    ToggleSearch {
        url: Option<String>,
    },
    BridgeMessage {
        data: String,
    },
    CameraPermissionResult(PermissionReply),
    QrScanned {
        text: String,
    },
    HardwareBack {
        can_go_back: bool,
    },
    SetLocale {
        locale: String,
    },
}

fn parse_action(command: Command) -> ShellResult<Action> {
    let Command {
        action,
        data,
        bindings,
        result,
        error,
        can_go_back,
        locale,
        config,
    } = command;

    let mut bindings = bindings.unwrap_or_default();

    match action.as_str() {
        "init" => Ok(Action::Init { config, locale }),
        "mount" => Ok(Action::Mount),
        "unmount" => Ok(Action::Unmount),
        "reset" => Ok(Action::Reset),
        "url_changed" => Ok(Action::UrlChanged {
            url: bindings.remove(URL_BIND_KEY).unwrap_or_default(),
        }),
        "toggle_search" => Ok(Action::ToggleSearch {
            url: bindings.remove(URL_BIND_KEY),
        }),
        // An empty message is still a message; it is ignored by the bridge.
        "bridge_message" => Ok(Action::BridgeMessage {
            data: data.unwrap_or_default(),
        }),
        "camera_permission_result" => {
            Ok(Action::CameraPermissionResult(PermissionReply { result, error }))
        }
        "qr_scanned" => Ok(Action::QrScanned {
            text: data.ok_or(ShellError::MissingField("data"))?,
        }),
        "hardware_back" => Ok(Action::HardwareBack {
            can_go_back: can_go_back.unwrap_or(false),
        }),
        "set_locale" => Ok(Action::SetLocale {
            locale: locale.ok_or(ShellError::MissingField("locale"))?,
        }),
        other => Err(ShellError::UnknownAction(other.to_string())),
    }
}

#[no_mangle]
pub extern "system" fn Java_aeska_webshell_MainActivity_dispatch(
    mut env: JNIEnv,
    _class: JClass,
    input: JString,
) -> jstring {
    logging::init();
    let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(
        || -> ShellResult<Value> {
            let input_str: String = env.get_string(&input)?.into();
            dispatch_json(&input_str)
        },
    ));

    let json_value = match response {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            log::error!("dispatch failed: {err}");
            error_response(&err.to_string())
        }
        Err(_) => {
            log::error!("dispatch panicked");
            error_response("panic")
        }
    };

    let output_string = json_value.to_string();
    match env.new_string(output_string) {
        Ok(java_str) => java_str.into_raw(),
        Err(_) => {
            let fallback = error_response("jni_new_string_failed").to_string();
            env.new_string(fallback)
                .map(|s| s.into_raw())
                .unwrap_or(ptr::null_mut())
        }
    }
}

#[cfg(feature = "qr-scan")]
#[no_mangle]
pub extern "system" fn Java_aeska_webshell_MainActivity_processQrCameraFrame(
    env: JNIEnv,
    _class: JClass,
    luma_array: jni::objects::JByteArray,
    width: jni::sys::jint,
    height: jni::sys::jint,
    row_stride: jni::sys::jint,
) -> jstring {
    use crate::features::qr_scan::decode_qr_frame_luma;

    logging::init();
    let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(
        || -> ShellResult<jstring> {
            let luma_data = env.convert_byte_array(&luma_array)?;
            let decoded = decode_qr_frame_luma(
                &luma_data,
                width.max(0) as u32,
                height.max(0) as u32,
                row_stride.max(0) as u32,
            );
            match decoded {
                Ok(Some(text)) => Ok(env.new_string(text)?.into_raw()),
                Ok(None) => Ok(ptr::null_mut()), // No QR code found
                Err(e) => {
                    log::warn!("{e}");
                    Ok(ptr::null_mut())
                }
            }
        },
    ));

    match response {
        Ok(Ok(res)) => res,
        Ok(Err(e)) => {
            log::warn!("frame rejected: {e}");
            ptr::null_mut()
        }
        Err(_) => ptr::null_mut(),
    }
}

fn dispatch_json(input: &str) -> ShellResult<Value> {
    let command: Command = serde_json::from_str(input)?;
    handle_command(command)
}

fn handle_command(command: Command) -> ShellResult<Value> {
    let mut lock_poisoned = false;
    let mut state = match STATE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            lock_poisoned = true;
            poisoned.into_inner()
        }
    };

    let action = match parse_action(command) {
        Ok(action) => action,
        Err(err) => {
            // Rejected commands keep the current screen; only the error line changes.
            log::warn!("rejected command: {err}");
            state.last_error = Some(err.to_string());
            return Ok(json!({
                "ui": render_screen(&state),
                "effects": []
            }));
        }
    };

    state.last_error = None;
    if lock_poisoned {
        log::error!("state mutex poisoned, continuing with recovered state");
        state.last_error = Some("state_poisoned".into());
        STATE.clear_poison();
    }

    let mut back_consumed = None;

    match action {
        Action::Init { config, locale } => {
            if let Some(raw) = config {
                match ShellConfig::from_value(raw) {
                    Ok(cfg) => {
                        state.config = Some(cfg);
                        state.last_error = None;
                    }
                    Err(err) => {
                        log::warn!("keeping previous config: {err}");
                        state.last_error = Some(err.to_string());
                    }
                }
            }
            if let Some(locale) = locale {
                update_locale(&mut state, &locale);
            }
        }
        Action::Mount => {
            if state.config().platform.has_hardware_back() {
                state.back_subscription.register();
            }
            request_camera_permission(&mut state);
        }
        Action::Unmount => {
            state.back_subscription.unregister();
        }
        Action::Reset => {
            state.reset_runtime();
        }
        Action::UrlChanged { url } => {
            update_url(&mut state, &url);
        }
        Action::ToggleSearch { url } => {
            if let Some(url) = url {
                update_url(&mut state, &url);
            }
            toggle_search(&mut state);
        }
        Action::BridgeMessage { data } => {
            handle_bridge_message(&mut state, &data);
        }
        Action::CameraPermissionResult(reply) => {
            let granted = resolve_permission(&reply);
            log::info!("camera permission granted: {granted}");
        }
        Action::QrScanned { text } => {
            deliver_scan(&mut state, &text);
        }
        Action::HardwareBack { can_go_back } => {
            back_consumed = Some(handle_hardware_back(&mut state, can_go_back));
        }
        Action::SetLocale { locale } => {
            update_locale(&mut state, &locale);
        }
    }

    let effects = state.take_effects();
    let mut response = json!({
        "ui": render_screen(&state),
        "effects": effects,
    });
    if let Some(consumed) = back_consumed {
        response["back_consumed"] = json!(consumed);
    }
    Ok(response)
}

fn error_response(message: &str) -> Value {
    let mut state = STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    state.last_error = Some(message.to_string());
    json!({
        "ui": render_screen(&state),
        "effects": []
    })
}
