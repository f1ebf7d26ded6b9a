use crate::config::ConsentDialog;
use serde::Serialize;

pub const CAMERA_PERMISSION: &str = "android.permission.CAMERA";

/// Platform work the host performs after rendering a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Effect {
    InjectJavaScript {
        script: String,
    },
    RequestCameraPermission {
        permission: &'static str,
        #[serde(flatten)]
        dialog: ConsentDialog,
    },
    WebViewGoBack,
}

impl Effect {
    pub fn camera_permission(dialog: &ConsentDialog) -> Self {
        Effect::RequestCameraPermission {
            permission: CAMERA_PERMISSION,
            dialog: dialog.clone(),
        }
    }
}
