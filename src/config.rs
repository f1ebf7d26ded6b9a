use crate::error::{ShellError, ShellResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

pub const DEFAULT_GREETING: &str = "Hola vengo desde la app nativa";
pub const DEFAULT_RECEIVER: &str = "readMessage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// Android asks the user at runtime; iOS grants implicitly when the
    /// camera view is created.
    pub fn requires_runtime_consent(self) -> bool {
        matches!(self, Platform::Android)
    }

    pub fn has_hardware_back(self) -> bool {
        matches!(self, Platform::Android)
    }
}

/// Copy shown by the platform consent dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentDialog {
    pub title: String,
    pub message: String,
    pub button_positive: String,
    pub button_negative: String,
    pub button_neutral: String,
}

impl Default for ConsentDialog {
    fn default() -> Self {
        Self {
            title: String::from("Permiso de cámara"),
            message: String::from("Esta aplicación necesita acceder a tu cámara."),
            button_positive: String::from("Aceptar"),
            button_negative: String::from("Cancelar"),
            button_neutral: String::from("Preguntar luego"),
        }
    }
}

/// Host supplied configuration, sent with the `init` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub platform: Platform,
    /// Text sent back for the `requesrMessage` bridge command.
    pub greeting: String,
    /// Page-defined function receiving every injected reply.
    pub receiver_function: String,
    pub consent_dialog: ConsentDialog,
    /// Runtime switch for the scan overlay; ignored without the `qr-scan` feature.
    pub qr_scan_enabled: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Android,
            greeting: String::from(DEFAULT_GREETING),
            receiver_function: String::from(DEFAULT_RECEIVER),
            consent_dialog: ConsentDialog::default(),
            qr_scan_enabled: true,
        }
    }
}

impl ShellConfig {
    pub fn from_value(value: Value) -> ShellResult<Self> {
        let config: ShellConfig =
            serde_json::from_value(value).map_err(|e| ShellError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ShellResult<()> {
        if !is_js_identifier(&self.receiver_function) {
            return Err(ShellError::Config(format!(
                "receiver_function:{}",
                self.receiver_function
            )));
        }
        Ok(())
    }

    pub fn qr_scan_available(&self) -> bool {
        cfg!(feature = "qr-scan") && self.qr_scan_enabled
    }
}

pub fn default_config() -> &'static ShellConfig {
    static DEFAULT: OnceLock<ShellConfig> = OnceLock::new();
    DEFAULT.get_or_init(ShellConfig::default)
}

// The receiver name is spliced into script text, so only plain (dotted)
// identifiers are accepted.
fn is_js_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}
