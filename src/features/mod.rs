pub mod bridge;
pub mod navigation;
pub mod permission;
#[cfg(feature = "qr-scan")]
pub mod qr_scan;
pub mod screens;
