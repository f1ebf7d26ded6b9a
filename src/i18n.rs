use crate::state::AppState;

pub fn update_locale(state: &mut AppState, locale_str: &str) {
    let normalized = normalize_locale(locale_str);
    state.locale = normalized.to_string();
    rust_i18n::set_locale(normalized);
}

fn normalize_locale(locale_str: &str) -> &'static str {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return "es";
    }

    // Compiled locales are keyed by bare language ("es", "en"); fold
    // BCP-47 tags like "es-MX" / "en_US" down to one of them.
    let lower = trimmed.to_ascii_lowercase().replace('_', "-");
    let lang = lower.split('-').next().unwrap_or("es");

    match lang {
        "en" => "en",
        _ => "es",
    }
}
