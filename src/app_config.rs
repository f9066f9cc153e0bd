use svg_studio_core::config::normalize_api_base;
use svg_studio_core::StudioConfig;

/// Base URL baked in at build time. Empty means same-origin relative paths.
pub(crate) fn default_api_base() -> String {
    option_env!("SVG_STUDIO_API_BASE")
        .or(option_env!("TRUNK_PUBLIC_SVG_STUDIO_API_BASE"))
        .map(normalize_api_base)
        .unwrap_or_default()
}

pub(crate) fn load_config() -> StudioConfig {
    let config = StudioConfig::default().with_api_base(&default_api_base());
    if !config.api_base.is_empty() {
        gloo::console::log!("api base", config.api_base.clone());
    }
    config
}
