// Icon path helpers. Paths look like "/i/065000/065123.png".

pub const ICON_BASE_URL: &str = "https://xivapi.com/i/";
const ICON_PREFIX: &str = "/i/";
const ICON_SUFFIX: &str = ".png";

/// Last path segment without its extension.
pub fn icon_id(icon_path: &str) -> String {
    let segment = icon_path.rsplit('/').next().unwrap_or("");
    match segment.rsplit_once('.') {
        Some((stem, _ext)) => stem.to_string(),
        None => segment.to_string(),
    }
}

/// Public URL for an icon path; empty when there is no path.
pub fn icon_url(icon_path: &str) -> String {
    if icon_path.is_empty() {
        return String::new();
    }
    let path = icon_path.strip_prefix(ICON_PREFIX).unwrap_or(icon_path);
    let path = path.strip_suffix(ICON_SUFFIX).unwrap_or(path);
    format!("{ICON_BASE_URL}{path}{ICON_SUFFIX}")
}
