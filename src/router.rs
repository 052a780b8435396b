//! Fragment routes: `#/page/<id>` or home.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Page(String),
}

/// Parse a URL fragment. Anything that is not `#/page/<encoded id>` is home.
///
/// - `""`, `"#"`, `"#/"` are home
/// - `"#/page/install%20guide"` is the page `install guide`
/// - `"#/page"` and `"#/other/x"` are home
pub fn parse_route(hash: &str) -> Route {
    let trimmed = hash.trim();
    let path = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

    match parts.as_slice() {
        ["page", encoded, ..] => match urlencoding::decode(encoded) {
            Ok(id) => Route::Page(id.into_owned()),
            Err(e) => {
                tracing::debug!("Undecodable page route {:?}: {}", hash, e);
                Route::Home
            }
        },
        _ => Route::Home,
    }
}

/// Fragment that opens page `id`.
pub fn page_href(id: &str) -> String {
    format!("#/page/{}", urlencoding::encode(id))
}
