//! HTML page handlers for the editor and the sketch viewer.
//!
//! Pages are embedded at compile time and filled by placeholder
//! replacement, the same way the client script is served.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};

use crate::error::ApiError;
use crate::state::AppState;

const EDITOR_HTML: &str = include_str!("../../static/editor.html");
const VIEWER_HTML: &str = include_str!("../../static/viewer.html");
const LIVECODE_JS: &str = include_str!("../../static/livecode.js");

const ID_PLACEHOLDER: &str = "__PROGRAM_ID__";

/// Redirects bare requests to the default program's editor.
///
/// `GET /`
pub async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!("/edit/{}", state.service.default_id()))
}

/// Serves the editor, creating the program on first view.
///
/// `GET /edit/{id}`
pub async fn editor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = state.service.open_for_edit(&id)?;
    Ok(Html(EDITOR_HTML.replace(ID_PLACEHOLDER, &escape_html(id.as_str()))))
}

/// Redirects `/program/{id}` to the viewer's canonical trailing-slash URL.
///
/// `GET /program/{id}`
pub async fn viewer_redirect(Path(id): Path<String>) -> Result<Redirect, ApiError> {
    let id = crate::service::ProgramService::parse_id(&id)?;
    Ok(Redirect::to(&format!("/program/{id}/")))
}

/// Serves the sketch viewer. The page pulls the program in unmodified
/// from the sibling `script.js` route.
///
/// `GET /program/{id}/`
pub async fn viewer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    state.service.source(&id)?;
    Ok(Html(VIEWER_HTML.replace(ID_PLACEHOLDER, &escape_html(&id))))
}

/// Serves the editor client script.
///
/// `GET /www/livecode.js`
pub async fn livecode_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        LIVECODE_JS,
    )
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_carry_placeholders() {
        assert!(EDITOR_HTML.contains(ID_PLACEHOLDER));
        assert!(VIEWER_HTML.contains(ID_PLACEHOLDER));
        assert!(VIEWER_HTML.contains("<script src=\"script.js\"></script>"));
    }

    #[test]
    fn escape_html_covers_markup() {
        assert_eq!(escape_html("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape_html("plain-id_1"), "plain-id_1");
    }
}
