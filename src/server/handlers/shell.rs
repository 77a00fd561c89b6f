use askama::Template;
use axum::response::{Html, IntoResponse, Response};

/// The document every visit to the root path embeds.
pub const MAIN_DOCUMENT: &str = "/main.html";

#[derive(Template)]
#[template(path = "shell.html")]
struct ShellTemplate<'a> {
    title: &'a str,
    frame_src: &'a str,
}

/// The shell: a full-viewport, zero-margin container holding a single inline
/// frame pointed at the main document. It takes no input and owns no state;
/// everything interesting happens inside the embedded document.
pub async fn shell() -> Response {
    let template = ShellTemplate {
        title: "Cookbook",
        frame_src: MAIN_DOCUMENT,
    };
    Html(template.render().unwrap()).into_response()
}
