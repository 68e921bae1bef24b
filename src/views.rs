use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;

/// View
///
/// A handler's rendering result: a named template plus its JSON context.
/// Template rendering itself is an external collaborator; this type emits
/// the thinnest possible HTML shell that names the template
/// (`data-template`) and embeds the context as a JSON payload for it.
///
/// Tests assert against `template`, `status`, and `context` directly rather
/// than parsing HTML.
#[derive(Debug, Clone)]
pub struct View {
    pub template: &'static str,
    pub status: StatusCode,
    pub context: Value,
}

impl View {
    pub fn new(template: &'static str, context: Value) -> View {
        View {
            template,
            status: StatusCode::OK,
            context,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> View {
        self.status = status;
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let payload = serde_json::to_string(&self.context)
            .unwrap_or_else(|_| "{}".to_string())
            // Keep the embedded JSON inert inside the script element.
            .replace('<', "\\u003c");

        let html = format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head><meta charset=\"utf-8\"><title>{template}</title></head>\n\
             <body data-template=\"{template}\">\n\
             <script id=\"view-data\" type=\"application/json\">{payload}</script>\n\
             </body>\n\
             </html>\n",
            template = self.template,
        );

        (self.status, Html(html)).into_response()
    }
}

/// error_page
///
/// The generic error view used for access-denied responses, the unmatched-
/// route fallback, and internal failures that still deserve an HTML body.
pub fn error_page(status: StatusCode, message: &str) -> View {
    View::new("error", serde_json::json!({ "message": message })).with_status(status)
}
