/// Web front end served on every non-API request; it calls `POST /api` from the browser.
pub const INDEX_HTML: &str = include_str!("../../static/index.html");
