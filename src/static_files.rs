//! Serves the front-end files.
//!
//! Only a fixed list of files is exposed, the rest of the static directory is not reachable.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

use crate::endpoints;

/// The front-end files and the routes they are served on.
const STATIC_FILES: [(&str, &str); 4] = [
    (endpoints::ROOT, "index.html"),
    (endpoints::INDEX, "index.html"),
    (endpoints::STYLES, "styles.css"),
    (endpoints::SCRIPT, "app.js"),
];

/// Routes serving the whitelisted front-end files from `static_dir`.
pub fn static_file_routes<S>(static_dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    STATIC_FILES
        .iter()
        .fold(Router::new(), |router, (route, file_name)| {
            router.route_service(route, ServeFile::new(static_dir.join(file_name)))
        })
}
