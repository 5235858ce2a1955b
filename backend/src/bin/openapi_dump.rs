//! Print the OpenAPI document as YAML for external tooling.

use std::io::Write;

use guardpost_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> std::io::Result<()> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(std::io::Error::other)?;
    std::io::stdout().write_all(yaml.as_bytes())
}
