use std::path::Path;

use crate::api::client::TelldusApi;
use crate::auth::credentials::{resolve_auth_path, Credentials};
use crate::config::ServiceOptions;
use crate::error::AppError;

/// Load credentials and build an API client for one command.
pub fn connect(auth_file: Option<&Path>, site: Option<String>) -> Result<TelldusApi, AppError> {
    let path = resolve_auth_path(auth_file)?;
    let credentials = Credentials::load(&path)?;
    TelldusApi::new(&credentials, ServiceOptions::with_site(site))
}
