//! Single blocking GET over libcurl.
//!
//! The whole body is buffered before returning; the HTTP status is reported
//! but never turned into an error, so error pages reach the parser like any
//! other body.

mod classify;

pub use classify::{classify_curl_error, FailureKind};

use rconf_sdk::ConfigError;

use crate::config::HttpSettings;
use crate::request::FetchRequest;

/// Raw outcome of a completed transfer.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Fixed agent string sent with every request.
pub fn user_agent() -> String {
    format!("rconf-http/{}", env!("CARGO_PKG_VERSION"))
}

/// Performs the GET described by `request` and returns the buffered body.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn get(request: &FetchRequest, settings: &HttpSettings) -> Result<Response, ConfigError> {
    let origin = request.origin();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, request, settings).map_err(|e| classify::remap(&origin, e))?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(|e| classify::remap(&origin, e))?;
        transfer.perform().map_err(|e| classify::remap(&origin, e))?;
    }

    let status = easy
        .response_code()
        .map_err(|e| classify::remap(&origin, e))?;

    Ok(Response { status, body })
}

fn configure(
    easy: &mut curl::easy::Easy,
    request: &FetchRequest,
    settings: &HttpSettings,
) -> Result<(), curl::Error> {
    easy.url(request.url().as_str())?;
    easy.get(true)?;
    easy.useragent(&user_agent())?;
    easy.follow_location(settings.follow_redirects)?;
    easy.max_redirections(settings.max_redirections)?;
    easy.connect_timeout(settings.connect_timeout())?;
    if let Some(timeout) = settings.timeout() {
        easy.timeout(timeout)?;
    }

    if let Some(auth) = request.basic_auth() {
        // Basic only, so the header goes out on the first request without
        // waiting for a challenge, for any realm and across redirects.
        let mut scheme = curl::easy::Auth::new();
        scheme.basic(true);
        easy.http_auth(&scheme)?;
        easy.username(&auth.username)?;
        easy.password(&auth.password)?;
        easy.unrestricted_auth(true)?;
    }
    Ok(())
}
