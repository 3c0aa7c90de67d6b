//! REST client for the controller.
//!
//! A [ClientContext](context/struct.ClientContext.html) is built once per
//! command with [build_client](context/fn.build_client.html), used for any
//! number of sequential GET requests through the
//! [ControllerRest](context/trait.ControllerRest.html) trait, and released
//! when the command finishes.

/// Client construction and request execution
pub mod context;
/// Line oriented output for status and diagnostic messages
pub mod output;
/// Trust store loading and TLS connector
pub mod tls;

pub use context::{
    build_client, BuildError, ClientContext, ControllerRest, RestError, RestResponse,
};
pub use output::{Lines, Output, Stdout};

/// Normalise a controller address into a URL with an explicit port.
///
/// Accepts `host`, `host:port`, `ip:port` or a full `http(s)://` URL. The
/// scheme has to agree with whether TLS is enabled.
pub fn parse_controller_url(s: &str, tls: bool, default_port: u16) -> Result<url::Url, String> {
    let scheme = if tls { "https" } else { "http" };
    let err = || format!("failed to parse controller URL: {}", s);
    let mut url = if s.contains("://") {
        s.parse::<url::Url>().map_err(|_| err())?
    } else {
        format!("{}://{}", scheme, s)
            .parse::<url::Url>()
            .map_err(|_| err())?
    };
    if url.host_str().is_none() {
        Err(err())
    } else if url.scheme() != scheme {
        Err(format!("expecting {} URL: {}", scheme, s))
    } else {
        if url.port().is_none() {
            url.set_port(Some(default_port)).map_err(|_| err())?
        }
        Ok(url)
    }
}

/// Base URI string that relative paths (starting with `/`) are appended to
pub fn base_uri(url: &url::Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}
