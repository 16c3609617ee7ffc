use super::types::FetcherConfig;

/// Where a request's connection goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Plain outbound connection.
    Direct,
    /// SOCKS5 relay at this address, hostnames resolved proxy-side.
    Socks5(String),
}

/// Decide the route for `url` under `config`.
pub(crate) fn route_for(url: &str, config: &FetcherConfig) -> Route {
    if is_hidden_service_url(url, &config.proxy_suffix) {
        Route::Socks5(config.proxy_addr.clone())
    } else {
        Route::Direct
    }
}

/// Textual hidden-service check: the first occurrence of `suffix` in the raw
/// URL must be followed by end-of-string or `/`, i.e. the suffix is the final
/// label of the host rather than a prefix of a longer one.
///
/// The URL is never parsed. A suffix appearing in a query string followed by
/// `/` engages the proxy too.
pub(crate) fn is_hidden_service_url(url: &str, suffix: &str) -> bool {
    match url.find(suffix) {
        Some(pos) => {
            let rest = &url[pos + suffix.len()..];
            rest.is_empty() || rest.starts_with('/')
        }
        None => false,
    }
}
