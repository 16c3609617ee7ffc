use super::routing::Route;
use super::types::{Method, Request};
use crate::error::Result;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Proxy};
use std::io::Write;
use std::time::Duration;

const REDIRECT_LIMIT: usize = 10;

/// Everything the transport needs for one exchange: the request itself plus
/// the per-request policy the fetcher derived from its configuration.
pub struct Dispatch<'a> {
    pub request: &'a Request,
    pub route: &'a Route,
    pub user_agent: &'a str,
    pub follow_redirects: bool,
    pub timeout: Option<Duration>,
}

/// One-shot request/response exchange.
///
/// `Ok(Some(code))` is a completed transfer with a readable status,
/// `Ok(None)` a completed transfer whose status could not be determined, and
/// `Err` any setup or transport failure — including a sink that refused a
/// chunk mid-body.
pub trait Transport: Send + Sync {
    fn execute(&self, dispatch: &Dispatch<'_>, sink: &mut dyn Write) -> Result<Option<u16>>;
}

/// Production transport backed by a blocking reqwest client.
///
/// A fresh client is built per dispatch; each exchange is its own session,
/// torn down when the call returns.
pub struct ReqwestTransport;

impl Transport for ReqwestTransport {
    fn execute(&self, dispatch: &Dispatch<'_>, sink: &mut dyn Write) -> Result<Option<u16>> {
        let policy = if dispatch.follow_redirects {
            redirect::Policy::limited(REDIRECT_LIMIT)
        } else {
            redirect::Policy::none()
        };

        let mut builder = Client::builder()
            .user_agent(dispatch.user_agent)
            .redirect(policy)
            .timeout(dispatch.timeout);

        if let Route::Socks5(addr) = dispatch.route {
            builder = builder.proxy(Proxy::all(addr.as_str())?);
        }

        let client = builder.build()?;

        let request = match dispatch.request.method() {
            Method::Get => client.get(dispatch.request.url()),
            Method::Post => client
                .post(dispatch.request.url())
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(dispatch.request.body().unwrap_or_default().to_owned()),
        };

        let mut response = request.send()?;
        let status = response.status().as_u16();
        response.copy_to(sink)?;

        Ok(Some(status))
    }
}
