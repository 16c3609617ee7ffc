mod routing;
mod sink;
mod transport;

pub mod types;

pub use routing::Route;
pub use sink::{BufferSink, FileSink};
pub use transport::{Dispatch, ReqwestTransport, Transport};
pub use types::*;

use crate::error::{FetchError, Result};
use crate::runtime;
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The one component of this crate: fetches URLs into buffers or files,
/// deciding per request whether to go out directly or through the local
/// SOCKS5 relay.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Fetcher {
    config: FetcherConfig,
    transport: Arc<dyn Transport>,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    /// Fetcher with default policy and the reqwest transport.
    pub fn new() -> Self {
        Self::with_config(FetcherConfig::default())
    }

    /// Fetcher with custom policy and the reqwest transport.
    pub fn with_config(config: FetcherConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport))
    }

    /// Fetcher with a caller-supplied transport. This is the seam tests use
    /// to observe dispatches without touching the network.
    pub fn with_transport(config: FetcherConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch `url` into `buf`, appending to whatever it already holds.
    /// Follows redirects. Blocks until the transfer completes or fails.
    ///
    /// The routing check is textual: a URL that merely *contains* the proxy
    /// suffix followed by `/` (even in a query string) is routed through the
    /// relay. Clear `buf` between calls if you want a single response in it.
    pub fn get(&self, buf: &mut Vec<u8>, url: &str) -> FetchStatus {
        let request = Request::get(url);
        let mut sink = BufferSink::new(buf);
        let outcome = self.dispatch(&request, true, &mut sink);
        self.resolve(url, outcome)
    }

    /// POST `body` to `url`, collecting the response into `buf` like
    /// [`get`](Self::get). Does not follow redirects; a redirect response is
    /// reported as its own status.
    pub fn post(&self, buf: &mut Vec<u8>, url: &str, body: &str) -> FetchStatus {
        let request = Request::post(url, body);
        let mut sink = BufferSink::new(buf);
        let outcome = self.dispatch(&request, false, &mut sink);
        self.resolve(url, outcome)
    }

    /// Fetch `url` straight into the file at `path` (created or truncated up
    /// front). If the file cannot be opened, returns [`FetchStatus::Failed`]
    /// without any network activity. On a failed transfer the file is left
    /// behind, possibly empty or partial.
    pub fn download(&self, path: impl AsRef<Path>, url: &str) -> FetchStatus {
        let path = path.as_ref();
        let mut sink = match FileSink::create(path) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("cannot open {} for writing: {}", path.display(), err);
                return FetchStatus::Failed;
            }
        };

        let request = Request::get(url);
        let outcome = self.dispatch(&request, true, &mut sink);

        // Close the file before looking at the outcome, success or not.
        drop(sink);

        self.resolve(url, outcome)
    }

    /// Run [`get`](Self::get) on a background worker. Takes the buffer by
    /// value and hands it back through the returned [`FetchJob`], so it can
    /// only be read once the transfer is done. Dropping the handle detaches
    /// the worker (fire-and-forget).
    pub fn get_async(&self, buf: Vec<u8>, url: &str) -> FetchJob<(FetchStatus, Vec<u8>)> {
        let fetcher = self.clone();
        let url = url.to_owned();
        FetchJob::spawn(move || {
            let mut buf = buf;
            let status = fetcher.get(&mut buf, &url);
            (status, buf)
        })
    }

    /// Run [`post`](Self::post) on a background worker; see
    /// [`get_async`](Self::get_async) for the buffer handover.
    pub fn post_async(&self, buf: Vec<u8>, url: &str, body: &str) -> FetchJob<(FetchStatus, Vec<u8>)> {
        let fetcher = self.clone();
        let url = url.to_owned();
        let body = body.to_owned();
        FetchJob::spawn(move || {
            let mut buf = buf;
            let status = fetcher.post(&mut buf, &url, &body);
            (status, buf)
        })
    }

    /// Run [`download`](Self::download) on a background worker.
    pub fn download_async(&self, path: PathBuf, url: &str) -> FetchJob<FetchStatus> {
        let fetcher = self.clone();
        let url = url.to_owned();
        FetchJob::spawn(move || fetcher.download(&path, &url))
    }

    fn dispatch(
        &self,
        request: &Request,
        follow_redirects: bool,
        sink: &mut dyn Write,
    ) -> Result<Option<u16>> {
        let route = routing::route_for(request.url(), &self.config);
        if let Route::Socks5(addr) = &route {
            debug!("routing {} through {}", request.url(), addr);
        }

        let dispatch = Dispatch {
            request,
            route: &route,
            user_agent: &self.config.user_agent,
            follow_redirects,
            timeout: self.config.timeout,
        };
        self.transport.execute(&dispatch, sink)
    }

    fn resolve(&self, url: &str, outcome: Result<Option<u16>>) -> FetchStatus {
        match outcome {
            Ok(Some(code)) => FetchStatus::Http(code),
            Ok(None) => FetchStatus::Unknown,
            Err(err) => {
                warn!("fetch {} failed: {}", url, err);
                FetchStatus::Failed
            }
        }
    }
}

/// Handle to a background fetch. The caller decides whether to
/// [`wait`](Self::wait) for the result or drop the handle and let the worker
/// run to completion unobserved.
pub struct FetchJob<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> FetchJob<T> {
    fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self {
            handle: runtime::spawn_blocking(work),
        }
    }

    /// True once the worker has finished; never blocks.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker finishes and return its result.
    pub fn wait(self) -> Result<T> {
        runtime::block_on(self.handle).map_err(|err| FetchError::Background(err.to_string()))
    }
}
