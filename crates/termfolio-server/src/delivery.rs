//! HTTP delivery listener.
//!
//! Serves `GET /messages/latest?secret=<secret>` on a dedicated thread with
//! `tiny_http`. Routing is a pure function of method, URL and gateway state;
//! everything around it exists to keep the listener alive:
//!
//! - a panic while handling one request becomes a `500` for that request,
//! - a listener that stops unexpectedly is rebound by a supervisor loop with
//!   exponential backoff.

use std::{
    net::SocketAddr,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use termfolio_core::{Delivery, DeliveryGateway};
use tiny_http::{Header, Method, Request, Response, Server};

use crate::ServerError;

/// Path of the delivery endpoint.
pub const LATEST_PATH: &str = "/messages/latest";

/// Query parameter carrying the secret.
pub const SECRET_PARAM: &str = "secret";

const INITIAL_BACKOFF: Duration = Duration::from_millis(250);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Response chosen for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Plain-text body. Empty for `204` and `401`.
    pub body: String,
}

impl Reply {
    fn empty(status: u16) -> Self {
        Self { status, body: String::new() }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// Generic failure, without details.
    pub fn internal_error() -> Self {
        Self::text(500, "internal server error")
    }
}

/// Decide the response for `method` on `url`.
///
/// Only an authorized `GET` on [`LATEST_PATH`] touches the mailbox.
pub fn route(gateway: &DeliveryGateway, method: &Method, url: &str) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    if path != LATEST_PATH {
        return Reply::text(404, "not found");
    }
    if *method != Method::Get {
        return Reply::text(405, "method not allowed");
    }

    let provided = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SECRET_PARAM)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    match gateway.take_next(&provided) {
        Ok(Delivery::Message(message)) => {
            tracing::info!(sender = %message.sender, "message delivered");
            Reply::text(200, message.to_wire())
        },
        Ok(Delivery::Empty) => {
            tracing::debug!("delivery poll found no messages");
            Reply::empty(204)
        },
        Err(e) => {
            tracing::warn!("delivery poll rejected: {e}");
            Reply::empty(401)
        },
    }
}

/// Run `route`, converting a panic into a `500`.
fn guarded(route: impl FnOnce() -> Reply) -> Reply {
    panic::catch_unwind(AssertUnwindSafe(route)).unwrap_or_else(|_| {
        tracing::error!("delivery handler panicked");
        Reply::internal_error()
    })
}

fn handle(gateway: &DeliveryGateway, request: Request) {
    let reply = guarded(|| route(gateway, request.method(), request.url()));

    let status = reply.status;
    let mut response = Response::from_data(reply.body.into_bytes()).with_status_code(status);
    if status == 200
        && let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"text/plain"[..])
    {
        response = response.with_header(header);
    }

    if let Err(e) = request.respond(response) {
        tracing::debug!("failed to send delivery response: {e}");
    }
}

/// Shared between the supervisor thread and [`DeliveryListener::shutdown`].
struct Control {
    stopping: AtomicBool,
    server: Mutex<Option<Arc<Server>>>,
}

impl Control {
    fn set_server(&self, server: Option<Arc<Server>>) {
        *self.server.lock().unwrap_or_else(PoisonError::into_inner) = server;
    }

    fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }
}

/// Supervised HTTP listener for the delivery endpoint.
pub struct DeliveryListener {
    local_addr: SocketAddr,
    control: Arc<Control>,
    stop_tx: mpsc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl DeliveryListener {
    /// Bind `addr` and start serving on a dedicated thread.
    ///
    /// Restarts rebind the address bound here, so a `:0` port stays stable
    /// across restarts.
    ///
    /// # Errors
    ///
    /// - `ServerError::Transport` if the initial bind fails.
    pub fn spawn(addr: &str, gateway: DeliveryGateway) -> Result<Self, ServerError> {
        let server = Server::http(addr).map_err(|e| {
            ServerError::Transport(format!("cannot bind delivery listener on {addr}: {e}"))
        })?;
        let local_addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| ServerError::Internal("delivery listener has no IP address".into()))?;

        let control =
            Arc::new(Control { stopping: AtomicBool::new(false), server: Mutex::new(None) });
        let (stop_tx, stop_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("delivery".into())
            .spawn({
                let control = Arc::clone(&control);
                move || supervise(Arc::new(server), local_addr, &gateway, &control, &stop_rx)
            })
            .map_err(|e| ServerError::Internal(format!("cannot start delivery thread: {e}")))?;

        tracing::info!(%local_addr, "delivery listener started");
        Ok(Self { local_addr, control, stop_tx, thread: Some(thread) })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop serving and wait for the listener thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::error!("delivery thread panicked");
        }
        tracing::info!("delivery listener stopped");
    }

    fn stop(&self) {
        self.control.stopping.store(true, Ordering::SeqCst);
        let _ = self.stop_tx.send(());
        let server = self.control.server.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(server) = server.as_ref() {
            server.unblock();
        }
    }
}

impl Drop for DeliveryListener {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
        }
    }
}

/// Serve until shutdown, rebinding whenever the listener stops on its own.
fn supervise(
    first: Arc<Server>,
    addr: SocketAddr,
    gateway: &DeliveryGateway,
    control: &Control,
    stop_rx: &mpsc::Receiver<()>,
) {
    let mut next = Some(first);
    let mut attempt: u32 = 0;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        let server = match next.take() {
            Some(server) => Some(server),
            None => match Server::http(addr) {
                Ok(server) => {
                    tracing::info!(%addr, attempt, "delivery listener rebound");
                    Some(Arc::new(server))
                },
                Err(e) => {
                    tracing::error!(%addr, attempt, "delivery listener bind failed: {e}");
                    None
                },
            },
        };

        if let Some(server) = server {
            control.set_server(Some(Arc::clone(&server)));
            if !control.is_stopping() {
                serve(&server, gateway, control);
            }
            control.set_server(None);

            if control.is_stopping() {
                return;
            }
            tracing::warn!(%addr, "delivery listener stopped unexpectedly");
            attempt = 0;
            backoff = INITIAL_BACKOFF;
        }

        attempt += 1;
        tracing::info!(attempt, backoff_ms = backoff.as_millis(), "restarting delivery listener");
        match stop_rx.recv_timeout(backoff) {
            Err(RecvTimeoutError::Timeout) => {},
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

/// Handle requests until the server is unblocked or fails.
fn serve(server: &Server, gateway: &DeliveryGateway, control: &Control) {
    loop {
        match server.recv() {
            Ok(request) => handle(gateway, request),
            Err(e) => {
                if !control.is_stopping() {
                    tracing::error!("delivery listener failed: {e}");
                }
                return;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpStream,
        sync::Arc,
        time::Instant,
    };

    use termfolio_core::{Mailbox, Secret};

    use super::*;

    fn poll_status(addr: SocketAddr) -> std::io::Result<u16> {
        let mut stream = TcpStream::connect_timeout(&addr, Duration::from_secs(1))?;
        stream.set_read_timeout(Some(Duration::from_secs(1)))?;
        stream.write_all(
            b"GET /messages/latest?secret=s3cret HTTP/1.1\r\nHost: x\r\nConnection: close\r\n\r\n",
        )?;
        let mut raw = String::new();
        stream.read_to_string(&mut raw)?;
        raw.split_whitespace()
            .nth(1)
            .and_then(|status| status.parse().ok())
            .ok_or_else(|| std::io::Error::other("malformed response"))
    }

    fn current_server(control: &Control) -> Option<Arc<Server>> {
        control.server.lock().unwrap().clone()
    }

    fn gateway() -> DeliveryGateway {
        DeliveryGateway::new(Arc::new(Mailbox::new()), Secret::new("s3cret").unwrap())
    }

    #[test]
    fn wrong_or_missing_secret_is_unauthorized() {
        let gateway = gateway();
        gateway.mailbox().submit("alice", "hello").unwrap();

        let urls = ["/messages/latest", "/messages/latest?secret=nope", "/messages/latest?secret="];
        for url in urls {
            assert_eq!(route(&gateway, &Method::Get, url), Reply::empty(401));
        }
        assert_eq!(gateway.mailbox().len(), 1);
    }

    #[test]
    fn empty_mailbox_is_no_content() {
        let reply = route(&gateway(), &Method::Get, "/messages/latest?secret=s3cret");
        assert_eq!(reply, Reply::empty(204));
    }

    #[test]
    fn authorized_poll_delivers_oldest() {
        let gateway = gateway();
        gateway.mailbox().submit("alice", "hello").unwrap();
        gateway.mailbox().submit("bob", "world").unwrap();

        let reply = route(&gateway, &Method::Get, "/messages/latest?secret=s3cret");

        assert_eq!(reply.status, 200);
        assert!(reply.body.starts_with("alice---hello---"));
        assert_eq!(gateway.mailbox().len(), 1);
    }

    #[test]
    fn secret_is_percent_decoded() {
        let gateway =
            DeliveryGateway::new(Arc::new(Mailbox::new()), Secret::new("a b&c").unwrap());

        let reply = route(&gateway, &Method::Get, "/messages/latest?secret=a%20b%26c");
        assert_eq!(reply.status, 204);
    }

    #[test]
    fn panicking_route_becomes_internal_error() {
        let reply = guarded(|| panic::resume_unwind(Box::new("route failed")));

        assert_eq!(reply.status, 500);
        assert_eq!(reply.body, "internal server error");
    }

    #[test]
    fn guarded_passes_replies_through() {
        let gateway = gateway();
        let reply = guarded(|| route(&gateway, &Method::Get, "/messages/latest?secret=s3cret"));

        assert_eq!(reply, Reply::empty(204));
    }

    #[test]
    fn listener_is_rebound_after_unexpected_stop() {
        let listener = DeliveryListener::spawn("127.0.0.1:0", gateway()).unwrap();
        let addr = listener.local_addr();
        assert_eq!(poll_status(addr).unwrap(), 204);

        // Stop the running server without requesting shutdown
        let first = loop {
            if let Some(server) = current_server(&listener.control) {
                break server;
            }
            thread::sleep(Duration::from_millis(10));
        };
        first.unblock();
        drop(first);

        // Requests queued behind the unblock are never served by the old
        // server, so a successful poll comes from the rebound one.
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if poll_status(addr).is_ok_and(|status| status == 204) {
                break;
            }
            assert!(Instant::now() < deadline, "listener was not rebound");
            thread::sleep(Duration::from_millis(50));
        }

        listener.shutdown();
    }

    #[test]
    fn unknown_paths_and_methods() {
        let gateway = gateway();
        gateway.mailbox().submit("alice", "hello").unwrap();

        assert_eq!(route(&gateway, &Method::Get, "/messages").status, 404);
        assert_eq!(route(&gateway, &Method::Get, "/").status, 404);
        assert_eq!(route(&gateway, &Method::Post, "/messages/latest?secret=s3cret").status, 405);
        assert_eq!(route(&gateway, &Method::Delete, "/messages/latest?secret=s3cret").status, 405);
        assert_eq!(gateway.mailbox().len(), 1);
    }
}
