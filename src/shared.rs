//! Thread-shareable client
//!
//! Serializes connect, disconnect and run behind one lock so at most one
//! exchange is ever in flight on the socket.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::client::Client;
use crate::error::Result;
use crate::protocol::Response;

/// Cloneable handle to a [`Client`] guarded by a mutex
#[derive(Clone)]
pub struct SharedClient {
    inner: Arc<Mutex<Client>>,
}

impl SharedClient {
    pub fn new(client: Client) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub fn connect(&self, address: &str) -> Result<()> {
        self.inner.lock().connect(address)
    }

    pub fn disconnect(&self) {
        self.inner.lock().disconnect();
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().is_connected()
    }

    /// Blocks while another thread's exchange is in progress
    pub fn run(&self, command: &str) -> Response {
        self.inner.lock().run(command)
    }

    pub fn run_with_timeout(&self, command: &str, receive_timeout: Duration) -> Response {
        self.inner.lock().run_with_timeout(command, receive_timeout)
    }

    /// Run several commands with no other exchange in between
    pub fn with_client<R>(&self, f: impl FnOnce(&mut Client) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Client> for SharedClient {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}
