//! Shared Client
//!
//! Lets several threads use one connection by serializing whole exchanges.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::Client;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::protocol::{Command, Response};

/// Cloneable handle to a single connection
///
/// The lock is held from the first byte written until the reply is fully
/// read, so replies can never interleave on the wire.
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

    pub fn connect(config: ClientConfig) -> Result<Self> {
        Client::connect(config).map(Self::new)
    }

    pub fn execute(&self, command: &Command) -> Result<Response> {
        self.inner.lock().execute(command)
    }

    pub fn execute_with_timeout(
        &self,
        command: &Command,
        timeout: Option<Duration>,
    ) -> Result<Response> {
        self.inner.lock().execute_with_timeout(command, timeout)
    }

    /// Run several exchanges without another caller getting in between
    pub fn with_client<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Client) -> T,
    {
        let mut client = self.inner.lock();
        f(&mut client)
    }

    pub fn is_broken(&self) -> bool {
        self.inner.lock().is_broken()
    }
}
