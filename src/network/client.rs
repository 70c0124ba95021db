//! AMCP Client
//!
//! Blocking TCP client that runs one request/response cycle at a time.

use std::io::{BufReader, BufWriter, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{AmcpError, Result};
use crate::protocol::{encode_command, read_response, Argument, Command, Response};

/// A client connection to an AMCP server
///
/// ## Exchange Model
///
/// - A command is fully written, then its reply is fully read, before the
///   next command can start (`&mut self` enforces this).
/// - Deadlines are applied to the socket right before each blocking write
///   and read of an exchange.
/// - After a transport failure or a malformed reply the stream position is
///   unknown. The client is then marked broken and every later call fails
///   with `AmcpError::ConnectionBroken`; open a new client instead.
pub struct Client {
    /// TCP stream reader (buffered, kept across exchanges)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered, flushed once per command)
    writer: BufWriter<TcpStream>,

    config: ClientConfig,

    /// Peer address for logging
    peer_addr: String,

    broken: bool,
}

impl Client {
    /// Resolve `config.addr` and connect to the first address that accepts
    pub fn connect(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let addrs: Vec<SocketAddr> = config
            .addr
            .to_socket_addrs()
            .map_err(|e| AmcpError::Config(format!("cannot resolve {}: {}", config.addr, e)))?
            .collect();

        let mut last_err = None;
        for addr in addrs {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => return Self::from_stream(stream, config),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) => Err(AmcpError::Transport(e)),
            None => Err(AmcpError::Config(format!(
                "{} resolved to no addresses",
                config.addr
            ))),
        }
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, config: ClientConfig) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.nodelay)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to AMCP server {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            config,
            peer_addr,
            broken: false,
        })
    }

    /// Send a command and read its reply using the configured deadlines
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        let write_timeout = self.config.write_timeout();
        let read_timeout = self.config.read_timeout();
        self.exchange(command, write_timeout, read_timeout)
    }

    /// Send a command and read its reply, bounding the write and the read
    /// each by `timeout` (`None` blocks indefinitely)
    pub fn execute_with_timeout(
        &mut self,
        command: &Command,
        timeout: Option<Duration>,
    ) -> Result<Response> {
        let timeout = timeout.filter(|t| !t.is_zero());
        self.exchange(command, timeout, timeout)
    }

    /// Shorthand for building a command and executing it
    pub fn call<I, A>(&mut self, name: &str, args: I) -> Result<Response>
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        self.execute(&Command::with_args(name, args))
    }

    fn exchange(
        &mut self,
        command: &Command,
        write_timeout: Option<Duration>,
        read_timeout: Option<Duration>,
    ) -> Result<Response> {
        if self.broken {
            return Err(AmcpError::ConnectionBroken);
        }

        // Encoding failures leave the stream untouched
        let line = encode_command(command)?;

        let result = self.round_trip(&line, write_timeout, read_timeout);
        if let Err(ref e) = result {
            if e.is_fatal() {
                tracing::warn!(
                    "Exchange with {} failed, connection is no longer usable: {}",
                    self.peer_addr,
                    e
                );
                self.broken = true;
            }
        }
        result
    }

    fn round_trip(
        &mut self,
        line: &[u8],
        write_timeout: Option<Duration>,
        read_timeout: Option<Duration>,
    ) -> Result<Response> {
        self.writer.get_ref().set_write_timeout(write_timeout)?;
        self.writer.write_all(line)?;
        self.writer.flush()?;

        tracing::trace!(
            "Sent to {}: {:?}",
            self.peer_addr,
            String::from_utf8_lossy(line).trim_end()
        );

        self.reader.get_ref().set_read_timeout(read_timeout)?;
        let response = read_response(&mut self.reader)?;

        tracing::trace!(
            "Reply from {}: {} {}",
            self.peer_addr,
            response.code(),
            response.message()
        );
        Ok(response)
    }

    /// Flush and shut down both directions of the connection
    pub fn close(mut self) -> Result<()> {
        tracing::debug!("Closing connection to {}", self.peer_addr);
        if !self.broken {
            self.writer.flush()?;
        }
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Peer already gone
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// True once an exchange has failed in a way that desynchronizes the stream
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
