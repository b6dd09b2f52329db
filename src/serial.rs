//! # Serial Telegram Sources
//!
//! This module provides the byte-stream side of the pipeline: a serial
//! port source that drains whatever the UART has buffered, for feeding a
//! telegram receiver one chunk at a time. The [`ByteSource`] trait keeps
//! the receivers testable with canned byte streams.

use crate::error::ObisError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio_serial::SerialPortBuilderExt;

/// Configuration for serial connection.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baudrate: u32,
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            baudrate: 9600,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Anything that can be drained for telegram bytes.
#[async_trait]
pub trait ByteSource {
    /// Reads available bytes into `buf`; 0 means no data arrived within
    /// the source's timeout, not end of stream (serial lines idle).
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, ObisError>;
}

/// A serial port delivering meter telegrams.
pub struct TelegramPort {
    port: tokio_serial::SerialStream,
    config: SerialConfig,
}

impl TelegramPort {
    /// Opens the port with default settings (9600 8N1, 5s read timeout).
    pub async fn connect(port_name: &str) -> Result<TelegramPort, ObisError> {
        Self::connect_with_config(port_name, SerialConfig::default()).await
    }

    /// Opens the port with custom config.
    pub async fn connect_with_config(
        port_name: &str,
        config: SerialConfig,
    ) -> Result<TelegramPort, ObisError> {
        let port = tokio_serial::new(port_name, config.baudrate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .timeout(config.timeout)
            .open_native_async()
            .map_err(|e| ObisError::SerialPortError(e.to_string()))?;

        Ok(TelegramPort { port, config })
    }
}

#[async_trait]
impl ByteSource for TelegramPort {
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, ObisError> {
        match tokio::time::timeout(self.config.timeout, self.port.read(buf)).await {
            Ok(result) => result.map_err(|e| ObisError::SerialPortError(e.to_string())),
            // Idle line, nothing buffered
            Err(_) => Ok(0),
        }
    }
}

/// In-memory byte source for exercising the receive path without
/// hardware.
pub struct MemorySource {
    data: Vec<u8>,
    pos: usize,
}

impl MemorySource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, ObisError> {
        let remaining = self.data.len() - self.pos;
        let n = remaining.min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
