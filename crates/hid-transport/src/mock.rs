//! In-memory writer for tests.
//!
//! Clones share their write history and connection state, so a test can keep
//! one handle for assertions while the code under test owns another.

use std::sync::{Arc, Mutex};

use busylight_hid_protocol::BUFFER_LEN;

use crate::writer::SpecWriter;
use crate::{TransportError, TransportResult};

#[derive(Clone)]
pub struct MockSpecWriter {
    write_history: Arc<Mutex<Vec<[u8; BUFFER_LEN]>>>,
    connected: Arc<Mutex<bool>>,
    accept_limit: Arc<Mutex<Option<usize>>>,
}

impl MockSpecWriter {
    pub fn new() -> Self {
        Self {
            write_history: Arc::new(Mutex::new(Vec::new())),
            connected: Arc::new(Mutex::new(true)),
            accept_limit: Arc::new(Mutex::new(None)),
        }
    }

    pub fn get_write_history(&self) -> Vec<[u8; BUFFER_LEN]> {
        let history = self.write_history.lock().unwrap_or_else(|e| e.into_inner());
        history.clone()
    }

    pub fn disconnect(&self) {
        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
        *connected = false;
    }

    pub fn reconnect(&self) {
        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
        *connected = true;
    }

    /// Report at most `limit` accepted bytes per write.
    pub fn truncate_writes(&self, limit: usize) {
        let mut accept = self.accept_limit.lock().unwrap_or_else(|e| e.into_inner());
        *accept = Some(limit);
    }

    pub fn is_connected(&self) -> bool {
        *self.connected.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockSpecWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecWriter for MockSpecWriter {
    fn write_buffer(&mut self, buffer: &[u8; BUFFER_LEN]) -> TransportResult<usize> {
        if !self.is_connected() {
            return Err(TransportError::Disconnected);
        }

        let mut history = self.write_history.lock().unwrap_or_else(|e| e.into_inner());
        history.push(*buffer);

        let limit = *self.accept_limit.lock().unwrap_or_else(|e| e.into_inner());
        Ok(limit.map_or(BUFFER_LEN, |l| l.min(BUFFER_LEN)))
    }
}
