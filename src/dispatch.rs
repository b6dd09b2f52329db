//! # Listener Dispatch
//!
//! Matches decoded OBIS records against registered listeners and fans
//! them out. A listener filters on the server id (lowercase hex, empty
//! matches any meter) and the OBIS code string; matching listeners are
//! invoked in registration order with no further ordering contract, and
//! one record may reach any number of them.
//!
//! Listeners hold plain closures. The numeric and text registration
//! helpers mirror the two outbound shapes a host wires up: sensors get a
//! raw (unscaled) float, text sensors get a string rendered per the
//! listener's format override.

use crate::record::{ObisRecord, PublishFormat};

type PublishCallback = Box<dyn FnMut(&ObisRecord)>;

/// One registration: filters plus a publish callback.
pub struct ObisListener {
    server_id: String,
    code: String,
    callback: PublishCallback,
}

impl ObisListener {
    fn matches(&self, record: &ObisRecord) -> bool {
        (self.server_id.is_empty() || self.server_id == record.server_repr())
            && self.code == record.code_repr()
    }
}

/// Holds all registered listeners and fans records out to them.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<ObisListener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw record listener.
    ///
    /// `server_id` is the lowercase hex form of the meter id; an empty
    /// filter matches every meter. `code` is the `"A-B:C.D.E"` identity.
    pub fn register(
        &mut self,
        server_id: &str,
        code: &str,
        callback: impl FnMut(&ObisRecord) + 'static,
    ) {
        self.listeners.push(ObisListener {
            server_id: server_id.to_ascii_lowercase(),
            code: code.to_string(),
            callback: Box::new(callback),
        });
    }

    /// Registers a numeric listener: receives the record's value as a
    /// float, unscaled. Records without a numeric form are not delivered.
    pub fn register_numeric(
        &mut self,
        server_id: &str,
        code: &str,
        mut callback: impl FnMut(f64) + 'static,
    ) {
        self.register(server_id, code, move |record| {
            if let Some(value) = record.as_float() {
                callback(value);
            }
        });
    }

    /// Registers a text listener: receives the value rendered per
    /// `format`, falling back to the record's own value type.
    pub fn register_text(
        &mut self,
        server_id: &str,
        code: &str,
        format: Option<PublishFormat>,
        mut callback: impl FnMut(String) + 'static,
    ) {
        self.register(server_id, code, move |record| {
            callback(record.format_value(format));
        });
    }

    /// Delivers one record to every matching listener; returns the
    /// number of listeners reached.
    pub fn publish(&mut self, record: &ObisRecord) -> usize {
        let mut matched = 0;
        for listener in &mut self.listeners {
            if listener.matches(record) {
                (listener.callback)(record);
                matched += 1;
            }
        }
        matched
    }

    /// Delivers a batch of records in order; returns the total number of
    /// listener invocations.
    pub fn publish_all(&mut self, records: &[ObisRecord]) -> usize {
        records.iter().map(|record| self.publish(record)).sum()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
