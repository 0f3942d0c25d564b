//! Mock implementations for testing
//!
//! [`RecordingTransport`] captures every call made through the
//! [`Transport`] trait so tests can assert the exact command stream and
//! the position of every transaction boundary.

#![cfg(any(test, feature = "std"))]

use crate::transport::{Boundary, Transport};

/// Largest single `send_data` payload the recorder keeps verbatim.
pub const MAX_RECORDED_PAYLOAD: usize = 8;

/// One call observed on the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// `begin_transaction`
    Begin,
    /// `send_command`
    Command(u8, Boundary),
    /// `send_data`
    Data(heapless::Vec<u8, MAX_RECORDED_PAYLOAD>, Boundary),
    /// `end_transaction`
    End,
}

/// Mock transport that records calls instead of driving a bus
pub struct RecordingTransport<const N: usize = 4096> {
    events: heapless::Vec<BusEvent, N>,
    overflowed: bool,
}

impl<const N: usize> RecordingTransport<N> {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    /// True if any event or payload did not fit and was dropped
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.events.clear();
        self.overflowed = false;
    }

    /// Number of `begin_transaction` calls
    pub fn transaction_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BusEvent::Begin))
            .count()
    }

    /// Command bytes in the order they were sent
    pub fn commands(&self) -> impl Iterator<Item = u8> + '_ {
        self.events.iter().filter_map(|e| match e {
            BusEvent::Command(c, _) => Some(*c),
            _ => None,
        })
    }

    /// Every data byte in the order it was sent
    pub fn data_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.events
            .iter()
            .flat_map(|e| match e {
                BusEvent::Data(bytes, _) => bytes.as_slice(),
                _ => &[][..],
            })
            .copied()
    }

    /// True when every `Begin` is closed by an `End` before the next `Begin`
    pub fn is_balanced(&self) -> bool {
        let mut open = false;
        for event in &self.events {
            match event {
                BusEvent::Begin if open => return false,
                BusEvent::Begin => open = true,
                BusEvent::End if !open => return false,
                BusEvent::End => open = false,
                BusEvent::Command(..) | BusEvent::Data(..) if !open => return false,
                _ => {}
            }
        }
        !open
    }

    fn record(&mut self, event: BusEvent) {
        if self.events.push(event).is_err() {
            self.overflowed = true;
        }
    }
}

impl<const N: usize> Default for RecordingTransport<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Transport for RecordingTransport<N> {
    type Error = core::convert::Infallible;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        self.record(BusEvent::Begin);
        Ok(())
    }

    fn send_command(&mut self, command: u8, boundary: Boundary) -> Result<(), Self::Error> {
        self.record(BusEvent::Command(command, boundary));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8], boundary: Boundary) -> Result<(), Self::Error> {
        let payload = match heapless::Vec::from_slice(data) {
            Ok(payload) => payload,
            Err(_) => {
                self.overflowed = true;
                heapless::Vec::new()
            }
        };
        self.record(BusEvent::Data(payload, boundary));
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        self.record(BusEvent::End);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut t: RecordingTransport<16> = RecordingTransport::new();
        t.begin_transaction().unwrap();
        t.send_command(0x5C, Boundary::Continue).unwrap();
        t.send_data(&[1, 2], Boundary::End).unwrap();
        t.end_transaction().unwrap();

        assert_eq!(t.transaction_count(), 1);
        assert!(t.is_balanced());
        assert_eq!(t.commands().collect::<Vec<_>>(), vec![0x5C]);
        assert_eq!(t.data_bytes().collect::<Vec<_>>(), vec![1, 2]);
        assert!(!t.overflowed());
    }

    #[test]
    fn detects_nested_begin() {
        let mut t: RecordingTransport<16> = RecordingTransport::new();
        t.begin_transaction().unwrap();
        t.begin_transaction().unwrap();
        t.end_transaction().unwrap();
        t.end_transaction().unwrap();
        assert!(!t.is_balanced());
    }

    #[test]
    fn detects_traffic_outside_transaction() {
        let mut t: RecordingTransport<16> = RecordingTransport::new();
        t.send_command(0xAF, Boundary::End).unwrap();
        assert!(!t.is_balanced());
    }

    #[test]
    fn flags_overflow_instead_of_panicking() {
        let mut t: RecordingTransport<1> = RecordingTransport::new();
        t.begin_transaction().unwrap();
        t.end_transaction().unwrap();
        assert!(t.overflowed());
        assert_eq!(t.events().len(), 1);
    }
}
