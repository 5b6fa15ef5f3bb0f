//! Slot for a peripheral that is installed once and then borrowed from any context.

use core::cell::RefCell;

use critical_section::Mutex;

/// Holds a peripheral such as a debug UART for code that has no owner to ask, a logger for instance.
///
/// The critical section only covers taking the value out and putting it back. Whatever is done with
/// it in between runs with interrupts enabled, so a slow blocking write never delays the encoder
/// interrupt.
pub struct PortCell<T> {
    slot: Mutex<RefCell<Option<T>>>,
}

impl<T> PortCell<T> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Installs `port`, handing back the previous one.
    pub fn put(&self, port: T) -> Option<T> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).replace(port))
    }

    /// Runs `f` on the port outside of any critical section.
    ///
    /// Returns `None` without calling `f` when nothing is installed or the port is already lent out,
    /// e.g. to a lower priority context this call interrupted.
    pub fn lend<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut port = critical_section::with(|cs| self.slot.borrow_ref_mut(cs).take())?;
        let result = f(&mut port);
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).replace(port));
        Some(result)
    }
}

impl<T> Default for PortCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{Direction, PulseCounter};

    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use std::vec::Vec;

    #[test]
    fn lend_without_port_does_nothing() {
        let cell: PortCell<Vec<u8>> = PortCell::new();
        assert_eq!(cell.lend(|_| 1), None);
    }

    #[test]
    fn lent_port_comes_back() {
        let cell = PortCell::new();
        assert!(cell.put(Vec::new()).is_none());

        cell.lend(|buf| buf.extend_from_slice(b"info: up\r\n"));
        cell.lend(|buf| buf.extend_from_slice(b"info: down\r\n"));

        assert_eq!(cell.lend(|buf| buf.len()), Some(22));
    }

    #[test]
    fn nested_lend_is_skipped() {
        let cell = PortCell::new();
        cell.put(0_u32);

        let inner = cell.lend(|outer| {
            *outer += 1;
            cell.lend(|inner| *inner += 1)
        });

        assert_eq!(inner, Some(None));
        assert_eq!(cell.lend(|count| *count), Some(1));
    }

    #[test]
    fn edges_are_counted_while_port_is_lent() {
        static PULSES: PulseCounter = PulseCounter::new();
        static PORT: PortCell<Vec<u8>> = PortCell::new();
        PORT.put(Vec::new());

        let (done_tx, done_rx) = mpsc::channel();
        PORT.lend(|buf| {
            // stands in for the edge interrupt firing in the middle of a slow write
            thread::spawn(move || {
                for _ in 0..5 {
                    PULSES.record(Direction::Up);
                }
                done_tx.send(()).ok();
            });
            let delivered = done_rx.recv_timeout(Duration::from_secs(5)).is_ok();
            buf.extend_from_slice(b"height\r\n");
            assert!(delivered, "counter blocked while the port was lent");
        });

        assert_eq!(PULSES.count(), 5);
    }
}
