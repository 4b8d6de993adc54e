/*
slot.rs

Copyright 2026 The Magic Farm contributors

This file is part of Magic Farm.

Magic Farm is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Magic Farm is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Magic Farm. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Single outstanding request.
//!
//! A [`Slot`] holds the receiving end of the last request only. Opening the slot again drops
//! the previous receiver: the sender of the superseded request then fails to deliver its
//! result, which is discarded. At most one completion is therefore received per slot.

use async_channel::{Receiver, Sender, TryRecvError};
use log::debug;

/// State of a slot after a poll.
#[derive(Debug, PartialEq)]
pub enum Poll<T> {
    /// No request is outstanding.
    Idle,

    /// The request is still running.
    Pending,

    /// The request completed with the given result.
    Ready(T),

    /// The request ended without delivering a result.
    Abandoned,
}

/// Receiving end of the single outstanding request.
#[derive(Debug)]
pub struct Slot<T> {
    /// Name of the slot, for the logs.
    name: &'static str,
    pending: Option<Receiver<T>>,
}

impl<T> Slot<T> {
    /// Create an idle [`Slot`] object.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: None,
        }
    }

    /// Start a new request and return the sender that delivers its result.
    ///
    /// The previous request, if any, is superseded.
    pub fn open(&mut self) -> Sender<T> {
        if self.pending.is_some() {
            debug!("{}: new request supersedes the pending one", self.name);
        }
        let (sender, receiver): (Sender<T>, Receiver<T>) = async_channel::bounded(1);
        self.pending = Some(receiver);
        sender
    }

    /// Whether a request is outstanding.
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Return the result of the outstanding request without blocking.
    pub fn poll(&mut self) -> Poll<T> {
        let receiver: &Receiver<T> = match self.pending.as_ref() {
            Some(r) => r,
            None => return Poll::Idle,
        };
        match receiver.try_recv() {
            Ok(value) => {
                self.pending = None;
                Poll::Ready(value)
            }
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Closed) => {
                debug!("{}: request ended without a result", self.name);
                self.pending = None;
                Poll::Abandoned
            }
        }
    }

    /// Block until the outstanding request delivers its result.
    ///
    /// Return None if no request is outstanding, or if the request ended without a result.
    pub fn wait(&mut self) -> Option<T> {
        let receiver: Receiver<T> = self.pending.take()?;
        receiver.recv_blocking().ok()
    }

    /// Forget the outstanding request.
    pub fn close(&mut self) {
        if self.pending.take().is_some() {
            debug!("{}: pending request cancelled", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_slot() {
        let mut slot: Slot<u32> = Slot::new("test");
        assert!(!slot.is_open());
        assert_eq!(slot.poll(), Poll::Idle);
        assert_eq!(slot.wait(), None);
    }

    #[test]
    fn result_is_received_once() {
        let mut slot: Slot<u32> = Slot::new("test");
        let sender = slot.open();
        assert_eq!(slot.poll(), Poll::Pending);
        sender.send_blocking(7).expect("send");
        assert_eq!(slot.poll(), Poll::Ready(7));
        assert_eq!(slot.poll(), Poll::Idle);
    }

    #[test]
    fn superseded_sender_cannot_deliver() {
        let mut slot: Slot<u32> = Slot::new("test");
        let first = slot.open();
        let second = slot.open();
        assert!(first.send_blocking(1).is_err());
        second.send_blocking(2).expect("send");
        assert_eq!(slot.wait(), Some(2));
    }

    #[test]
    fn dropped_sender_abandons_the_request() {
        let mut slot: Slot<u32> = Slot::new("test");
        drop(slot.open());
        assert_eq!(slot.poll(), Poll::Abandoned);
        assert!(!slot.is_open());
    }

    #[test]
    fn closed_slot_drops_the_result() {
        let mut slot: Slot<u32> = Slot::new("test");
        let sender = slot.open();
        slot.close();
        assert!(sender.send_blocking(3).is_err());
        assert_eq!(slot.poll(), Poll::Idle);
    }
}
