//! In-memory FX2 running vend_ax, for driving the transfer loops in tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use fx2eeprom::constants::{EEPROM_LOCATOR, REQUEST_TYPE_READ, REQUEST_TYPE_WRITE, VENDAX_EEPROM_REQUEST};
use fx2eeprom::ControlTransport;
use nusb::transfer::TransferError;

/// One control transfer as seen by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

/// A 64 KiB EEPROM behind the vend_ax `0xA2` request.
pub struct MockEeprom {
    pub memory: RefCell<Vec<u8>>,
    pub log: RefCell<Vec<Request>>,
    /// Fail the n-th transfer (0-based) with a stall.
    pub fail_at: Option<usize>,
    /// Return only this many bytes on the n-th read transfer.
    pub short_reads: HashMap<usize, usize>,
    calls: Cell<usize>,
}

impl MockEeprom {
    /// An erased EEPROM (all 0xFF).
    pub fn new() -> Self {
        Self::with_contents(vec![0xFF; 0x1_0000])
    }

    /// An EEPROM filled with a recognizable pattern: each byte holds the
    /// low bits of its own address mixed with the high byte.
    pub fn patterned() -> Self {
        let memory = (0..0x1_0000u32)
            .map(|a| (a as u8) ^ ((a >> 8) as u8).rotate_left(3))
            .collect();
        Self::with_contents(memory)
    }

    pub fn with_contents(memory: Vec<u8>) -> Self {
        assert_eq!(memory.len(), 0x1_0000);
        Self {
            memory: RefCell::new(memory),
            log: RefCell::new(Vec::new()),
            fail_at: None,
            short_reads: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.log.borrow().clone()
    }

    pub fn addresses(&self) -> Vec<u16> {
        self.log.borrow().iter().map(|r| r.value).collect()
    }

    pub fn lengths(&self) -> Vec<u16> {
        self.log.borrow().iter().map(|r| r.length).collect()
    }

    pub fn range(&self, start: u16, len: usize) -> Vec<u8> {
        let memory = self.memory.borrow();
        (0..len)
            .map(|i| memory[usize::from(start.wrapping_add(i as u16))])
            .collect()
    }

    fn next_call(&self) -> Result<usize, TransferError> {
        let n = self.calls.get();
        self.calls.set(n + 1);
        if self.fail_at == Some(n) {
            Err(TransferError::Stall)
        } else {
            Ok(n)
        }
    }
}

impl ControlTransport for MockEeprom {
    fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>, TransferError> {
        self.log.borrow_mut().push(Request {
            request_type: REQUEST_TYPE_READ,
            request,
            value,
            index,
            length,
        });
        let n = self.next_call()?;
        if request != VENDAX_EEPROM_REQUEST || index != EEPROM_LOCATOR {
            return Err(TransferError::Stall);
        }

        let len = self
            .short_reads
            .get(&n)
            .copied()
            .unwrap_or(usize::from(length))
            .min(usize::from(length));
        Ok(self.range(value, len))
    }

    fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, TransferError> {
        self.log.borrow_mut().push(Request {
            request_type: REQUEST_TYPE_WRITE,
            request,
            value,
            index,
            length: data.len() as u16,
        });
        self.next_call()?;
        if request != VENDAX_EEPROM_REQUEST || index != EEPROM_LOCATOR {
            return Err(TransferError::Stall);
        }

        let mut memory = self.memory.borrow_mut();
        for (i, b) in data.iter().enumerate() {
            memory[usize::from(value.wrapping_add(i as u16))] = *b;
        }
        Ok(data.len())
    }
}
