//! Serial port (COM1 @ 0x3F8), the early debug channel behind the logger.

use crate::arch::x86::port::{inb, outb};

const COM1: u16 = 0x3F8;

const IER_OFF: u16 = 1;
const LCR_OFF: u16 = 3;
const LCR_DLAB: u8 = 0x80;
const LCR_8N1: u8 = 0x03;
const MCR_OFF: u16 = 4;
const MCR_DTR_RTS: u8 = 0x03;
const LSR_OFF: u16 = 5;
const LSR_THRE: u8 = 0x20;

/// 115200 / 3 = 38400 baud.
const BAUD_DIVISOR: u16 = 3;

/// Initialize COM1 (38400 8n1, no interrupts). Call once at boot.
pub fn init() {
    unsafe {
        outb(COM1 + IER_OFF, 0x00);
        outb(COM1 + LCR_OFF, LCR_DLAB);
        outb(COM1, BAUD_DIVISOR as u8);
        outb(COM1 + IER_OFF, (BAUD_DIVISOR >> 8) as u8);
        outb(COM1 + LCR_OFF, LCR_8N1);
        outb(COM1 + MCR_OFF, MCR_DTR_RTS);
    }
}

fn transmit(byte: u8) {
    while unsafe { inb(COM1 + LSR_OFF) } & LSR_THRE == 0 {
        core::hint::spin_loop();
    }
    unsafe { outb(COM1, byte) }
}

/// `core::fmt::Write` sink for COM1. Emits `\r\n` for each `\n` so log lines
/// start at column zero on a terminal. [`init`] must have run.
pub struct Writer;

impl core::fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                transmit(b'\r');
            }
            transmit(byte);
        }
        Ok(())
    }
}
