//! Protected-mode descriptor tables for early boot.
//!
//! Builds the flat-model GDT and the IDT, remaps the 8259 PICs so hardware
//! IRQs land above the CPU exception vectors, and loads both tables. The
//! hardware is reached only through [`arch::x86::PortIo`] and
//! [`arch::x86::TableRegisters`].
//!
//! ```ignore
//! let tables = os::kernel::storage::take().unwrap();
//! let mut platform = unsafe { os::arch::x86::X86Platform::new() };
//! os::kernel::init(tables, &mut platform, &STUBS, &mut HANDLERS, &InitConfig::default());
//! ```

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod kernel;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod logger;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod serial;
#[cfg(test)]
mod testing;

pub use kernel::config::InitConfig;
pub use kernel::error::{TableError, TableResult};
pub use kernel::init;
