//! Hardware stand-ins for host tests.

use crate::arch::x86::pic::IRQ_LINES;
use crate::arch::x86::{PortIo, TableRegisters};
use crate::kernel::idt::{StubTable, EXCEPTION_VECTORS};
use crate::kernel::tables::{DescriptorTables, TablePointer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwEvent {
    PortWrite { port: u16, value: u8 },
    IoWait,
    LoadGdt(TablePointer),
    LoadIdt(TablePointer),
}

/// Records every port write, settle delay and table load in order.
#[derive(Debug, Default)]
pub struct RecordingHardware {
    pub events: Vec<HwEvent>,
}

impl RecordingHardware {
    pub fn port_writes(&self) -> Vec<(u16, u8)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                HwEvent::PortWrite { port, value } => Some((port, value)),
                _ => None,
            })
            .collect()
    }

    pub fn table_loads(&self) -> Vec<HwEvent> {
        self.events
            .iter()
            .copied()
            .filter(|event| matches!(event, HwEvent::LoadGdt(_) | HwEvent::LoadIdt(_)))
            .collect()
    }
}

impl PortIo for RecordingHardware {
    fn write_u8(&mut self, port: u16, value: u8) {
        self.events.push(HwEvent::PortWrite { port, value });
    }

    fn io_wait(&mut self) {
        self.events.push(HwEvent::IoWait);
    }
}

impl TableRegisters for RecordingHardware {
    fn load_gdt(&mut self, pointer: &TablePointer) {
        self.events.push(HwEvent::LoadGdt(*pointer));
    }

    fn load_idt(&mut self, pointer: &TablePointer) {
        self.events.push(HwEvent::LoadIdt(*pointer));
    }
}

/// Fresh tables with a stable address, as `init` requires.
pub fn leak_tables() -> &'static mut DescriptorTables {
    Box::leak(Box::new(DescriptorTables::new()))
}

/// Distinct stub addresses with every offset bit pattern exercised.
pub fn sample_stubs() -> StubTable {
    let mut exceptions = [0u32; EXCEPTION_VECTORS];
    for (vector, address) in exceptions.iter_mut().enumerate() {
        *address = 0xC010_0000 + (vector as u32) * 0x10;
    }
    let mut irqs = [0u32; IRQ_LINES];
    for (line, address) in irqs.iter_mut().enumerate() {
        *address = 0x0012_3400 + (line as u32) * 0x20;
    }
    StubTable::new(exceptions, irqs)
}
