//! Protected-mode bring-up.
//!
//! [`init`] runs once, before interrupts are enabled:
//!
//! 1. build the GDT and load it (`Uninitialized → GdtReady`)
//! 2. clear the IDT, remap the PICs, bind the stubs, load it (`→ IdtReady`)
//! 3. clear the dispatcher's handler table
//!
//! The stages are types, so skipping or reordering a step does not compile.

pub mod config;
pub mod error;
pub mod gdt;
pub mod idt;
pub mod storage;
pub mod tables;
#[cfg(test)]
mod tests;

use core::marker::PhantomData;

use crate::arch::x86::{PortIo, TableRegisters};
use config::InitConfig;
use idt::{HandlerTable, StubTable};
use tables::DescriptorTables;

pub struct Uninitialized;
pub struct GdtReady;
pub struct IdtReady;

/// Descriptor tables at a given stage of initialization.
pub struct Init<S> {
    tables: &'static mut DescriptorTables,
    _stage: PhantomData<S>,
}

impl<S> Init<S> {
    fn advance<T>(self) -> Init<T> {
        Init {
            tables: self.tables,
            _stage: PhantomData,
        }
    }

    pub fn tables(&self) -> &DescriptorTables {
        &*self.tables
    }
}

impl Init<Uninitialized> {
    pub fn new(tables: &'static mut DescriptorTables) -> Self {
        Self {
            tables,
            _stage: PhantomData,
        }
    }

    /// Build the flat-model GDT and load it.
    pub fn load_gdt<R: TableRegisters>(mut self, cpu: &mut R) -> Init<GdtReady> {
        log::info!("gdt: building {} segments", gdt::GDT_ENTRIES);
        gdt::build(&mut self.tables.gdt);

        let pointer = self.tables.gdt_pointer();
        log::debug!("gdt: base {:#010x}, limit {}", pointer.base(), pointer.limit());
        cpu.load_gdt(&pointer);

        self.advance()
    }
}

impl Init<GdtReady> {
    /// Clear the IDT, remap the PICs, bind the stubs and load the IDT.
    pub fn load_idt<H>(
        mut self,
        hw: &mut H,
        stubs: &StubTable,
        config: &InitConfig,
    ) -> Init<IdtReady>
    where
        H: PortIo + TableRegisters,
    {
        idt::clear(&mut self.tables.idt);

        let pics = config.pics();
        log::info!(
            "pic: remapping IRQs to {:#04x}/{:#04x}",
            pics.master_offset(),
            pics.slave_offset()
        );
        pics.remap(hw, config.enabled_irqs());

        idt::bind(&mut self.tables.idt, stubs, config);
        if config.user_accessible_gates() {
            log::info!("idt: gates reachable from ring 3");
        }

        let pointer = self.tables.idt_pointer();
        log::debug!("idt: base {:#010x}, limit {}", pointer.base(), pointer.limit());
        hw.load_idt(&pointer);

        self.advance()
    }
}

impl Init<IdtReady> {
    /// Empty the dispatcher's table and finish.
    pub fn clear_handlers(self, handlers: &mut HandlerTable) -> &'static DescriptorTables {
        handlers.clear();
        log::info!("descriptor tables installed");
        self.tables
    }
}

/// Build and install both tables, then clear `handlers`.
///
/// Must run exactly once, with interrupts disabled.
pub fn init<H>(
    tables: &'static mut DescriptorTables,
    hw: &mut H,
    stubs: &StubTable,
    handlers: &mut HandlerTable,
    config: &InitConfig,
) -> &'static DescriptorTables
where
    H: PortIo + TableRegisters,
{
    Init::new(tables)
        .load_gdt(hw)
        .load_idt(hw, stubs, config)
        .clear_handlers(handlers)
}
