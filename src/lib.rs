//! Emulator for a 16-bit register-and-stack machine with a 15-bit
//! word-addressable memory.
//!
//! A binary program image is loaded into [`memory::Memory`] once, then a
//! [`processor::Processor`] runs the fetch–decode–execute loop against it
//! until the machine halts or a [`fault::Fault`] aborts the run. Terminal
//! I/O goes through the [`console::Console`] trait so the machine can be
//! driven from scripted input in tests.

pub mod console;
pub mod fault;
pub mod memory;
pub mod processor;
