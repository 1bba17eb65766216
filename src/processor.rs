use std::collections::VecDeque;
use std::convert::TryFrom;
use std::fmt;
use std::io;

use crate::console::Console;
use crate::fault::Fault;
use crate::memory::{Memory, Word};
use color_eyre::eyre::{Result, WrapErr};
use log::*;
use num_enum::IntoPrimitive;
use num_enum::TryFromPrimitive;

/// Values below this are literals; arithmetic wraps modulo this.
pub const MODULUS: Word = 0x8000;
/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Borrowed view of the machine handed to a breakpoint hook.
pub struct MachineState<'a> {
    pub pc: Word,
    pub registers: &'a [Word; REGISTER_COUNT],
    pub stack: &'a [Word],
    pub memory: &'a [Word],
}

/// Emulates the processor: registers, call stack and instruction pointer.
///
/// Memory is passed in per call so several machines can share none of
/// their state; the processor owns everything else, including the
/// characters of a partially consumed input line.
pub struct Processor {
    /// Instruction pointer
    pub pc: Word,
    /// The 8 general-purpose registers
    pub registers: [Word; REGISTER_COUNT],
    /// Unbounded call stack
    pub stack: Vec<Word>,
    /// Termination flag. Set by HALT and by RET on an empty stack
    pub halted: bool,
    pending_input: VecDeque<u8>,
    breakpoint: Option<Box<dyn FnMut(&MachineState<'_>)>>,
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("pc", &self.pc)
            .field("registers", &self.registers)
            .field("stack", &self.stack)
            .field("halted", &self.halted)
            .field("pending_input", &self.pending_input)
            .finish()
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// Initializes a new processor with zeroed registers, an empty stack
    /// and the instruction pointer at address 0
    pub fn new() -> Self {
        Self {
            pc: 0,
            registers: [0; REGISTER_COUNT],
            stack: Vec::new(),
            halted: false,
            pending_input: VecDeque::new(),
            breakpoint: None,
        }
    }

    /// Installs a hook fired when the reserved input line `debug` is read.
    /// Without a hook the line is treated as ordinary input.
    pub fn with_breakpoint(mut self, hook: impl FnMut(&MachineState<'_>) + 'static) -> Self {
        self.breakpoint = Some(Box::new(hook));
        self
    }

    /// Interprets a raw operand word: values below 32768 denote
    /// themselves, 32768..=32775 denote the registers 0..=7.
    pub fn resolve(&self, value: Word) -> Result<Word, Fault> {
        if value < MODULUS {
            Ok(value)
        } else if ((value - MODULUS) as usize) < REGISTER_COUNT {
            Ok(self.registers[(value - MODULUS) as usize])
        } else {
            Err(Fault::InvalidOperand { value })
        }
    }

    /// Stores `value` in the register named by a destination operand.
    /// Destinations are register addresses and are never resolved.
    pub fn write_register(&mut self, addr: Word, value: Word) -> Result<(), Fault> {
        match addr.checked_sub(MODULUS) {
            Some(index) if (index as usize) < REGISTER_COUNT => {
                self.registers[index as usize] = value;
                Ok(())
            }
            _ => Err(Fault::InvalidDestination { addr }),
        }
    }

    fn pop(&mut self) -> Result<Word, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow)
    }

    /// Resolves a branch target and checks it lies inside the address space
    fn target<const S: usize>(&self, raw: Word) -> Result<Word, Fault> {
        let addr = self.resolve(raw)?;
        if (addr as usize) < S {
            Ok(addr)
        } else {
            Err(Fault::AddressOutOfRange { addr })
        }
    }

    /// Returns the next input character code, reading one full line from
    /// the console whenever the pending buffer is empty.
    fn next_input_byte<const S: usize, C: Console>(
        &mut self,
        memory: &Memory<S>,
        console: &mut C,
    ) -> Result<u8, Fault> {
        loop {
            if let Some(byte) = self.pending_input.pop_front() {
                return Ok(byte);
            }

            let line = console.read_line()?.ok_or_else(|| {
                Fault::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input channel closed while the program was reading",
                ))
            })?;

            if line.trim_end_matches(|c| c == '\r' || c == '\n') == "debug" {
                if let Some(mut hook) = self.breakpoint.take() {
                    hook(&MachineState {
                        pc: self.pc,
                        registers: &self.registers,
                        stack: &self.stack,
                        memory: &memory.data,
                    });
                    self.breakpoint = Some(hook);
                    continue;
                }
            }

            self.pending_input.extend(line.bytes());
        }
    }

    /// Executes a single decoded instruction. `operands` holds the raw
    /// operand words in instruction-stream order; only the first
    /// `instruction.arity()` entries are meaningful.
    pub fn execute_instruction<const S: usize, C: Console>(
        &mut self,
        instruction: Instruction,
        operands: [Word; 3],
        memory: &mut Memory<S>,
        console: &mut C,
    ) -> Result<()> {
        let [a, b, c] = operands;

        match instruction {
            Instruction::HALT => {
                self.halted = true;

                debug!("HALT");
            }
            Instruction::SET => {
                let value = self.resolve(b)?;
                self.write_register(a, value)?;

                debug!("SET {} {}", a, value);
            }
            Instruction::PUSH => {
                let value = self.resolve(a)?;
                self.stack.push(value);

                debug!("PUSH {}", value);
            }
            Instruction::POP => {
                let value = self.pop()?;
                self.write_register(a, value)?;

                debug!("POP {}: {}", a, value);
            }
            Instruction::EQ => {
                let result = (self.resolve(b)? == self.resolve(c)?) as Word;
                self.write_register(a, result)?;

                debug!("EQ {} {} {}: {}", a, b, c, result);
            }
            Instruction::GT => {
                let result = (self.resolve(b)? > self.resolve(c)?) as Word;
                self.write_register(a, result)?;

                debug!("GT {} {} {}: {}", a, b, c, result);
            }
            Instruction::JMP => {
                self.pc = self.target::<S>(a)?;

                debug!("JMP {}", self.pc);
            }
            Instruction::JT => {
                let condition = self.resolve(a)?;
                let addr = self.target::<S>(b)?;
                if condition != 0 {
                    self.pc = addr;
                }

                debug!("JT {} {}", condition, addr);
            }
            Instruction::JF => {
                let condition = self.resolve(a)?;
                let addr = self.target::<S>(b)?;
                if condition == 0 {
                    self.pc = addr;
                }

                debug!("JF {} {}", condition, addr);
            }
            Instruction::ADD => {
                let (x, y) = (self.resolve(b)?, self.resolve(c)?);
                let result = ((x as u32 + y as u32) % MODULUS as u32) as Word;
                self.write_register(a, result)?;

                debug!("ADD {} {}: {}", x, y, result);
            }
            Instruction::MULT => {
                let (x, y) = (self.resolve(b)?, self.resolve(c)?);
                let result = ((x as u32 * y as u32) % MODULUS as u32) as Word;
                self.write_register(a, result)?;

                debug!("MULT {} {}: {}", x, y, result);
            }
            Instruction::MOD => {
                let (x, y) = (self.resolve(b)?, self.resolve(c)?);
                if y == 0 {
                    return Err(Fault::DivideByZero.into());
                }
                let result = x % y;
                self.write_register(a, result)?;

                debug!("MOD {} {}: {}", x, y, result);
            }
            Instruction::AND => {
                let result = self.resolve(b)? & self.resolve(c)?;
                self.write_register(a, result)?;

                debug!("AND {} {} {}: {}", a, b, c, result);
            }
            Instruction::OR => {
                let result = self.resolve(b)? | self.resolve(c)?;
                self.write_register(a, result)?;

                debug!("OR {} {} {}: {}", a, b, c, result);
            }
            Instruction::NOT => {
                // 15-bit complement; the literal range has no sign bit
                let result = !self.resolve(b)? & (MODULUS - 1);
                self.write_register(a, result)?;

                debug!("NOT {}: {}", b, result);
            }
            Instruction::RMEM => {
                let addr = self.resolve(b)?;
                let value = memory.read(addr)?;
                self.write_register(a, value)?;

                debug!("RMEM {}: {}", addr, value);
            }
            Instruction::WMEM => {
                let addr = self.resolve(a)?;
                let value = self.resolve(b)?;
                memory.write(addr, value)?;

                debug!("WMEM {}: {}", addr, value);
            }
            Instruction::CALL => {
                let addr = self.target::<S>(a)?;
                // pc already points past this instruction
                self.stack.push(self.pc);
                self.pc = addr;

                debug!("CALL {}", addr);
            }
            Instruction::RET => {
                match self.stack.pop() {
                    // Returning with nothing to return to is a normal halt
                    None => self.halted = true,
                    Some(addr) if (addr as usize) < S => self.pc = addr,
                    Some(addr) => return Err(Fault::AddressOutOfRange { addr }.into()),
                }

                debug!("RET {}", self.pc);
            }
            Instruction::OUT => {
                let value = self.resolve(a)?;
                if value > 0xFF {
                    return Err(Fault::InvalidOperand { value }.into());
                }
                console.write_byte(value as u8).map_err(Fault::Io)?;

                debug!("OUT {}", value);
            }
            Instruction::IN => {
                let byte = self.next_input_byte(memory, console)?;
                self.write_register(a, byte as Word)?;

                debug!("IN {}: {}", a, byte);
            }
            Instruction::NOOP => {
                debug!("NOOP");
            }
        }

        Ok(())
    }

    /// Runs one fetch–decode–execute cycle
    pub fn step<const S: usize, C: Console>(
        &mut self,
        memory: &mut Memory<S>,
        console: &mut C,
    ) -> Result<()> {
        let opcode = memory.read(self.pc)?;
        let instruction =
            Instruction::try_from(opcode).map_err(|_| Fault::InvalidOpcode { opcode })?;

        // Operands are fetched raw; each handler decides which of them to
        // resolve, since destinations are register addresses, not values.
        self.pc += 1;
        let mut operands = [0; 3];
        for slot in operands.iter_mut().take(instruction.arity()) {
            *slot = memory.read(self.pc)?;
            self.pc += 1;
        }

        self.execute_instruction(instruction, operands, memory, console)
    }

    /// Runs until the machine halts or a fault aborts execution
    pub fn run_until_halt<const S: usize, C: Console>(
        &mut self,
        memory: &mut Memory<S>,
        console: &mut C,
    ) -> Result<()> {
        while !self.halted {
            let at = self.pc;
            self.step(memory, console)
                .wrap_err_with(|| format!("fault at address 0x{:04X}", at))?;
        }

        info!("Machine halted at 0x{:04X}", self.pc);
        Ok(())
    }
}

macro_rules! instructions {
    ( $( $( #[doc = $doc:expr] )+ $name:ident = $repr:literal / $arity:literal , )+ ) => {
        /// Defines the instruction set together with each opcode's fixed
        /// operand count, so "no such opcode" and "wrong arity" are
        /// decided by a static table instead of at dispatch time
        #[repr(u16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        #[derive(TryFromPrimitive, IntoPrimitive)]
        pub enum Instruction {
            $(
                $( #[doc = $doc] )+
                $name = $repr,
            )+
        }

        impl Instruction {
            pub const ALL: &'static [Self] = &[
                $( Self::$name , )+
            ];

            /// The fixed number of operand words this opcode consumes
            pub const fn arity(&self) -> usize {
                match self {
                    $( Self::$name => $arity , )+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name) , )+
                }
            }
        }

        impl ::std::fmt::Display for Instruction {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $( Self::$name => f.write_str(stringify!($name)) , )+
                }
            }
        }
    }
}

instructions! {
    /// Stop execution
    HALT = 0 / 0,
    /// Set register a to the value of b
    SET = 1 / 2,
    /// Push a onto the stack
    PUSH = 2 / 1,
    /// Pop the top of the stack into register a; an empty stack is fatal
    POP = 3 / 1,
    /// Set register a to 1 if b equals c, 0 otherwise
    EQ = 4 / 3,
    /// Set register a to 1 if b is greater than c, 0 otherwise
    GT = 5 / 3,
    /// Jump to a
    JMP = 6 / 1,
    /// Jump to b if a is nonzero
    JT = 7 / 2,
    /// Jump to b if a is zero
    JF = 8 / 2,
    /// Set register a to b plus c, modulo 32768
    ADD = 9 / 3,
    /// Set register a to b times c, modulo 32768
    MULT = 10 / 3,
    /// Set register a to the remainder of b divided by c
    MOD = 11 / 3,
    /// Set register a to the bitwise and of b and c
    AND = 12 / 3,
    /// Set register a to the bitwise or of b and c
    OR = 13 / 3,
    /// Set register a to the 15-bit complement of b
    NOT = 14 / 2,
    /// Read memory at address b into register a
    RMEM = 15 / 2,
    /// Write the value of b into memory at address a
    WMEM = 16 / 2,
    /// Push the address of the next instruction and jump to a
    CALL = 17 / 1,
    /// Jump to the popped address; an empty stack halts the machine
    RET = 18 / 0,
    /// Write the character with code a to the output channel
    OUT = 19 / 1,
    /// Read one input character code into register a
    IN = 20 / 1,
    /// No operation
    NOOP = 21 / 0,
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::console::Scripted;
    use crate::memory::StdMem;
    use crate::write_program;

    use super::*;
    use color_eyre::eyre::Result;

    fn run_words(words: &[Word], input: &str) -> (Processor, StdMem, Scripted, Result<()>) {
        let mut mem = StdMem::default();
        mem.write_words(0, words);
        let mut cpu = Processor::new();
        let mut console = Scripted::new(input);
        let outcome = cpu.run_until_halt(&mut mem, &mut console);
        (cpu, mem, console, outcome)
    }

    #[test]
    fn test_resolve_literals() -> Result<()> {
        let cpu = Processor::new();

        assert_eq!(cpu.resolve(0)?, 0);
        assert_eq!(cpu.resolve(1234)?, 1234);
        assert_eq!(cpu.resolve(32767)?, 32767);

        Ok(())
    }

    #[test]
    fn test_resolve_registers() -> Result<()> {
        let mut cpu = Processor::new();
        cpu.registers[0] = 7;
        cpu.registers[7] = 0x7FFF;

        assert_eq!(cpu.resolve(32768)?, 7);
        assert_eq!(cpu.resolve(32775)?, 0x7FFF);

        Ok(())
    }

    #[test]
    fn test_resolve_invalid_operand() {
        let cpu = Processor::new();

        assert!(matches!(
            cpu.resolve(32776),
            Err(Fault::InvalidOperand { value: 32776 })
        ));
        assert!(matches!(
            cpu.resolve(0xFFFF),
            Err(Fault::InvalidOperand { value: 0xFFFF })
        ));
    }

    #[test]
    fn test_write_register_rejects_non_register_destination() {
        let mut cpu = Processor::new();

        assert!(matches!(
            cpu.write_register(10, 5),
            Err(Fault::InvalidDestination { addr: 10 })
        ));
        assert!(matches!(
            cpu.write_register(32776, 5),
            Err(Fault::InvalidDestination { addr: 32776 })
        ));
    }

    #[test]
    fn test_push_pop_round_trip() -> Result<()> {
        let mut cpu = Processor::new();
        cpu.stack.push(1);
        let depth = cpu.stack.len();

        cpu.stack.push(0xFFFF);
        assert_eq!(cpu.pop()?, 0xFFFF);
        assert_eq!(cpu.stack.len(), depth);

        Ok(())
    }

    #[test]
    fn test_pop_empty_stack_is_fatal() {
        use Instruction::*;
        let (_, _, _, outcome) = run_words(&[POP as Word, 32768], "");

        let err = outcome.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::StackUnderflow)
        ));
    }

    #[test]
    fn test_arithmetic_program() -> Result<()> {
        // set r0 4; set r1 1; add r2 r0 r1
        let mut mem = StdMem::default();
        use Instruction::*;
        write_program!(mem : 0 =>
            SET, 32768, 4,
            SET, 32769, 1,
            ADD, 32770, 32768, 32769,
            HALT
        );

        let mut cpu = Processor::new();
        let mut console = Scripted::default();
        cpu.run_until_halt(&mut mem, &mut console)?;

        assert_eq!(cpu.registers[2], 5);
        Ok(())
    }

    #[test]
    fn test_add_wraps_modulo_32768() -> Result<()> {
        use Instruction::*;
        let (cpu, _, _, outcome) = run_words(
            &[
                ADD as Word,
                32768,
                32767,
                1,
                MULT as Word,
                32769,
                16384,
                4,
                HALT as Word,
            ],
            "",
        );

        outcome?;
        assert_eq!(cpu.registers[0], 0);
        assert_eq!(cpu.registers[1], 0);
        Ok(())
    }

    #[test]
    fn test_mod_by_zero_is_fatal() {
        use Instruction::*;
        let (_, _, _, outcome) = run_words(&[MOD as Word, 32768, 5, 0], "");

        let err = outcome.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::DivideByZero)
        ));
    }

    #[test]
    fn test_not_is_15_bit() -> Result<()> {
        use Instruction::*;
        let (cpu, _, _, outcome) = run_words(
            &[NOT as Word, 32768, 0, NOT as Word, 32769, 0x2AAA, HALT as Word],
            "",
        );

        outcome?;
        assert_eq!(cpu.registers[0], 0x7FFF);
        assert_eq!(cpu.registers[1], 0x5555);
        Ok(())
    }

    #[test]
    fn test_load_and_execute_round_trip() -> Result<()> {
        // add r0 = r1 + 4, out r0; the words past the image are zero, so
        // the machine runs into a HALT right after the program
        let words: [Word; 6] = [9, 32768, 32769, 4, 19, 32768];
        let mut bytes = Vec::new();
        for word in &words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }

        let mut mem = StdMem::from_bytes(&bytes)?;
        let mut cpu = Processor::new();
        let mut console = Scripted::default();
        cpu.run_until_halt(&mut mem, &mut console)?;

        assert!(cpu.halted);
        assert_eq!(console.output, [4]);
        Ok(())
    }

    #[test]
    fn test_set_with_invalid_destination() {
        use Instruction::*;
        let (_, _, _, outcome) = run_words(&[SET as Word, 10, 5], "");

        let err = outcome.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::InvalidDestination { addr: 10 })
        ));
    }

    #[test]
    fn test_memory_round_trip() -> Result<()> {
        // wmem 100 1234; rmem r0 100
        use Instruction::*;
        let (cpu, mem, _, outcome) = run_words(
            &[
                WMEM as Word,
                100,
                1234,
                RMEM as Word,
                32768,
                100,
                HALT as Word,
            ],
            "",
        );

        outcome?;
        assert_eq!(mem.data[100], 1234);
        assert_eq!(cpu.registers[0], 1234);
        Ok(())
    }

    #[test]
    fn test_out_boundary() -> Result<()> {
        use Instruction::*;
        let (_, _, console, outcome) = run_words(&[OUT as Word, 255, HALT as Word], "");
        outcome?;
        assert_eq!(console.output, [255]);

        let (_, _, _, outcome) = run_words(&[OUT as Word, 256], "");
        let err = outcome.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::InvalidOperand { value: 256 })
        ));

        Ok(())
    }

    #[test]
    fn test_nested_calls_return_in_lifo_order() -> Result<()> {
        use Instruction::*;
        let (cpu, _, _, outcome) = run_words(
            &[
                CALL as Word, // 0: call the outer subroutine
                4,
                HALT as Word, // 2: final resume point
                NOOP as Word, // 3
                CALL as Word, // 4: outer calls inner
                8,
                RET as Word, // 6: outer returns to 2
                NOOP as Word, // 7
                RET as Word, // 8: inner returns to 6
            ],
            "",
        );

        outcome?;
        assert!(cpu.halted);
        assert_eq!(cpu.pc, 3); // halted right after address 2
        assert!(cpu.stack.is_empty());
        Ok(())
    }

    #[test]
    fn test_ret_on_empty_stack_halts() -> Result<()> {
        use Instruction::*;
        let (cpu, _, _, outcome) = run_words(&[RET as Word], "");

        outcome?;
        assert!(cpu.halted);
        Ok(())
    }

    #[test]
    fn test_conditional_jump_targets_resolve() -> Result<()> {
        use Instruction::*;
        let mut mem = StdMem::default();
        write_program!(mem : 0 =>
            JT, 1, 32768,   // target held in r0
            NOOP, NOOP
        );
        mem.data[10] = HALT as Word;

        let mut cpu = Processor::new();
        cpu.registers[0] = 10;
        let mut console = Scripted::default();
        cpu.run_until_halt(&mut mem, &mut console)?;

        assert_eq!(cpu.pc, 11);
        Ok(())
    }

    #[test]
    fn test_jump_out_of_range() {
        use Instruction::*;
        let mut mem = StdMem::default();
        write_program!(mem : 0 => JMP, 32768);

        let mut cpu = Processor::new();
        cpu.registers[0] = 0x9000;
        let mut console = Scripted::default();
        let err = cpu.run_until_halt(&mut mem, &mut console).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::AddressOutOfRange { addr: 0x9000 })
        ));
    }

    #[test]
    fn test_running_off_the_address_space_is_fatal() {
        use Instruction::*;
        let mut mem = StdMem::default();
        write_program!(mem : 0 => JMP, 0x7FFF);
        mem.data[0x7FFF] = NOOP as Word;

        let mut cpu = Processor::new();
        let mut console = Scripted::default();
        let err = cpu.run_until_halt(&mut mem, &mut console).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::AddressOutOfRange { addr: 0x8000 })
        ));
    }

    #[test]
    fn test_invalid_opcode() {
        let (_, _, _, outcome) = run_words(&[22], "");

        let err = outcome.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::InvalidOpcode { opcode: 22 })
        ));
    }

    #[test]
    fn test_input_delivers_one_character_per_in() -> Result<()> {
        use Instruction::*;
        let (cpu, _, _, outcome) = run_words(
            &[
                IN as Word,
                32768,
                IN as Word,
                32769,
                IN as Word,
                32770,
                HALT as Word,
            ],
            "hi\n",
        );

        outcome?;
        assert_eq!(cpu.registers[0], b'h' as Word);
        assert_eq!(cpu.registers[1], b'i' as Word);
        assert_eq!(cpu.registers[2], b'\n' as Word);
        Ok(())
    }

    #[test]
    fn test_input_end_of_stream_is_fatal() {
        use Instruction::*;
        let (_, _, _, outcome) = run_words(&[IN as Word, 32768], "");

        let err = outcome.unwrap_err();
        assert!(matches!(err.downcast_ref::<Fault>(), Some(Fault::Io(_))));
    }

    #[test]
    fn test_debug_line_is_ordinary_input_without_hook() -> Result<()> {
        use Instruction::*;
        let (cpu, _, _, outcome) = run_words(&[IN as Word, 32768, HALT as Word], "debug\n");

        outcome?;
        assert_eq!(cpu.registers[0], b'd' as Word);
        Ok(())
    }

    #[test]
    fn test_debug_line_fires_breakpoint_hook() -> Result<()> {
        use Instruction::*;
        let mut mem = StdMem::default();
        write_program!(mem : 0 => IN, 32768, HALT);

        let fired = Rc::new(Cell::new(false));
        let seen = Rc::clone(&fired);
        let mut cpu = Processor::new().with_breakpoint(move |state| {
            assert_eq!(state.registers.len(), REGISTER_COUNT);
            seen.set(true);
        });

        let mut console = Scripted::new("debug\nx\n");
        cpu.run_until_halt(&mut mem, &mut console)?;

        assert!(fired.get());
        assert_eq!(cpu.registers[0], b'x' as Word);
        Ok(())
    }

    #[test]
    fn test_arity_table_matches_instruction_set() {
        assert_eq!(Instruction::ALL.len(), 22);
        assert_eq!(Instruction::HALT.arity(), 0);
        assert_eq!(Instruction::ADD.arity(), 3);
        assert_eq!(Instruction::OUT.arity(), 1);
        assert_eq!(Instruction::RET.arity(), 0);
    }
}
