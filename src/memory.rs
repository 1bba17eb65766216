use crate::fault::Fault;

pub mod load;

pub type Word = u16; // the machine's only value type

/// Default memory covering the full 15-bit address space
pub type StdMem = Memory<0x8000>;

/// Word-addressable memory for use with the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Memory<const S: usize> {
    /// The actual data of the memory
    pub data: [Word; S],
}

impl<const S: usize> Default for Memory<S> {
    /// Initializes the memory with every word zeroed
    fn default() -> Self {
        Memory { data: [0; S] }
    }
}

impl<const S: usize> Memory<S> {
    /// Reads the word at `position`
    pub fn read(&self, position: Word) -> Result<Word, Fault> {
        self.data
            .get(position as usize)
            .copied()
            .ok_or(Fault::AddressOutOfRange { addr: position })
    }

    /// Writes a word to the memory
    pub fn write(&mut self, position: Word, value: Word) -> Result<(), Fault> {
        match self.data.get_mut(position as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Fault::AddressOutOfRange { addr: position }),
        }
    }

    /// Writes a slice of words to the memory starting at `position`
    pub fn write_words(&mut self, position: Word, words: &[Word]) {
        self.data[position as usize..position as usize + words.len()].copy_from_slice(words);
    }
}

/// Writes a block of instructions and operands directly into the memory
#[macro_export]
macro_rules! write_program {
    ( $mem:ident : $pos:expr => $( $word:expr ),+ ) => {
        $mem.write_words($pos, &[
            $(
                $word as Word,
            )+
        ]);
    };
}
