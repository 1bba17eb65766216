//! Writes a small hand-crafted program image for exercising the machine:
//! add r0 = r1 + 4, then out r0.

use std::fs::File;
use std::io::Write;

use color_eyre::eyre::Result;

const WORDS: [u16; 6] = [9, 32768, 32769, 4, 19, 32768];

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut file = File::create("test.bin")?;
    for word in &WORDS {
        file.write_all(&word.to_le_bytes())?;
    }

    Ok(())
}
