mod emulator;

pub use emulator::*;
