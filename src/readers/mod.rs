pub mod accident_reader;

pub use accident_reader::AccidentReader;
