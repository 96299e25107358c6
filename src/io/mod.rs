pub mod instance_reader;
pub use instance_reader::*;
pub mod instance_writer;
pub use instance_writer::TspWrite;
