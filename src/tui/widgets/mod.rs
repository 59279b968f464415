pub mod input_buffer;
pub mod rows;
pub mod wrap;
