pub mod errors;
pub mod header;
pub mod layer_table;
pub mod scalars;
