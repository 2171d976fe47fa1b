//! Order lines: customer and administrator mutations, sale archiving

mod archive;
mod mutations;

pub use archive::*;
pub use mutations::*;
