//! IR and the transforms that produce it.

pub mod ir;
pub mod ir_printer;
pub mod special_forms;
pub mod type_ir;
