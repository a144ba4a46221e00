//! A small SQL AST and its rendering to SQL strings.

pub mod ast;
pub mod convert;
pub mod helpers;
pub mod string;
