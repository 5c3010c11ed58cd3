//! A two-pass assembler for the Intel 8085.
//!
//! Pass 1 ([`symtab::build_label_table`]) works out the address of
//! each label; pass 2 ([`encoder`]) turns each instruction into one to
//! three bytes, which are written out as hexadecimal text, one
//! instruction per line.  The [`assemble_source`] and
//! [`assemble_file`] functions run both passes.
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::bool_to_int_with_if)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // fix soon
#![allow(clippy::trivially_copy_pass_by_ref)] // fix soon

pub mod encoder;
pub mod resolver;
pub mod symtab;
pub mod tokenizer;

mod driver;
mod listing;
mod operand;
mod options;
mod types;

pub use driver::*;
pub use listing::*;
pub use options::*;
pub use types::*;
