//! orbitroute CLI library.
//!
//! Output formatting shared by the `orbitroute` binary's subcommands.

pub mod output;
