//! steptrace CLI library: the command implementations behind the
//! `steptrace` binary, exposed so they can be exercised in tests.

pub mod commands;
