//! Optional values and OS shell primitives.
//!
//! Two independent units: [`optional`] provides [`Optional`], a present/absent
//! value container that avoids ambiguous null references, and [`shell`]
//! provides the [`Shell`] trait over OS primitives (command execution, files,
//! hostname) with a real pass-through implementation and a deterministic mock
//! for tests.

pub mod optional;
pub mod shell;

// Re-export commonly used items
pub use optional::{Optional, OptionalError, OptionalResult};
pub use shell::{
    CommandOutput, IniValue, LocalShell, MockShell, Shell, ShellError, ShellResult,
};
