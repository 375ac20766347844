//! Command-line surface for the stressgen generators.
//!
//! Every command seeds one random source, generates a single structure and
//! writes it as plain text. The seed is logged so any run can be replayed
//! with `--seed`.

mod commands;

pub use commands::{
    ArrayArgs, ArrayKind, Cli, CliError, Command, EdgeOutput, GraphArgs, GraphKind, PrimeArgs,
    RunSummary, SequenceOutput, ShapeArg, TreeArgs, run_cli,
};
