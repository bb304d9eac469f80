//! Command-line surface (spec.md §6).
//!
//! Resolved via `clap`'s derive API, matching the convention used
//! elsewhere in the example pack for flag-heavy CLIs (SPEC_FULL.md §6).

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_OUTPUT: &str = "a.sood.out";

#[derive(Parser, Debug)]
#[command(name = "soodc", about = "Compiler for the Sood programming language")]
pub struct Cli {
    /// Sood source file; omitted or `-` reads from stdin.
    pub input: Option<String>,

    /// Output file name.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    pub debug: bool,

    /// Skip LLVM module verification.
    #[arg(short = 'V', long = "no-verify")]
    pub no_verify: bool,

    /// Print generated AST to stdout.
    #[arg(short = 'a', long = "print-ast")]
    pub print_ast: bool,

    /// Print generated LLVM IR to stdout.
    #[arg(short = 'l', long = "print-llvm-ir")]
    pub print_llvm_ir: bool,

    /// JIT-execute the module within the compiler.
    #[arg(short = 'R', long = "run-llvm-ir")]
    pub run_llvm_ir: bool,

    /// Stop after generating the AST; write it to the output path.
    #[arg(short = 'S', long = "stop-after-ast")]
    pub stop_after_ast: bool,

    /// Stop after generating LLVM IR; write it to the output path.
    #[arg(short = 'C', long = "stop-after-llvm-ir")]
    pub stop_after_llvm_ir: bool,

    /// Stop after writing the object file; skip the native-link step.
    #[arg(short = 'O', long = "stop-after-object")]
    pub stop_after_object: bool,
}

impl Cli {
    /// Resolves the effective output path, applying the original's
    /// extension-rewriting behavior (SPEC_FULL.md §6, ported from
    /// `examples/original_source/src/cli.cpp`): when a real input file was
    /// given, `-o`/`--output` was *not* supplied explicitly, and a
    /// `--stop-after-*` flag is set, the output name becomes `<input>.<ext>`
    /// for the artifact being stopped at, instead of `a.sood.out`.
    #[must_use]
    pub fn resolve_output(&self) -> PathBuf {
        if let Some(explicit) = &self.output {
            return explicit.clone();
        }
        if let Some(input) = self.input.as_deref().filter(|s| *s != "-") {
            if self.stop_after_ast {
                return PathBuf::from(format!("{input}.ast"));
            }
            if self.stop_after_llvm_ir {
                return PathBuf::from(format!("{input}.ll"));
            }
            if self.stop_after_object {
                return PathBuf::from(format!("{input}.o"));
            }
        }
        PathBuf::from(DEFAULT_OUTPUT)
    }
}
