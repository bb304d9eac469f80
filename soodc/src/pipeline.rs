//! Driver pipeline (spec.md §6, SPEC_FULL.md §6 "Driver sequencing").
//!
//! Ported 1:1 from `examples/original_source/src/main.cpp`'s stage
//! ordering: read input → parse → (print/stop after AST) → lower → verify
//! → (print/stop after IR) → (JIT run) → emit object → (stop after object)
//! → link.

use std::io::Read as _;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::error::DriverError;

pub fn run(cli: &Cli) -> Result<(), DriverError> {
    info!("starting Sood compiler");

    let source = read_input(cli.input.as_deref())?;
    let program = sood_syntax::parse_program(&source)?;

    if cli.print_ast {
        debug!("printing AST to stdout");
        println!("{}", sood_ast::print_program(&program));
    }

    let output = cli.resolve_output();

    if cli.stop_after_ast {
        info!("writing AST to {}", output.display());
        std::fs::write(&output, sood_ast::print_program(&program))?;
        info!("stopping after AST generation");
        return Ok(());
    }

    let llcx = inkwell::context::Context::create();
    let mut ctx = sood_codegen::Context::new(&llcx, "mod_main");
    ctx.generate(&program)?;

    if !cli.no_verify {
        info!("verifying LLVM module");
        ctx.verify()?;
    }

    if cli.print_llvm_ir {
        debug!("printing LLVM IR to stdout");
        println!("{}", ctx.print_ir());
    }

    if cli.stop_after_llvm_ir {
        info!("writing LLVM IR to {}", output.display());
        ctx.print_ir_to_file(&output)?;
        info!("stopping after LLVM IR generation");
        return Ok(());
    }

    if cli.run_llvm_ir {
        info!("running LLVM module via JIT");
        ctx.run_jit()?;
    }

    let obj_path = if cli.stop_after_object {
        output.clone()
    } else {
        temp_object_path(&output)?
    };

    debug!("writing object code to {}", obj_path.display());
    ctx.write_object(&obj_path)?;

    if cli.stop_after_object {
        info!("stopping after object emission");
        return Ok(());
    }

    link(&obj_path, &output)?;
    info!("native binary written to {}", output.display());
    info!("finishing Sood compiler");
    Ok(())
}

/// Reads the named input file, or standard input when `path` is `None` or
/// `"-"`. A warning (not a hard error) is logged for an empty input, per
/// spec.md §7's "I/O errors ... surfaced by the driver" framing of warnings
/// as distinct from failures.
fn read_input(path: Option<&str>) -> Result<String, DriverError> {
    let content = match path {
        None | Some("-") => {
            debug!("reading input from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => {
            debug!("reading input from file {path}");
            std::fs::read_to_string(path)?
        }
    };
    if content.trim().is_empty() {
        warn!("input is empty");
    }
    Ok(content)
}

/// A temporary `.o` path in the system temp directory, named after the
/// final output's file stem (mirrors the original's `mkstemp`-based
/// scratch object before the link step).
fn temp_object_path(output: &Path) -> Result<std::path::PathBuf, DriverError> {
    let stem = output
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sood_out".to_string());
    let file = tempfile::Builder::new()
        .prefix(&format!("{stem}."))
        .suffix(".o")
        .tempfile()?;
    let (_, path) = file.keep().map_err(|e| DriverError::ToolchainFailure {
        stage: "temporary object file creation".to_string(),
        details: e.to_string(),
    })?;
    Ok(path)
}

/// Invokes the system linker (`gcc -o <out> <obj>`) as a child process.
fn link(obj_path: &Path, output: &Path) -> Result<(), DriverError> {
    let status = Command::new("gcc")
        .arg("-o")
        .arg(output)
        .arg(obj_path)
        .status()
        .map_err(|e| DriverError::ToolchainFailure {
            stage: "linking".to_string(),
            details: e.to_string(),
        })?;

    if !status.success() {
        return Err(DriverError::ToolchainFailure {
            stage: "linking".to_string(),
            details: format!("gcc exited with {status}"),
        });
    }
    Ok(())
}
