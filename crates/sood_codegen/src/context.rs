//! Lowering Context (spec.md §4.2).
//!
//! Owns the target IR module, a LIFO stack of scope frames, the printf
//! handle, and the cached format-specifier globals. Every lowering rule
//! takes this context explicitly — no process-wide globals (spec.md §9
//! "Global state").

use std::path::Path;

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder as LlvmBuilder;
use inkwell::context::Context as LlvmContext;
use inkwell::execution_engine::ExecutionEngine;
use inkwell::module::{Linkage, Module};
use inkwell::targets::{CodeModel, FileType, RelocMode, Target, TargetMachine};
use inkwell::types::BasicTypeEnum;
use inkwell::values::{BasicValueEnum, FunctionValue, PointerValue};
use inkwell::{AddressSpace, OptimizationLevel};
use rustc_hash::FxHashMap;

use sood_ast::Stmt;

use crate::error::CodegenError;
use crate::types::SoodType;

/// One entry on the scope stack: a symbol table, the basic block currently
/// being emitted into, and a pending return-value slot. Identifier lookup
/// is scope-top only (spec.md §4.2, §9) — nested function declarations do
/// not walk an enclosing scope chain.
struct ScopeFrame<'ctx> {
    block: BasicBlock<'ctx>,
    return_value: Option<BasicValueEnum<'ctx>>,
    locals: FxHashMap<String, (PointerValue<'ctx>, SoodType)>,
}

pub struct Context<'ctx> {
    llcx: &'ctx LlvmContext,
    module: Module<'ctx>,
    builder: LlvmBuilder<'ctx>,
    printf_fn: FunctionValue<'ctx>,
    fmt_specifiers: FxHashMap<&'static str, PointerValue<'ctx>>,
    scopes: Vec<ScopeFrame<'ctx>>,
}

impl<'ctx> Context<'ctx> {
    /// Construct a new context targeting a fresh module. A printf-like
    /// external variadic function (`i32 printf(i8*, ...)`, C calling
    /// convention, external linkage) is declared immediately.
    pub fn new(llcx: &'ctx LlvmContext, module_name: &str) -> Self {
        let module = llcx.create_module(module_name);
        let builder = llcx.create_builder();
        let printf_fn = Self::declare_printf(llcx, &module);

        Self {
            llcx,
            module,
            builder,
            printf_fn,
            fmt_specifiers: FxHashMap::default(),
            scopes: Vec::new(),
        }
    }

    fn declare_printf(llcx: &'ctx LlvmContext, module: &Module<'ctx>) -> FunctionValue<'ctx> {
        let ptr_type = llcx.ptr_type(AddressSpace::default());
        let printf_type = llcx.i32_type().fn_type(&[ptr_type.into()], true);
        let func = module.add_function("printf", printf_type, Some(Linkage::External));
        func.set_call_conventions(0); // C calling convention
        func
    }

    pub fn llcx(&self) -> &'ctx LlvmContext {
        self.llcx
    }

    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    pub fn builder(&self) -> &LlvmBuilder<'ctx> {
        &self.builder
    }

    pub fn printf_fn(&self) -> FunctionValue<'ctx> {
        self.printf_fn
    }

    pub fn fmt_specifier(&self, name: &str) -> PointerValue<'ctx> {
        *self
            .fmt_specifiers
            .get(name)
            .unwrap_or_else(|| panic!("format specifier '{name}' was not materialized"))
    }

    // -- Scope stack --------------------------------------------------

    pub fn push_scope(&mut self, block: BasicBlock<'ctx>) {
        self.scopes.push(ScopeFrame {
            block,
            return_value: None,
            locals: FxHashMap::default(),
        });
        tracing::trace!(depth = self.scopes.len(), block = ?self.top().block.get_name(), "push scope");
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        tracing::trace!(depth = self.scopes.len(), "pop scope");
    }

    fn top_mut(&mut self) -> &mut ScopeFrame<'ctx> {
        self.scopes.last_mut().expect("scope stack must not be empty during lowering")
    }

    fn top(&self) -> &ScopeFrame<'ctx> {
        self.scopes.last().expect("scope stack must not be empty during lowering")
    }

    pub fn current_block(&self) -> BasicBlock<'ctx> {
        self.top().block
    }

    pub fn set_current_block(&mut self, block: BasicBlock<'ctx>) {
        self.top_mut().block = block;
    }

    pub fn set_local(&mut self, name: &str, value: PointerValue<'ctx>, ty: SoodType) {
        self.top_mut().locals.insert(name.to_string(), (value, ty));
    }

    pub fn get_local(&self, name: &str) -> Option<(PointerValue<'ctx>, SoodType)> {
        self.top().locals.get(name).copied()
    }

    /// The current scope frame's symbol table (spec.md §4.2 `locals`).
    /// Nothing in this crate consumes it directly — lookups go through
    /// [`Context::get_local`] — but it is exposed for callers (tests,
    /// future lowering rules) that need to inspect the whole frame.
    pub fn locals(&self) -> &FxHashMap<String, (PointerValue<'ctx>, SoodType)> {
        &self.top().locals
    }

    pub fn set_return_value(&mut self, value: BasicValueEnum<'ctx>) {
        self.top_mut().return_value = Some(value);
    }

    pub fn get_return_value(&self) -> Option<BasicValueEnum<'ctx>> {
        self.top().return_value
    }

    pub fn backend_type(&self, ty: SoodType) -> BasicTypeEnum<'ctx> {
        ty.backend_type(self.llcx)
    }

    // -- Top-level driver operations -----------------------------------

    /// Wraps `root` in an implicit `main` function (`void(void)`, external
    /// linkage per spec.md §3's invariants — a deliberate divergence from
    /// the original source's internal-linkage implicit main, see
    /// SPEC_FULL.md §4.2), lowers it, and emits the final `return void`.
    pub fn generate(&mut self, root: &[Stmt]) -> Result<(), CodegenError> {
        tracing::debug!(statements = root.len(), "lowering program into implicit main");
        let fn_type = self.llcx.void_type().fn_type(&[], false);
        let main_fn = self.module.add_function("main", fn_type, Some(Linkage::External));
        let entry = self.llcx.append_basic_block(main_fn, "entry");
        tracing::trace!("created entry block");

        self.push_scope(entry);
        self.builder.position_at_end(entry);

        self.materialize_format_specifiers();

        crate::emit::lower_block(self, root)?;

        self.builder.position_at_end(self.current_block());
        self.builder.build_return(None).expect("build_return");
        self.pop_scope();
        tracing::debug!("finished lowering program");
        Ok(())
    }

    fn materialize_format_specifiers(&mut self) {
        let numeric = self
            .builder
            .build_global_string_ptr("%d", "numeric_fmt_spec")
            .expect("build_global_string_ptr")
            .as_pointer_value();
        let string = self
            .builder
            .build_global_string_ptr("%s", "string_fmt_spec")
            .expect("build_global_string_ptr")
            .as_pointer_value();
        self.fmt_specifiers.insert("numeric", numeric);
        self.fmt_specifiers.insert("string", string);
    }

    pub fn verify(&self) -> Result<(), CodegenError> {
        self.module.verify().map_err(|message| CodegenError::ToolchainFailure {
            stage: "llvm module verification".to_string(),
            details: message.to_string(),
        })
    }

    pub fn print_ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    pub fn print_ir_to_file(&self, path: &Path) -> Result<(), CodegenError> {
        self.module.print_to_file(path).map_err(|message| CodegenError::ToolchainFailure {
            stage: "writing LLVM IR".to_string(),
            details: message.to_string(),
        })
    }

    /// JIT-executes the module's implicit `main`. The execution engine
    /// takes exclusive ownership of the module's JIT state; per spec.md
    /// §5, no further module mutation should be attempted after this call.
    #[allow(unsafe_code)]
    pub fn run_jit(&self) -> Result<(), CodegenError> {
        let engine: ExecutionEngine<'ctx> = self
            .module
            .create_jit_execution_engine(OptimizationLevel::None)
            .map_err(|message| CodegenError::ToolchainFailure {
                stage: "JIT engine construction".to_string(),
                details: message.to_string(),
            })?;

        // SAFETY: `main` was just declared above with signature `() -> void`
        // and lowered by `generate`; the JIT engine was built from the same
        // module, so the retrieved function pointer's ABI matches.
        unsafe {
            let main_fn = engine
                .get_function::<unsafe extern "C" fn()>("main")
                .map_err(|message| CodegenError::ToolchainFailure {
                    stage: "JIT function lookup".to_string(),
                    details: message.to_string(),
                })?;
            main_fn.call();
        }
        Ok(())
    }

    pub fn write_object(&self, path: &Path) -> Result<(), CodegenError> {
        Target::initialize_native(&inkwell::targets::InitializationConfig::default()).map_err(
            |details| CodegenError::ToolchainFailure {
                stage: "native target initialization".to_string(),
                details,
            },
        )?;

        let triple = TargetMachine::get_default_triple();
        self.module.set_triple(&triple);

        let target = Target::from_triple(&triple).map_err(|e| CodegenError::ToolchainFailure {
            stage: "target lookup".to_string(),
            details: e.to_string(),
        })?;

        let cpu = TargetMachine::get_host_cpu_name();
        let features = TargetMachine::get_host_cpu_features();
        let target_machine = target
            .create_target_machine(
                &triple,
                cpu.to_str().unwrap_or("generic"),
                features.to_str().unwrap_or(""),
                OptimizationLevel::None,
                RelocMode::Default,
                CodeModel::Default,
            )
            .ok_or_else(|| CodegenError::ToolchainFailure {
                stage: "target machine creation".to_string(),
                details: "unable to create target machine for host triple".to_string(),
            })?;

        self.module.set_data_layout(&target_machine.get_target_data().get_data_layout());

        target_machine
            .write_to_file(&self.module, FileType::Object, path)
            .map_err(|e| CodegenError::ToolchainFailure {
                stage: "object emission".to_string(),
                details: e.to_string(),
            })
    }
}
