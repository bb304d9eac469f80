//! Type & Cast Resolver (spec.md §4.3).
//!
//! Three source types only: `integer` (i64), `float` (f64), `string`
//! (`i8*`). No generics, no user-defined types — this is a closed set by
//! design (spec.md §1 Non-goals).

use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;
use inkwell::values::BasicValueEnum;
use inkwell::AddressSpace;

use sood_ast::BinaryOp;

use crate::error::CodegenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoodType {
    Integer,
    Float,
    String,
}

impl SoodType {
    /// Maps a source type-name identifier (`integer`/`float`/`string`) to
    /// its resolved type, or `UnknownType` for anything else.
    pub fn from_name(name: &str) -> Result<Self, CodegenError> {
        match name {
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            other => Err(CodegenError::UnknownType(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }

    /// Backend representation: i64, f64, or a pointer to i8.
    pub fn backend_type<'ctx>(self, llcx: &'ctx Context) -> BasicTypeEnum<'ctx> {
        match self {
            Self::Integer => llcx.i64_type().into(),
            Self::Float => llcx.f64_type().into(),
            Self::String => llcx.ptr_type(AddressSpace::default()).into(),
        }
    }

    /// Classify an already-lowered value back into a `SoodType`, used when
    /// inspecting a value whose declared type isn't threaded alongside it
    /// (e.g. the `Write` statement's type dispatch in spec.md §4.4).
    pub fn of_value(value: BasicValueEnum<'_>) -> Option<Self> {
        match value {
            BasicValueEnum::IntValue(_) => Some(Self::Integer),
            BasicValueEnum::FloatValue(_) => Some(Self::Float),
            BasicValueEnum::PointerValue(_) => Some(Self::String),
            _ => None,
        }
    }
}

/// Zero-initializer for a declared-but-uninitialized variable.
pub fn zero_value<'ctx>(
    llcx: &'ctx Context,
    builder: &inkwell::builder::Builder<'ctx>,
    ty: SoodType,
) -> BasicValueEnum<'ctx> {
    match ty {
        SoodType::Integer => llcx.i64_type().const_zero().into(),
        SoodType::Float => llcx.f64_type().const_zero().into(),
        SoodType::String => {
            // Pointer to a freshly created empty global string.
            let ptr = builder
                .build_global_string_ptr("", "empty_str")
                .expect("build_global_string_ptr");
            ptr.as_pointer_value().into()
        }
    }
}

/// Implicit promotion in binary operations (spec.md §4.3): if exactly one
/// operand is double and the other integer, the integer side is converted
/// via `uitofp`; both-integer and both-double operands are left alone.
/// Strings are never valid operands here.
pub fn promote_binary<'ctx>(
    llcx: &'ctx Context,
    builder: &inkwell::builder::Builder<'ctx>,
    op: BinaryOp,
    lhs: BasicValueEnum<'ctx>,
    lhs_ty: SoodType,
    rhs: BasicValueEnum<'ctx>,
    rhs_ty: SoodType,
) -> Result<(BasicValueEnum<'ctx>, BasicValueEnum<'ctx>, SoodType), CodegenError> {
    if lhs_ty == SoodType::String || rhs_ty == SoodType::String {
        return Err(CodegenError::UnsupportedOperandTypes {
            op,
            lhs_type: lhs_ty.name().to_string(),
            rhs_type: rhs_ty.name().to_string(),
        });
    }

    match (lhs_ty, rhs_ty) {
        (SoodType::Integer, SoodType::Integer) | (SoodType::Float, SoodType::Float) => {
            Ok((lhs, rhs, lhs_ty))
        }
        (SoodType::Integer, SoodType::Float) => {
            let promoted = builder
                .build_unsigned_int_to_float(lhs.into_int_value(), llcx.f64_type(), "uitofp")
                .expect("build_unsigned_int_to_float");
            Ok((promoted.into(), rhs, SoodType::Float))
        }
        (SoodType::Float, SoodType::Integer) => {
            let promoted = builder
                .build_unsigned_int_to_float(rhs.into_int_value(), llcx.f64_type(), "uitofp")
                .expect("build_unsigned_int_to_float");
            Ok((lhs, promoted.into(), SoodType::Float))
        }
        _ => unreachable!("string operands already rejected above"),
    }
}

/// Implicit cast in assignments, RHS to LHS's declared type (spec.md
/// §4.3). Same-type assignments pass the value through unchanged;
/// integer/float assignments cast the RHS value; any string/non-string
/// mismatch errors with `StringCoercion` rather than the original's
/// historical no-op (Open Question 4).
pub fn assignment_cast<'ctx>(
    llcx: &'ctx Context,
    builder: &inkwell::builder::Builder<'ctx>,
    target_ty: SoodType,
    source_ty: SoodType,
    source_value: BasicValueEnum<'ctx>,
) -> Result<BasicValueEnum<'ctx>, CodegenError> {
    match (target_ty, source_ty) {
        (a, b) if a == b => Ok(source_value),
        (SoodType::Integer, SoodType::Float) => {
            // Resolves Open Question 1: the RHS value is cast, not the
            // existing LHS value (the original's `cast_relevantly` typo).
            let cast = builder
                .build_float_to_signed_int(
                    source_value.into_float_value(),
                    llcx.i64_type(),
                    "fptosi",
                )
                .expect("build_float_to_signed_int");
            Ok(cast.into())
        }
        (SoodType::Float, SoodType::Integer) => {
            let cast = builder
                .build_unsigned_int_to_float(
                    source_value.into_int_value(),
                    llcx.f64_type(),
                    "uitofp",
                )
                .expect("build_unsigned_int_to_float");
            Ok(cast.into())
        }
        (SoodType::String, _) | (_, SoodType::String) => Err(CodegenError::StringCoercion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_type_names() {
        assert_eq!(SoodType::from_name("integer").unwrap(), SoodType::Integer);
        assert_eq!(SoodType::from_name("float").unwrap(), SoodType::Float);
        assert_eq!(SoodType::from_name("string").unwrap(), SoodType::String);
    }

    #[test]
    fn rejects_unknown_type_names() {
        assert!(matches!(
            SoodType::from_name("boolean"),
            Err(CodegenError::UnknownType(_))
        ));
    }

    #[test]
    fn assignment_cast_casts_the_rhs_value() {
        let llcx = Context::create();
        let module = llcx.create_module("test");
        let builder = llcx.create_builder();
        let func = module.add_function("t", llcx.void_type().fn_type(&[], false), None);
        let block = llcx.append_basic_block(func, "entry");
        builder.position_at_end(block);

        let float_val = llcx.f64_type().const_float(3.9);
        let result =
            assignment_cast(&llcx, &builder, SoodType::Integer, SoodType::Float, float_val.into())
                .unwrap();
        assert!(matches!(result, BasicValueEnum::IntValue(_)));
    }

    #[test]
    fn string_mismatch_errors() {
        let llcx = Context::create();
        let module = llcx.create_module("test");
        let builder = llcx.create_builder();
        let func = module.add_function("t", llcx.void_type().fn_type(&[], false), None);
        let block = llcx.append_basic_block(func, "entry");
        builder.position_at_end(block);

        let int_val = llcx.i64_type().const_int(1, false);
        let result =
            assignment_cast(&llcx, &builder, SoodType::String, SoodType::Integer, int_val.into());
        assert_eq!(result, Err(CodegenError::StringCoercion));
    }
}
