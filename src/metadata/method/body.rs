use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::metadata::signatures::{TypeRef, TypeSignature};

bitflags! {
    /// Exception clause kinds (§II.25.4.6)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ExceptionHandlerFlags: u16 {
        /// A typed exception clause
        const EXCEPTION = 0x0000;
        /// An exception filter and handler clause
        const FILTER = 0x0001;
        /// A finally clause
        const FINALLY = 0x0002;
        /// A fault clause (finally that executes only on exception)
        const FAULT = 0x0004;
    }
}

/// Exception handler defining a protected region of a method body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionHandler {
    /// Flags describing the type of exception handler (catch, filter, finally, fault)
    #[serde(default)]
    pub flags: ExceptionHandlerFlags,
    /// Offset in bytes of try block from start of method body
    pub try_offset: u32,
    /// Length in bytes of the try block
    pub try_length: u32,
    /// Offset in bytes of the handler block
    pub handler_offset: u32,
    /// Length in bytes of the handler block
    pub handler_length: u32,
    /// Caught exception type for typed clauses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_type: Option<TypeRef>,
}

/// The operand of an instruction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Operand {
    /// No operand present
    #[default]
    None,
    /// Integral immediate (including local and argument indices)
    Immediate(i64),
    /// Floating point immediate
    Float(f64),
    /// Referenced member or type, by full name
    Token(String),
    /// User string literal
    String(String),
    /// Branch target offset
    Target(u64),
    /// Switch table targets
    Switch(Vec<u64>),
}

/// A single CIL instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Primary opcode byte
    pub opcode: u8,
    /// Prefix byte (0 if no prefix, 0xFE for two-byte opcodes)
    #[serde(default)]
    pub prefix: u8,
    /// Human-readable instruction mnemonic (e.g., "add", "ldloc.s", "ret")
    pub mnemonic: String,
    /// The operand data for this instruction
    #[serde(default)]
    pub operand: Operand,
}

impl Instruction {
    /// Opcode of `ldnull`
    pub const LDNULL: u8 = 0x14;
    /// Opcode of `throw`
    pub const THROW: u8 = 0x7A;
    /// Opcode of `ret`
    pub const RET: u8 = 0x2A;

    /// Create an instruction without operand
    #[must_use]
    pub fn simple(opcode: u8, mnemonic: &str) -> Self {
        Self {
            opcode,
            prefix: 0,
            mnemonic: mnemonic.to_string(),
            operand: Operand::None,
        }
    }

    /// `ldnull`
    #[must_use]
    pub fn ldnull() -> Self {
        Self::simple(Self::LDNULL, "ldnull")
    }

    /// `throw`
    #[must_use]
    pub fn throw() -> Self {
        Self::simple(Self::THROW, "throw")
    }

    /// `ret`
    #[must_use]
    pub fn ret() -> Self {
        Self::simple(Self::RET, "ret")
    }
}

/// The implementation of a method
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodBody {
    /// Maximum number of items on the operand stack
    #[serde(default)]
    pub max_stack: u16,
    /// Flag, indicating to call default constructor on all local variables
    #[serde(default)]
    pub init_locals: bool,
    /// Declared local variable types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locals: Vec<TypeSignature>,
    /// Instruction stream
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    /// A list of exception handlers this method has
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exception_handlers: Vec<ExceptionHandler>,
}

impl MethodBody {
    /// The two-instruction body `ldnull; throw` with no locals and no handlers.
    ///
    /// Reference assemblies carry this body in place of the real implementation.
    #[must_use]
    pub fn stub() -> Self {
        Self {
            max_stack: 1,
            init_locals: false,
            locals: Vec::new(),
            instructions: vec![Instruction::ldnull(), Instruction::throw()],
            exception_handlers: Vec::new(),
        }
    }

    /// Returns `true` if this body is exactly the reference stub
    #[must_use]
    pub fn is_stub(&self) -> bool {
        self.locals.is_empty()
            && self.exception_handlers.is_empty()
            && self.instructions.len() == 2
            && self.instructions[0].opcode == Instruction::LDNULL
            && self.instructions[1].opcode == Instruction::THROW
    }
}
