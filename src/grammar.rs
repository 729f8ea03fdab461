//! The StartASM surface grammar used by the stress corpus.
//!
//! This is the fixed vocabulary every generated line is drawn from: ten
//! registers, seven opcodes grouped into four [`OperationKind`]s, and one
//! rendering template per kind.
//!
//! | Kind                | Operands             | Template                         |
//! |---------------------|----------------------|----------------------------------|
//! | binary arithmetic   | 3 registers          | `<op> <r1> with <r2> to <r3>`    |
//! | move                | 2 registers          | `move <r1> to <r2>`              |
//! | load                | 1 address, 1 register| `load m<<addr>> to <r1>`         |
//! | store               | 1 register, 1 address| `store <r1> to m<<addr>>`        |
//!
//! Rendering is done through [`fmt::Display`] on [`InstructionLine`]; the
//! reverse direction ([`str::parse`]) accepts exactly the canonical rendering
//! and nothing else, so `line.parse::<InstructionLine>()` doubles as the
//! grammar check for a corpus line.

use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use thiserror::Error;

use crate::config::{ADDRESS_MAX, REGISTER_COUNT};

// ── Registers ────────────────────────────────────────────────────────────────

/// One of the ten general-purpose registers `r0`..`r9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(u8);

impl Register {
    /// All registers, in index order.
    pub const ALL: [Register; REGISTER_COUNT] = [
        Register(0),
        Register(1),
        Register(2),
        Register(3),
        Register(4),
        Register(5),
        Register(6),
        Register(7),
        Register(8),
        Register(9),
    ];

    /// Returns the register with the given index, or `None` past `r9`.
    pub fn new(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Uniform over `r0`..`r9`.
impl Distribution<Register> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Register {
        Register::ALL[rng.gen_range(0..Register::ALL.len())]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

// ── Memory addresses ─────────────────────────────────────────────────────────

/// A memory operand address in `0..=ADDRESS_MAX`, rendered as `m<addr>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(u32);

impl Address {
    /// Returns `None` when `value` exceeds [`ADDRESS_MAX`].
    pub fn new(value: u32) -> Option<Self> {
        (value <= ADDRESS_MAX).then_some(Address(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Uniform over `0..=ADDRESS_MAX`.
impl Distribution<Address> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Address {
        Address(rng.gen_range(0..=ADDRESS_MAX))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m<{}>", self.0)
    }
}

/// A single operand slot: either a register or a memory address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Address(Address),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => fmt::Display::fmt(r, f),
            Operand::Address(a) => fmt::Display::fmt(a, f),
        }
    }
}

// ── Opcodes and operation kinds ──────────────────────────────────────────────

/// The four grammar shapes a line can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    BinaryArithmetic,
    Move,
    Load,
    Store,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::BinaryArithmetic,
        OperationKind::Move,
        OperationKind::Load,
        OperationKind::Store,
    ];

    /// Number of register operands the template takes.
    pub fn register_arity(self) -> usize {
        match self {
            OperationKind::BinaryArithmetic => 3,
            OperationKind::Move => 2,
            OperationKind::Load | OperationKind::Store => 1,
        }
    }

    /// Whether the template carries a `m<addr>` operand.
    pub fn takes_address(self) -> bool {
        matches!(self, OperationKind::Load | OperationKind::Store)
    }

    /// Human-readable template, as documented at module level.
    pub fn template(self) -> &'static str {
        match self {
            OperationKind::BinaryArithmetic => "<op> <r1> with <r2> to <r3>",
            OperationKind::Move => "move <r1> to <r2>",
            OperationKind::Load => "load m<<addr>> to <r1>",
            OperationKind::Store => "store <r1> to m<<addr>>",
        }
    }
}

/// The four binary arithmetic mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Multiply,
    Divide,
}

impl ArithOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Multiply => "multiply",
            ArithOp::Divide => "divide",
        }
    }

    fn from_mnemonic(s: &str) -> Option<Self> {
        match s {
            "add" => Some(ArithOp::Add),
            "sub" => Some(ArithOp::Sub),
            "multiply" => Some(ArithOp::Multiply),
            "divide" => Some(ArithOp::Divide),
            _ => None,
        }
    }
}

/// Every concrete mnemonic the synthesizer can emit.
///
/// Sampling is uniform over this list, not over [`OperationKind`], so the
/// arithmetic kind makes up four sevenths of a corpus on average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Arith(ArithOp),
    Move,
    Load,
    Store,
}

impl Opcode {
    pub const ALL: [Opcode; 7] = [
        Opcode::Arith(ArithOp::Add),
        Opcode::Arith(ArithOp::Sub),
        Opcode::Arith(ArithOp::Multiply),
        Opcode::Arith(ArithOp::Divide),
        Opcode::Move,
        Opcode::Load,
        Opcode::Store,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Arith(op) => op.mnemonic(),
            Opcode::Move => "move",
            Opcode::Load => "load",
            Opcode::Store => "store",
        }
    }

    pub fn kind(self) -> OperationKind {
        match self {
            Opcode::Arith(_) => OperationKind::BinaryArithmetic,
            Opcode::Move => OperationKind::Move,
            Opcode::Load => OperationKind::Load,
            Opcode::Store => OperationKind::Store,
        }
    }
}

// ── Instruction lines ────────────────────────────────────────────────────────

/// One rendered line of the corpus body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionLine {
    Arith {
        op: ArithOp,
        lhs: Register,
        rhs: Register,
        dst: Register,
    },
    Move {
        src: Register,
        dst: Register,
    },
    Load {
        addr: Address,
        dst: Register,
    },
    Store {
        src: Register,
        addr: Address,
    },
}

impl InstructionLine {
    pub fn opcode(&self) -> Opcode {
        match *self {
            InstructionLine::Arith { op, .. } => Opcode::Arith(op),
            InstructionLine::Move { .. } => Opcode::Move,
            InstructionLine::Load { .. } => Opcode::Load,
            InstructionLine::Store { .. } => Opcode::Store,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.opcode().kind()
    }

    /// Operands in the order they appear in the rendered text.
    pub fn operands(&self) -> Vec<Operand> {
        match *self {
            InstructionLine::Arith { lhs, rhs, dst, .. } => vec![
                Operand::Register(lhs),
                Operand::Register(rhs),
                Operand::Register(dst),
            ],
            InstructionLine::Move { src, dst } => {
                vec![Operand::Register(src), Operand::Register(dst)]
            }
            InstructionLine::Load { addr, dst } => {
                vec![Operand::Address(addr), Operand::Register(dst)]
            }
            InstructionLine::Store { src, addr } => {
                vec![Operand::Register(src), Operand::Address(addr)]
            }
        }
    }
}

impl fmt::Display for InstructionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionLine::Arith { op, lhs, rhs, dst } => {
                write!(f, "{} {} with {} to {}", op.mnemonic(), lhs, rhs, dst)
            }
            InstructionLine::Move { src, dst } => write!(f, "move {} to {}", src, dst),
            InstructionLine::Load { addr, dst } => write!(f, "load {} to {}", addr, dst),
            InstructionLine::Store { src, addr } => write!(f, "store {} to {}", src, addr),
        }
    }
}

// ── Parsing (grammar check) ──────────────────────────────────────────────────

/// Reasons a line fails to match any of the four templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLineError {
    #[error("empty line")]
    Empty,
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("`{mnemonic}` expects the shape `{template}`")]
    Shape {
        mnemonic: String,
        template: &'static str,
    },
    #[error("`{0}` is not a register (expected r0..r9)")]
    BadRegister(String),
    #[error("`{0}` is not a memory operand (expected m<0>..m<{max}>)", max = ADDRESS_MAX)]
    BadAddress(String),
    #[error("line is not in canonical single-space form")]
    NonCanonical,
}

fn parse_register(tok: &str) -> Result<Register, ParseLineError> {
    let bad = || ParseLineError::BadRegister(tok.to_owned());
    let digits = tok.strip_prefix('r').ok_or_else(bad)?;
    if digits.len() != 1 {
        return Err(bad());
    }
    let index = digits.parse::<usize>().map_err(|_| bad())?;
    Register::new(index).ok_or_else(bad)
}

fn parse_address(tok: &str) -> Result<Address, ParseLineError> {
    let bad = || ParseLineError::BadAddress(tok.to_owned());
    let digits = tok
        .strip_prefix("m<")
        .and_then(|rest| rest.strip_suffix('>'))
        .ok_or_else(bad)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let value = digits.parse::<u32>().map_err(|_| bad())?;
    Address::new(value).ok_or_else(bad)
}

impl FromStr for InstructionLine {
    type Err = ParseLineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let toks: Vec<&str> = line.split_whitespace().collect();
        let (&mnemonic, rest) = toks.split_first().ok_or(ParseLineError::Empty)?;

        let shape = |kind: OperationKind| ParseLineError::Shape {
            mnemonic: mnemonic.to_owned(),
            template: kind.template(),
        };

        let parsed = match mnemonic {
            "move" => match rest {
                [src, "to", dst] => InstructionLine::Move {
                    src: parse_register(src)?,
                    dst: parse_register(dst)?,
                },
                _ => return Err(shape(OperationKind::Move)),
            },
            "load" => match rest {
                [addr, "to", dst] => InstructionLine::Load {
                    addr: parse_address(addr)?,
                    dst: parse_register(dst)?,
                },
                _ => return Err(shape(OperationKind::Load)),
            },
            "store" => match rest {
                [src, "to", addr] => InstructionLine::Store {
                    src: parse_register(src)?,
                    addr: parse_address(addr)?,
                },
                _ => return Err(shape(OperationKind::Store)),
            },
            other => {
                let op = ArithOp::from_mnemonic(other)
                    .ok_or_else(|| ParseLineError::UnknownMnemonic(other.to_owned()))?;
                match rest {
                    [lhs, "with", rhs, "to", dst] => InstructionLine::Arith {
                        op,
                        lhs: parse_register(lhs)?,
                        rhs: parse_register(rhs)?,
                        dst: parse_register(dst)?,
                    },
                    _ => return Err(shape(OperationKind::BinaryArithmetic)),
                }
            }
        };

        // Tokenising forgives stray whitespace; the corpus format does not.
        if parsed.to_string() != line {
            return Err(ParseLineError::NonCanonical);
        }
        Ok(parsed)
    }
}
