use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::schema::{param, Application, Construct, ParamSpec, Shape, TypeTag};

/// Deterministic functions: substitution-model builders and symbolic math.
///
/// Math words have a symbol alias (`+`, `-`, `*`, `/`). Nothing is computed;
/// the application is exported as a function node for the consuming tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum FunctionKind {
    #[strum(to_string = "hky")]
    Hky,
    #[strum(to_string = "jc69")]
    Jc69,
    #[strum(to_string = "k80")]
    K80,
    #[strum(to_string = "f81")]
    F81,
    #[strum(to_string = "gtr")]
    Gtr,
    #[strum(to_string = "add", serialize = "+")]
    Add,
    #[strum(to_string = "sub", serialize = "-")]
    Subtract,
    #[strum(to_string = "mul", serialize = "*")]
    Multiply,
    #[strum(to_string = "div", serialize = "/")]
    Divide,
    #[strum(to_string = "exp")]
    Exp,
    #[strum(to_string = "log")]
    Log,
}

pub type FunctionApplication = Application<FunctionKind>;

const HKY: &[ParamSpec] = &[
    param("kappa", Shape::Real),
    param("frequencies", Shape::RealVector),
];
const JC69: &[ParamSpec] = &[];
const K80: &[ParamSpec] = &[param("kappa", Shape::Real)];
const F81: &[ParamSpec] = &[param("frequencies", Shape::RealVector)];
const GTR: &[ParamSpec] = &[
    param("rates", Shape::RealVector),
    param("frequencies", Shape::RealVector),
];
const BINARY: &[ParamSpec] = &[param("left", Shape::Real), param("right", Shape::Real)];
const UNARY: &[ParamSpec] = &[param("x", Shape::Real)];

impl FunctionKind {
    pub fn output(&self) -> TypeTag {
        if self.is_math() {
            TypeTag::Real
        } else {
            TypeTag::QMatrix
        }
    }

    pub fn is_math(&self) -> bool {
        matches!(
            self,
            FunctionKind::Add
                | FunctionKind::Subtract
                | FunctionKind::Multiply
                | FunctionKind::Divide
                | FunctionKind::Exp
                | FunctionKind::Log
        )
    }
}

impl Construct for FunctionKind {
    fn name(&self) -> &'static str {
        match self {
            FunctionKind::Hky => "HKY",
            FunctionKind::Jc69 => "JC69",
            FunctionKind::K80 => "K80",
            FunctionKind::F81 => "F81",
            FunctionKind::Gtr => "GTR",
            FunctionKind::Add => "add",
            FunctionKind::Subtract => "subtract",
            FunctionKind::Multiply => "multiply",
            FunctionKind::Divide => "divide",
            FunctionKind::Exp => "exp",
            FunctionKind::Log => "log",
        }
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            FunctionKind::Hky => HKY,
            FunctionKind::Jc69 => JC69,
            FunctionKind::K80 => K80,
            FunctionKind::F81 => F81,
            FunctionKind::Gtr => GTR,
            FunctionKind::Add
            | FunctionKind::Subtract
            | FunctionKind::Multiply
            | FunctionKind::Divide => BINARY,
            FunctionKind::Exp | FunctionKind::Log => UNARY,
        }
    }
}

impl Application<FunctionKind> {
    pub fn output(&self) -> TypeTag {
        self.kind.output()
    }
}
