use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::schema::{param, Application, Construct, ParamSpec, Shape};

/// Constraints restricting the joint support of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum ConstraintKind {
    #[strum(to_string = "lessthan", serialize = "<")]
    LessThan,
    #[strum(to_string = "greaterthan", serialize = ">")]
    GreaterThan,
    #[strum(to_string = "equals", serialize = "==")]
    Equals,
    #[strum(to_string = "bounded")]
    Bounded,
    #[strum(to_string = "sumto")]
    SumTo,
}

pub type ConstraintApplication = Application<ConstraintKind>;

const COMPARISON: &[ParamSpec] = &[param("left", Shape::Real), param("right", Shape::Real)];
const BOUNDED: &[ParamSpec] = &[
    param("variable", Shape::Real),
    param("lower", Shape::Real),
    param("upper", Shape::Real),
];
const SUM_TO: &[ParamSpec] = &[
    param("variable", Shape::RealVector),
    param("target", Shape::Real),
];

impl Construct for ConstraintKind {
    fn name(&self) -> &'static str {
        match self {
            ConstraintKind::LessThan => "lessThan",
            ConstraintKind::GreaterThan => "greaterThan",
            ConstraintKind::Equals => "equals",
            ConstraintKind::Bounded => "bounded",
            ConstraintKind::SumTo => "sumTo",
        }
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            ConstraintKind::LessThan | ConstraintKind::GreaterThan | ConstraintKind::Equals => {
                COMPARISON
            }
            ConstraintKind::Bounded => BOUNDED,
            ConstraintKind::SumTo => SUM_TO,
        }
    }
}
