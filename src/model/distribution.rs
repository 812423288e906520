use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::schema::{param, Application, Construct, ParamSpec, Shape, TypeTag};

/// Probability distributions a random variable can be drawn from.
///
/// The lowercase variant name is the source word (`lognormal`, `phyloctmc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DistributionKind {
    Normal,
    LogNormal,
    Gamma,
    Beta,
    Exponential,
    Uniform,
    Dirichlet,
    Yule,
    BirthDeath,
    Coalescent,
    PhyloCtmc,
}

pub type DistributionApplication = Application<DistributionKind>;

const NORMAL: &[ParamSpec] = &[param("mean", Shape::Real), param("sd", Shape::Real)];
const LOG_NORMAL: &[ParamSpec] = &[param("meanlog", Shape::Real), param("sdlog", Shape::Real)];
const GAMMA: &[ParamSpec] = &[param("shape", Shape::Real), param("rate", Shape::Real)];
const BETA: &[ParamSpec] = &[param("alpha", Shape::Real), param("beta", Shape::Real)];
const EXPONENTIAL: &[ParamSpec] = &[param("rate", Shape::Real)];
const UNIFORM: &[ParamSpec] = &[param("lower", Shape::Real), param("upper", Shape::Real)];
const DIRICHLET: &[ParamSpec] = &[param("alpha", Shape::RealVector)];
const YULE: &[ParamSpec] = &[param("birthRate", Shape::Real)];
const BIRTH_DEATH: &[ParamSpec] = &[
    param("birthRate", Shape::Real),
    param("deathRate", Shape::Real),
];
const COALESCENT: &[ParamSpec] = &[param("populationSize", Shape::Real)];
const PHYLO_CTMC: &[ParamSpec] = &[param("tree", Shape::Tree), param("Q", Shape::QMatrix)];

impl DistributionKind {
    pub fn generates(&self) -> TypeTag {
        match self {
            DistributionKind::Normal
            | DistributionKind::LogNormal
            | DistributionKind::Gamma
            | DistributionKind::Beta
            | DistributionKind::Exponential
            | DistributionKind::Uniform => TypeTag::Real,
            DistributionKind::Dirichlet => TypeTag::RealVector,
            DistributionKind::Yule | DistributionKind::BirthDeath | DistributionKind::Coalescent => {
                TypeTag::Tree
            }
            DistributionKind::PhyloCtmc => TypeTag::Alignment,
        }
    }
}

impl Construct for DistributionKind {
    fn name(&self) -> &'static str {
        match self {
            DistributionKind::Normal => "Normal",
            DistributionKind::LogNormal => "LogNormal",
            DistributionKind::Gamma => "Gamma",
            DistributionKind::Beta => "Beta",
            DistributionKind::Exponential => "Exponential",
            DistributionKind::Uniform => "Uniform",
            DistributionKind::Dirichlet => "Dirichlet",
            DistributionKind::Yule => "Yule",
            DistributionKind::BirthDeath => "BirthDeath",
            DistributionKind::Coalescent => "Coalescent",
            DistributionKind::PhyloCtmc => "PhyloCTMC",
        }
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            DistributionKind::Normal => NORMAL,
            DistributionKind::LogNormal => LOG_NORMAL,
            DistributionKind::Gamma => GAMMA,
            DistributionKind::Beta => BETA,
            DistributionKind::Exponential => EXPONENTIAL,
            DistributionKind::Uniform => UNIFORM,
            DistributionKind::Dirichlet => DIRICHLET,
            DistributionKind::Yule => YULE,
            DistributionKind::BirthDeath => BIRTH_DEATH,
            DistributionKind::Coalescent => COALESCENT,
            DistributionKind::PhyloCtmc => PHYLO_CTMC,
        }
    }
}

impl Application<DistributionKind> {
    pub fn generates(&self) -> TypeTag {
        self.kind.generates()
    }
}
