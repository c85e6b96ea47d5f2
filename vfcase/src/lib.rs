//! # vfcase
//! Reading view-factor test case descriptions (XML) into a `TestCase`
//! and checking solver output against the targets it carries
mod case;
mod section;

pub use crate::case::{parse, parse_str};
pub use crate::case::TestCase as TestCase;
pub use crate::case::Targets as Targets;
pub use crate::case::Surfaces as Surfaces;
pub use crate::case::Settings as Settings;
pub use crate::case::CaseError as CaseError;
pub use solveropts::{SolverOptions, OptError};
pub use test_utils::ToleranceError;
