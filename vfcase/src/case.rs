use std::num::ParseFloatError;
use std::path::{Path, PathBuf};
use failure::Fail;
use log::{debug, trace};
use roxmltree::{Document, ParsingOptions};
use solveropts::{OptError, SolverOptions};
use test_utils::{validate_near, ToleranceError};
use crate::section::Section;

const DESCRIPTION: &str = "TEST-DESCRIPTION";
const TARGETS: &str = "TARGETS";
const MESHES: &str = "MESHES";
const SETTINGS: &str = "SETTINGS";

#[derive(Debug, Fail)]
/// Ways a test case description can fail to match the expected layout
pub enum CaseError {
    #[fail(display = "couldn't read test case as XML")]
    Xml(#[cause] roxmltree::Error),
    #[fail(display = "test case has no <{}> section", _0)]
    MissingSection(&'static str),
    #[fail(display = "<{}> has {} child element(s); needs at least {}", section, found, needed)]
    ShortSection { section: &'static str, found: usize, needed: usize },
    #[fail(display = "{} in <{}> has no text", field, section)]
    NoText { section: &'static str, field: &'static str },
    #[fail(display = "{} in <{}> is not a number: <{}>", field, section, text)]
    NotNumeric {
        section: &'static str,
        field: &'static str,
        text: String,
        #[cause] cause: ParseFloatError,
    },
}

impl From<roxmltree::Error> for CaseError {
    fn from(e: roxmltree::Error) -> Self {
        CaseError::Xml(e)
    }
}

/// Reference values for a test case. `tolerance` is a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct Targets {
    pub analytic: f64,
    pub expected: f64,
    pub tolerance: f64,
}

/// The pair of meshes the view factor is computed between
#[derive(Debug, Clone, PartialEq)]
pub struct Surfaces {
    pub emitter: String,
    pub receiver: String,
}

/// Solver settings exactly as written in the test case
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub self_intersection: String,
    pub method: String,
    pub precision: String,
}

impl Settings {
    /// Interpret the raw settings strings
    pub fn options(&self) -> Result<SolverOptions, OptError> {
        SolverOptions::from_strs(&self.self_intersection, &self.method, &self.precision)
    }
}

/// A parsed view-factor test case
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Caller supplied test name, carried along as given
    pub name: String,
    /// Caller supplied directory for test outputs, carried along as given
    pub outputs_dir: PathBuf,
    /// Configuration label from the test description
    pub config: String,
    pub targets: Targets,
    pub surfaces: Surfaces,
    pub settings: Settings,
    /// Meshes that may occlude the emitter/receiver pair, in document order
    pub blockers: Vec<String>,
}

impl TestCase {
    /// The numeric, surface, and settings groups together
    pub fn data(&self) -> (&Targets, &Surfaces, &Settings) {
        (&self.targets, &self.surfaces, &self.settings)
    }

    /// Is a solver `result` within the case's tolerance of its expected value
    pub fn check(&self, result: f64) -> Result<bool, ToleranceError> {
        let Targets { expected, tolerance, .. } = self.targets;
        let near = validate_near(result, expected, tolerance)?;
        debug!("{}: {} vs expected {} (±{}%) -> {}", self.name, result, expected, tolerance,
            if near {"pass"} else {"fail"});

        Ok(near)
    }

    /// Is a solver `result` within the case's tolerance of the analytic value
    pub fn check_analytic(&self, result: f64) -> Result<bool, ToleranceError> {
        validate_near(result, self.targets.analytic, self.targets.tolerance)
    }
}

/// Read a test case out of an XML document. Each section is the first element
/// with its tag anywhere in the document, and its children are read in order.
/// `test_name` and `test_outputs_dir` are only stored on the result.
pub fn parse<P>(doc: &Document, test_name: &str, test_outputs_dir: P) -> Result<TestCase, CaseError>
where P: AsRef<Path>
{
    let description = Section::find(doc, DESCRIPTION, 1)?;
    let config = description.text(0, "configuration")?;

    let targets = Section::find(doc, TARGETS, 3)?;
    let targets = Targets {
        analytic: targets.number(0, "analytic value")?,
        expected: targets.number(1, "expected value")?,
        tolerance: targets.number(2, "tolerance")?,
    };
    trace!("{:?}", &targets);

    let meshes = Section::find(doc, MESHES, 2)?;
    let surfaces = Surfaces {
        emitter: meshes.text(0, "emitter")?,
        receiver: meshes.text(1, "receiver")?,
    };
    let blockers = meshes.rest(2, "blocker")?;

    let settings = Section::find(doc, SETTINGS, 3)?;
    let settings = Settings {
        self_intersection: settings.text(0, "self-intersection")?,
        method: settings.text(1, "method")?,
        precision: settings.text(2, "precision")?,
    };

    debug!("parsed test case <{}>: {} -> {} with {} blocker(s)",
        test_name, &surfaces.emitter, &surfaces.receiver, blockers.len());

    Ok(TestCase {
        name: test_name.to_string(),
        outputs_dir: test_outputs_dir.as_ref().to_path_buf(),
        config,
        targets,
        surfaces,
        settings,
        blockers,
    })
}

/// Parse XML text and read the test case from it
pub fn parse_str<P>(xml: &str, test_name: &str, test_outputs_dir: P) -> Result<TestCase, CaseError>
where P: AsRef<Path>
{
    // DOCTYPE declarations are allowed but nothing is validated against them
    let opts = ParsingOptions { allow_dtd: true, ..ParsingOptions::default() };
    let doc = Document::parse_with_options(xml, opts)?;
    parse(&doc, test_name, test_outputs_dir)
}
