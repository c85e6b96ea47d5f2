//! # solveropts
//! The settings a view-factor test case hands to the solver: how
//! self-intersecting rays are treated, which integration method is used,
//! and the floating point precision of the run.
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use serde::de::{self, Visitor, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum OptError {
    #[fail(display = "Unknown {} <{}>", _0, _1)]
    Unknown(&'static str, String),
}

/// Which surfaces are checked for rays that hit their own mesh
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SelfIntersection {
    None,
    Both,
    Emitter,
    Receiver,
}

/// Numeric integration scheme
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NumericMethod {
    /// Double area integration
    Dai,
    /// Single area integration
    Sai,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Precision {
    Single,
    Double,
}

impl SelfIntersection {
    fn as_str(&self) -> &'static str {
        use self::SelfIntersection::*;

        match self {
            None => "NONE",
            Both => "BOTH",
            Emitter => "EMITTER",
            Receiver => "RECEIVER",
        }
    }
}

impl NumericMethod {
    fn as_str(&self) -> &'static str {
        match self {
            NumericMethod::Dai => "DAI",
            NumericMethod::Sai => "SAI",
        }
    }
}

impl Precision {
    fn as_str(&self) -> &'static str {
        match self {
            Precision::Single => "SINGLE",
            Precision::Double => "DOUBLE",
        }
    }
}

impl FromStr for SelfIntersection {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use self::SelfIntersection::*;

        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(None),
            "BOTH" => Ok(Both),
            "EMITTER" => Ok(Emitter),
            "RECEIVER" => Ok(Receiver),
            _ => Err(OptError::Unknown("self-intersection mode", s.to_string())),
        }
    }
}

impl FromStr for NumericMethod {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAI" => Ok(NumericMethod::Dai),
            "SAI" => Ok(NumericMethod::Sai),
            _ => Err(OptError::Unknown("numeric method", s.to_string())),
        }
    }
}

impl FromStr for Precision {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SINGLE" => Ok(Precision::Single),
            "DOUBLE" => Ok(Precision::Double),
            _ => Err(OptError::Unknown("precision", s.to_string())),
        }
    }
}

impl fmt::Display for SelfIntersection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for NumericMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The solver settings a test case carries. The defaults match what the
/// solver uses when a test case doesn't say otherwise.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SolverOptions {
    pub self_intersection: SelfIntersection,
    pub method: NumericMethod,
    pub precision: Precision,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            self_intersection: SelfIntersection::Both,
            method: NumericMethod::Dai,
            precision: Precision::Double,
        }
    }
}

impl SolverOptions {
    pub fn from_strs(selfint: &str, method: &str, precision: &str) -> Result<Self, OptError> {
        Ok(SolverOptions {
            self_intersection: selfint.parse()?,
            method: method.parse()?,
            precision: precision.parse()?,
        })
    }
}

/* All three settings (de)serialize as their canonical token */
struct TokenVisitor<T>(&'static str, PhantomData<T>);

impl<'de, T> Visitor<'de> for TokenVisitor<T>
where T: FromStr<Err = OptError>
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a {} token", self.0)
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where E: de::Error
    {
        T::from_str(s)
            .map_err( |e| E::custom(format!("{}",e)) )
    }
}

impl Serialize for SelfIntersection {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where S: Serializer
    {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SelfIntersection {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {
        d.deserialize_str(TokenVisitor("self-intersection mode", PhantomData))
    }
}

impl Serialize for NumericMethod {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where S: Serializer
    {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NumericMethod {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {
        d.deserialize_str(TokenVisitor("numeric method", PhantomData))
    }
}

impl Serialize for Precision {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where S: Serializer
    {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {
        d.deserialize_str(TokenVisitor("precision", PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, StrDeserializer};

    fn de_str<'de, T: Deserialize<'de>>(s: &'de str) -> Result<T, ValueError> {
        let d: StrDeserializer<ValueError> = s.into_deserializer();
        T::deserialize(d)
    }

    #[test]
    fn parse_any_case() {
        assert_eq!("both".parse::<SelfIntersection>(), Ok(SelfIntersection::Both));
        assert_eq!("Receiver".parse::<SelfIntersection>(), Ok(SelfIntersection::Receiver));
        assert_eq!("NONE".parse::<SelfIntersection>(), Ok(SelfIntersection::None));
        assert_eq!("sai".parse::<NumericMethod>(), Ok(NumericMethod::Sai));
        assert_eq!("DAI".parse::<NumericMethod>(), Ok(NumericMethod::Dai));
        assert_eq!("Single".parse::<Precision>(), Ok(Precision::Single));
        assert_eq!(" DOUBLE\n".parse::<Precision>(), Ok(Precision::Double));
    }

    #[test]
    fn unknown_tokens() {
        assert_eq!(
            "MONTECARLO".parse::<NumericMethod>(),
            Err(OptError::Unknown("numeric method", "MONTECARLO".to_string()))
        );
        assert!("half".parse::<Precision>().is_err());
        assert!("".parse::<SelfIntersection>().is_err());
        assert!("OFF".parse::<SelfIntersection>().is_err());
        assert!("float".parse::<Precision>().is_err());
    }

    #[test]
    fn display_round_trips() {
        use self::SelfIntersection::*;

        for &si in [None, Both, Emitter, Receiver].iter() {
            assert_eq!(si.to_string().parse::<SelfIntersection>(), Ok(si));
        }
        assert_eq!(NumericMethod::Sai.to_string(), "SAI");
        assert_eq!(Precision::Single.to_string(), "SINGLE");
    }

    #[test]
    fn defaults() {
        let opts = SolverOptions::default();
        assert_eq!(opts.self_intersection, SelfIntersection::Both);
        assert_eq!(opts.method, NumericMethod::Dai);
        assert_eq!(opts.precision, Precision::Double);
    }

    #[test]
    fn from_setting_strings() {
        let opts = SolverOptions::from_strs("emitter", "SAI", "single").unwrap();
        assert_eq!(opts, SolverOptions {
            self_intersection: SelfIntersection::Emitter,
            method: NumericMethod::Sai,
            precision: Precision::Single,
        });

        let bad = SolverOptions::from_strs("BOTH", "DAI", "quad");
        assert_eq!(bad, Err(OptError::Unknown("precision", "quad".to_string())));
    }

    #[test]
    fn deserialize_tokens() {
        assert_eq!(de_str::<Precision>("double").unwrap(), Precision::Double);
        assert_eq!(de_str::<NumericMethod>("dai").unwrap(), NumericMethod::Dai);
        assert_eq!(de_str::<SelfIntersection>("none").unwrap(), SelfIntersection::None);

        let e = de_str::<Precision>("quad").unwrap_err();
        assert!(e.to_string().contains("Unknown precision <quad>"), "{}", e);
    }
}
