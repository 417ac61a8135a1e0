//! Curriculum terms: identity, display name and per-standard attributes
//!
//! A [`Term`] is the payload of one tree node. Navigation state lives in the
//! [`TermArena`](super::arena::TermArena); the term itself only knows what it is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::lang::LangString;

pub const ROOT_TYPE: &str = "root";
pub const ROOT_ID: &str = "root";

/// Curriculum standards known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standard {
    Educa,
    Lp21,
    Per,
    ClassificationSystem,
}

impl Standard {
    /// Name used on the wire (taxonomy sources, mapping targets).
    pub fn name(&self) -> &'static str {
        match self {
            Standard::Educa => "educa",
            Standard::Lp21 => "lp21",
            Standard::Per => "per",
            Standard::ClassificationSystem => "classification system",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Standard {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "educa" => Ok(Standard::Educa),
            "lp21" => Ok(Standard::Lp21),
            "per" => Ok(Standard::Per),
            "classification system" | "classification_system" => {
                Ok(Standard::ClassificationSystem)
            }
            other => Err(DomainError::InvalidContext(other.to_string())),
        }
    }
}

/// Identity snapshot of a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermDescription {
    #[serde(rename = "type")]
    pub term_type: String,
    pub id: String,
}

// ============================================================
// Attribute groups
// ============================================================

pub trait HasCode {
    fn code(&self) -> Option<&str>;
    fn set_code(&mut self, code: Option<String>);
}

pub trait HasUrl {
    fn url(&self) -> Option<&str>;
    fn set_url(&mut self, url: Option<String>);
}

pub trait HasVersion {
    fn version(&self) -> Option<&str>;
    fn set_version(&mut self, version: Option<String>);
}

pub trait HasCycles {
    fn cycles(&self) -> &[u8];
    fn set_cycles(&mut self, cycles: Vec<u8>);
}

pub trait HasCantons {
    fn cantons(&self) -> &[String];
    fn set_cantons(&mut self, cantons: Vec<String>);
}

pub trait HasSchoolYears {
    fn school_years(&self) -> &[String];
    fn set_school_years(&mut self, school_years: Vec<String>);
}

pub trait HasContext {
    fn context(&self) -> Option<&str>;
    fn set_context(&mut self, context: Option<String>);
}

/// Context tag carried by educa and classification-system terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextAttributes {
    pub context: Option<String>,
}

/// Lehrplan 21 attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lp21Attributes {
    pub code: Option<String>,
    pub url: Option<String>,
    pub version: Option<String>,
    pub cycles: Vec<u8>,
    pub school_years: Vec<String>,
}

/// Plan d'études romand attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerAttributes {
    pub code: Option<String>,
    pub url: Option<String>,
    pub cycles: Vec<u8>,
    pub cantons: Vec<String>,
    pub school_years: Vec<String>,
}

impl HasContext for ContextAttributes {
    fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn set_context(&mut self, context: Option<String>) {
        self.context = context;
    }
}

macro_rules! impl_optional_string {
    ($trait:ident, $ty:ty, $field:ident, $setter:ident) => {
        impl $trait for $ty {
            fn $field(&self) -> Option<&str> {
                self.$field.as_deref()
            }

            fn $setter(&mut self, value: Option<String>) {
                self.$field = value;
            }
        }
    };
}

macro_rules! impl_list {
    ($trait:ident, $ty:ty, $field:ident, $setter:ident, $item:ty) => {
        impl $trait for $ty {
            fn $field(&self) -> &[$item] {
                &self.$field
            }

            fn $setter(&mut self, value: Vec<$item>) {
                self.$field = value;
            }
        }
    };
}

impl_optional_string!(HasCode, Lp21Attributes, code, set_code);
impl_optional_string!(HasUrl, Lp21Attributes, url, set_url);
impl_optional_string!(HasVersion, Lp21Attributes, version, set_version);
impl_list!(HasCycles, Lp21Attributes, cycles, set_cycles, u8);
impl_list!(HasSchoolYears, Lp21Attributes, school_years, set_school_years, String);

impl_optional_string!(HasCode, PerAttributes, code, set_code);
impl_optional_string!(HasUrl, PerAttributes, url, set_url);
impl_list!(HasCycles, PerAttributes, cycles, set_cycles, u8);
impl_list!(HasCantons, PerAttributes, cantons, set_cantons, String);
impl_list!(HasSchoolYears, PerAttributes, school_years, set_school_years, String);

/// Standard-specific attribute record of a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandardAttributes {
    Educa(ContextAttributes),
    ClassificationSystem(ContextAttributes),
    Lp21(Lp21Attributes),
    Per(PerAttributes),
}

impl StandardAttributes {
    pub fn empty(standard: Standard) -> Self {
        match standard {
            Standard::Educa => Self::Educa(ContextAttributes::default()),
            Standard::ClassificationSystem => {
                Self::ClassificationSystem(ContextAttributes::default())
            }
            Standard::Lp21 => Self::Lp21(Lp21Attributes::default()),
            Standard::Per => Self::Per(PerAttributes::default()),
        }
    }

    pub fn standard(&self) -> Standard {
        match self {
            Self::Educa(_) => Standard::Educa,
            Self::ClassificationSystem(_) => Standard::ClassificationSystem,
            Self::Lp21(_) => Standard::Lp21,
            Self::Per(_) => Standard::Per,
        }
    }
}

// ============================================================
// Term
// ============================================================

/// A node payload in a curriculum tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    term_type: String,
    id: String,
    name: Option<LangString>,
    attributes: StandardAttributes,
}

impl Term {
    pub fn new(
        standard: Standard,
        term_type: impl Into<String>,
        id: impl Into<String>,
        name: Option<LangString>,
    ) -> Self {
        Self {
            term_type: term_type.into(),
            id: id.into(),
            name,
            attributes: StandardAttributes::empty(standard),
        }
    }

    /// The `root:root` term every curriculum tree starts from.
    pub fn root(standard: Standard) -> Self {
        Self::new(standard, ROOT_TYPE, ROOT_ID, None)
    }

    pub fn with_attributes(mut self, attributes: StandardAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn describe(&self) -> TermDescription {
        TermDescription {
            term_type: self.term_type.clone(),
            id: self.id.clone(),
        }
    }

    pub fn term_type(&self) -> &str {
        &self.term_type
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&LangString> {
        self.name.as_ref()
    }

    pub fn standard(&self) -> Standard {
        self.attributes.standard()
    }

    pub fn attributes(&self) -> &StandardAttributes {
        &self.attributes
    }

    pub fn lp21(&self) -> Option<&Lp21Attributes> {
        match &self.attributes {
            StandardAttributes::Lp21(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn lp21_mut(&mut self) -> Option<&mut Lp21Attributes> {
        match &mut self.attributes {
            StandardAttributes::Lp21(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn per(&self) -> Option<&PerAttributes> {
        match &self.attributes {
            StandardAttributes::Per(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn per_mut(&mut self) -> Option<&mut PerAttributes> {
        match &mut self.attributes {
            StandardAttributes::Per(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Context tag holder, for standards that carry one.
    pub fn context_attributes(&self) -> Option<&ContextAttributes> {
        match &self.attributes {
            StandardAttributes::Educa(attrs) | StandardAttributes::ClassificationSystem(attrs) => {
                Some(attrs)
            }
            _ => None,
        }
    }

    pub fn context_attributes_mut(&mut self) -> Option<&mut ContextAttributes> {
        match &mut self.attributes {
            StandardAttributes::Educa(attrs) | StandardAttributes::ClassificationSystem(attrs) => {
                Some(attrs)
            }
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&str> {
        self.context_attributes().and_then(HasContext::context)
    }

    /// True if any language variant of the name equals `name`.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name
            .as_ref()
            .is_some_and(|n| n.contains_value(name))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.term_type, self.id)
    }
}
