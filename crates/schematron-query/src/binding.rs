use crate::error::{QueryError, Result};

/// The seven `queryBinding` names ISO Schematron recognizes. All compile
/// through the same XPath 3.1 grammar (see `xee-adapter`); this enum only
/// gates which *wrapper*-level features a binding exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryBinding {
    Xslt,
    Xslt2,
    Xslt3,
    Xpath1,
    Xpath2,
    Xpath3,
    Xpath31,
}

impl QueryBinding {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "xslt" => Ok(Self::Xslt),
            "xslt2" => Ok(Self::Xslt2),
            "xslt3" => Ok(Self::Xslt3),
            "xpath" => Ok(Self::Xpath1),
            "xpath2" => Ok(Self::Xpath2),
            "xpath3" => Ok(Self::Xpath3),
            "xpath31" => Ok(Self::Xpath31),
            other => Err(QueryError::UnknownBinding(other.to_string())),
        }
    }

    /// `xpath` (1.0) is the only binding that rejects custom functions and
    /// expressions outside the XPath 1.0 core function library.
    pub fn allows_custom_functions(self) -> bool {
        !matches!(self, Self::Xpath1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Xslt => "xslt",
            Self::Xslt2 => "xslt2",
            Self::Xslt3 => "xslt3",
            Self::Xpath1 => "xpath",
            Self::Xpath2 => "xpath2",
            Self::Xpath3 => "xpath3",
            Self::Xpath31 => "xpath31",
        }
    }
}

impl Default for QueryBinding {
    fn default() -> Self {
        Self::Xslt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xpath1_rejects_custom_functions() {
        assert!(!QueryBinding::Xpath1.allows_custom_functions());
        assert!(QueryBinding::Xpath31.allows_custom_functions());
    }

    #[test]
    fn unknown_binding_errors() {
        assert!(QueryBinding::parse("xquery").is_err());
    }
}
