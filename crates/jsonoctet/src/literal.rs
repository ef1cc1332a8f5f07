use crate::ParseError;

/// One of the three JSON constants.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[cfg_attr(any(test, feature = "serde"), serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    /// `null`
    Null,
    /// `true`
    True,
    /// `false`
    False,
}

impl Literal {
    /// The literal exactly as it appears in JSON text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
        }
    }

    /// The boolean value, if this is `true` or `false`.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Null => None,
            Self::True => Some(true),
            Self::False => Some(false),
        }
    }
}

impl core::fmt::Display for Literal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

const LONGEST: usize = 5;

/// Collects the lowercase letters of a bare word.
///
/// The word is only compared against the known literals once it has ended,
/// so `nul` and `nulll` both fail the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ConstantBuffer {
    bytes: [u8; LONGEST],
    len: u8,
}

impl ConstantBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            bytes: [0; LONGEST],
            len: 0,
        }
    }

    /// Appends a letter. No literal is longer than five letters, so a sixth
    /// fails straight away.
    pub(crate) fn push(&mut self, octet: u8) -> Result<(), ParseError> {
        let slot = self
            .bytes
            .get_mut(usize::from(self.len))
            .ok_or(ParseError::BadConstant)?;
        *slot = octet;
        self.len += 1;
        Ok(())
    }

    pub(crate) fn resolve(&self) -> Option<Literal> {
        match &self.bytes[..usize::from(self.len)] {
            b"null" => Some(Literal::Null),
            b"true" => Some(Literal::True),
            b"false" => Some(Literal::False),
            _ => None,
        }
    }
}
