//! Participant selection for utterance-level queries.

use crate::error::ReaderError;

/// Which speakers a query looks at.
///
/// `Only` and `Except` cannot be combined; a filter built from both an
/// include list and an exclude list is rejected by [`ParticipantFilter::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParticipantFilter {
    /// Every speaker of each file.
    #[default]
    All,
    /// Only these speaker codes.
    Only(Vec<String>),
    /// Every speaker except these codes.
    Except(Vec<String>),
}

impl ParticipantFilter {
    /// Build a filter from optional include and exclude lists, as given on a
    /// command line. Empty lists count as absent.
    pub fn new(
        include: Option<Vec<String>>,
        exclude: Option<Vec<String>>,
    ) -> Result<Self, ReaderError> {
        let include = include.filter(|codes| !codes.is_empty());
        let exclude = exclude.filter(|codes| !codes.is_empty());
        match (include, exclude) {
            (Some(_), Some(_)) => Err(ReaderError::ConflictingParticipants),
            (Some(codes), None) => Ok(ParticipantFilter::Only(codes)),
            (None, Some(codes)) => Ok(ParticipantFilter::Except(codes)),
            (None, None) => Ok(ParticipantFilter::All),
        }
    }

    pub fn only<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParticipantFilter::Only(codes.into_iter().map(Into::into).collect())
    }

    pub fn except<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParticipantFilter::Except(codes.into_iter().map(Into::into).collect())
    }

    pub fn accepts(&self, code: &str) -> bool {
        match self {
            ParticipantFilter::All => true,
            ParticipantFilter::Only(codes) => codes.iter().any(|c| c == code),
            ParticipantFilter::Except(codes) => !codes.iter().any(|c| c == code),
        }
    }
}

/// A single speaker code.
impl From<&str> for ParticipantFilter {
    fn from(code: &str) -> Self {
        ParticipantFilter::Only(vec![code.to_string()])
    }
}
