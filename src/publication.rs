// The publications the topic model was fit on.
//
// Document identifiers in the artifact are prefixed with a publication key
// ("egind_1234"). The set is closed: the corpus covers exactly three English-
// language Egyptian outlets, and an unknown prefix means the artifact does
// not belong to this model.

use anyhow::Result;

/// One of the three publications in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Publication {
    EgyptIndependent,
    Ahram,
    DailyNewsEgypt,
}

impl Publication {
    /// All publications, in the order they appear in chart legends.
    pub const ALL: [Publication; 3] = [
        Publication::EgyptIndependent,
        Publication::Ahram,
        Publication::DailyNewsEgypt,
    ];

    /// The identifier prefix used in document ids.
    pub fn key(&self) -> &'static str {
        match self {
            Publication::EgyptIndependent => "egind",
            Publication::Ahram => "ahram",
            Publication::DailyNewsEgypt => "dne",
        }
    }

    /// Human-readable name for legends and terminal output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Publication::EgyptIndependent => "Egypt Independent",
            Publication::Ahram => "al-Ahram English",
            Publication::DailyNewsEgypt => "Daily News Egypt",
        }
    }

    /// Parse the publication from a document id of the form `<key>_<suffix>`.
    pub fn from_doc_id(doc_id: &str) -> Result<Self> {
        let Some((prefix, rest)) = doc_id.split_once('_') else {
            anyhow::bail!(
                "document id '{doc_id}' has no publication prefix \
                 (expected '<publication>_<id>')"
            );
        };
        if rest.is_empty() {
            anyhow::bail!("document id '{doc_id}' has an empty id after the prefix");
        }
        match prefix {
            "egind" => Ok(Publication::EgyptIndependent),
            "ahram" => Ok(Publication::Ahram),
            "dne" => Ok(Publication::DailyNewsEgypt),
            other => anyhow::bail!(
                "unknown publication prefix '{other}' in document id '{doc_id}' \
                 (expected one of: egind, ahram, dne)"
            ),
        }
    }
}
