use serde::Deserialize;
use std::fmt;

/// Count and limit of one usage counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageDetail {
    pub count: u64,
    pub limit: u64,
}

impl UsageDetail {
    pub fn limit_reached(&self) -> bool {
        self.count >= self.limit
    }
}

impl fmt::Display for UsageDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.count, self.limit)
    }
}

/// Account usage for the current billing period.
///
/// Each counter is present only when the account type reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub character: Option<UsageDetail>,
    pub document: Option<UsageDetail>,
    pub team_document: Option<UsageDetail>,
}

impl Usage {
    pub fn any_limit_reached(&self) -> bool {
        [self.character, self.document, self.team_document]
            .iter()
            .flatten()
            .any(UsageDetail::limit_reached)
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Usage this billing period:")?;
        for (label, detail) in [
            ("Characters", self.character),
            ("Documents", self.document),
            ("Team documents", self.team_document),
        ] {
            if let Some(d) = detail {
                write!(f, "\n{}: {}", label, d)?;
            }
        }
        Ok(())
    }
}

/// Flat wire shape: `character_count`, `character_limit`, `document_count`, ...
#[derive(Debug, Deserialize)]
pub(crate) struct UsageResponse {
    character_count: Option<u64>,
    character_limit: Option<u64>,
    document_count: Option<u64>,
    document_limit: Option<u64>,
    team_document_count: Option<u64>,
    team_document_limit: Option<u64>,
}

fn detail(count: Option<u64>, limit: Option<u64>) -> Option<UsageDetail> {
    Some(UsageDetail {
        count: count?,
        limit: limit?,
    })
}

impl From<UsageResponse> for Usage {
    fn from(r: UsageResponse) -> Self {
        Usage {
            character: detail(r.character_count, r.character_limit),
            document: detail(r.document_count, r.document_limit),
            team_document: detail(r.team_document_count, r.team_document_limit),
        }
    }
}
