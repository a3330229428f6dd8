use std::sync::Arc;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 500;

/// Listing filter for the administrative rule view.
///
/// `subject` is a substring match on the pattern; when both fields are set the
/// subject filter wins, same as the old special page did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleListFilter {
    pub creator: Option<Arc<str>>,
    pub subject: Option<Arc<str>>,
}

impl RuleListFilter {
    pub fn new(creator: Option<&str>, subject: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Arc::from)
        };
        Self {
            creator: clean(creator),
            subject: clean(subject),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        let limit = match limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(l) => l.min(MAX_LIMIT),
        };
        Self {
            limit,
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
