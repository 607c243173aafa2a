use crate::structs::issue::Issue;

/// Hook applied to every issue at the end of a scan, before storage.
/// Implementations can attach classification metadata via `enrichment`
/// or adjust fields; the default leaves issues untouched.
pub trait IssueEnricher: Send + Sync {
    fn enrich(&self, issue: Issue) -> Issue;
}

pub struct PassthroughEnricher;

impl IssueEnricher for PassthroughEnricher {
    fn enrich(&self, issue: Issue) -> Issue {
        issue
    }
}
