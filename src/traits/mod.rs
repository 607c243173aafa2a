pub mod issue_enricher;
