pub mod backend_kind;
pub mod commands;
pub mod fix_outcome;
pub mod severity;
pub mod vuln_category;
