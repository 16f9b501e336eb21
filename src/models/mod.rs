mod audit_log;
mod invite;
mod profile;
mod project;

pub use audit_log::AuditLogEntry;
pub use invite::{InviteStatus, ProjectInvite};
pub use profile::Profile;
pub use project::Project;
