pub mod audit;
pub mod invites;
pub mod profiles;
pub mod projects;
