//! Sea-ORM entities for the portfolio tables.

pub mod projects;
pub mod tag_project;
pub mod tags;
pub mod title_project;
pub mod titles;
pub mod user_profiles;
