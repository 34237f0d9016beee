//! One module per subcommand.

pub mod add;
pub mod completions;
pub mod favorite;
pub mod list;
pub mod purge;
pub mod register;
pub mod restore;
pub mod show;
pub mod trash;
