mod create;
mod delete;
mod list;
mod posts;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use posts::posts;
pub use update::update;
