//! Repositories over the entity stores.
//!
//! Each repository is a zero-sized struct whose associated functions take
//! the [`Database`](crate::Database) handle explicitly.

mod lock_repo;
mod poll_repo;
mod request_repo;
mod unlock_repo;
mod user_repo;

pub use lock_repo::LockRepo;
pub use poll_repo::PollRepo;
pub use request_repo::RequestRepo;
pub use unlock_repo::UnlockRepo;
pub use user_repo::UserRepo;
