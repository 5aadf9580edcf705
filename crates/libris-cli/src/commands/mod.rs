pub mod books;
pub mod database;
pub mod dispatch;
pub mod issued;
pub mod students;
