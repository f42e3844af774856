pub mod seeding;
pub mod server;
