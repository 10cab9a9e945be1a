pub mod quiz_repository;
pub mod webpage_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use webpage_repository::{MongoWebpageRepository, WebpageRepository};
