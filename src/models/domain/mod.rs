pub mod quiz;
pub mod webpage;

pub use quiz::{Quiz, QuizItem, ITEMS_PER_QUIZ, OPTIONS_PER_ITEM};
pub use webpage::Webpage;
