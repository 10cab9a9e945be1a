pub mod generator;
pub mod page_fetcher;
pub mod prompting;
pub mod quiz_service;
pub mod webpage_service;

pub use generator::{OpenAiQuizGenerator, QuizGenerator};
pub use page_fetcher::{ExaPageFetcher, PageContent, PageFetcher};
pub use quiz_service::QuizService;
pub use webpage_service::WebpageService;
