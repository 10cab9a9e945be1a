pub mod fixtures {
    use crate::models::domain::{Quiz, QuizItem, Webpage, ITEMS_PER_QUIZ};

    /// A well-formed item whose stem carries a marker for assertions.
    pub fn make_item(marker: &str) -> QuizItem {
        QuizItem {
            stem: format!("What about {}?", marker),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            correct_option: 1,
            source_snippet: format!("snippet for {}", marker),
        }
    }

    /// A full complement of items, markers "0".."n".
    pub fn make_items(n: usize) -> Vec<QuizItem> {
        (0..n).map(|i| make_item(&i.to_string())).collect()
    }

    pub fn make_webpage() -> Webpage {
        Webpage::new(
            "https://a.example/x",
            "X".to_string(),
            "one hundred words of body text".to_string(),
            None,
        )
    }

    pub fn make_quiz(source_id: &str) -> Quiz {
        Quiz::new_root(
            "Test Quiz".to_string(),
            "test-quiz-abc123".to_string(),
            make_items(ITEMS_PER_QUIZ),
            source_id,
        )
    }
}
