//! Instruction text sent to the quiz-content generator. The `{n}` and
//! `{...list}` placeholders are filled in by `services::prompting`.

pub const CONTEXT_TEMPLATE: &str = "Webpage content:

Title: {title}
Content: {text}";

pub const CREATE_TASK_TEMPLATE: &str = r#"Create a BuzzFeed-style multiple-choice quiz with exactly {n} questions based on the webpage content above.

Your quiz should be engaging, fun, and test knowledge about the content. Each question should have 4 multiple choice options (A, B, C, D) with exactly one correct answer.

Return your response as valid JSON in this exact format:
{
  "title": "Quiz title here",
  "slug": "url-safe-quiz-slug",
  "items": [
    {
      "stem": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctOption": 0,
      "sourceSnippet": "Relevant snippet from the source content that supports this question"
    }
  ]
}

Important requirements:
- Exactly {n} questions in the items array
- correctOption should be the index (0-3) of the correct answer
- Each question should be based on actual content from the webpage
- Include a relevant sourceSnippet for each question, copied exactly from the webpage
- Make the quiz title catchy and BuzzFeed-style, and the slug short, lower-case and URL-safe
- Return ONLY the JSON, no other text"#;

pub const REVISE_TASK_TEMPLATE: &str = r#"Write exactly {n} replacement questions for an existing multiple-choice quiz about the webpage content above. Each question should have 4 multiple choice options (A, B, C, D) with exactly one correct answer.

The quiz already contains these questions, do not duplicate them:
{existing_stems}

These questions were removed from the quiz earlier, do not repeat them or ask near-identical variants:
{excluded_stems}
{additional_instructions}
Return your response as a valid JSON array of exactly {n} items in this exact format:
[
  {
    "stem": "Question text here?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correctOption": 0,
    "sourceSnippet": "Relevant snippet from the source content that supports this question"
  }
]

Important requirements:
- Exactly {n} questions in the array
- correctOption should be the index (0-3) of the correct answer
- Each question should be based on actual content from the webpage
- Include a relevant sourceSnippet for each question, copied exactly from the webpage
- Return ONLY the JSON, no other text"#;
