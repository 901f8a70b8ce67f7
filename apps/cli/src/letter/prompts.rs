// Prompt constants for the letter-generation stage.

pub const LETTER_SYSTEM: &str = "You are an expert at writing letters of recommendation that \
    authentically capture a professor's distinctive writing style while accurately representing \
    student qualifications. You never hallucinate or invent details not provided in the source \
    materials.";

/// Instruction template; the composer appends the style guide, the student
/// packet, and a closing instruction block carrying the current date.
pub const LETTER_TEMPLATE: &str = r#"Draft a complete letter of recommendation.

You will be given two documents:
- A STYLE GUIDE describing the professor's writing patterns, derived from their past letters.
- A STUDENT PACKET containing the verified facts about this student, including the professor's own assessment.

Write the letter the professor would write: their tone, their structure, their phrasing habits, applied to this student's facts. The letter must read as one coherent document, not as packet sections stitched together.

Formatting:
- Output Markdown only.
- Begin with a letterhead: wrap each letterhead line (professor name, title, institution, date) in double underscores, e.g. __Professor A. Example__, one line each.
- No headings in the body; plain paragraphs separated by blank lines.
- Close with the professor's customary sign-off from the style guide."#;

/// Higher temperature than the extraction stages — stylistic drafting
/// benefits from some variance.
pub const LETTER_TEMPERATURE: f32 = 0.7;
