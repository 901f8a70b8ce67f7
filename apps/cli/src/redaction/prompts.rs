// Prompt constants for the redaction stage.
//
// The placeholder vocabulary ([STUDENT_NAME], [STUDENT_ID], [STUDENT_EMAIL],
// [STUDENT_INFO], with _1/_2 suffixes for multiple students) is an output
// contract — later stages may scan redacted letters for these tokens.

pub const REDACTION_SYSTEM: &str = "You are a precise document redaction assistant.";

/// Redaction instruction set. The document text is appended directly after it.
pub const REDACTION_PROMPT: &str = r#"You are a document redaction assistant. Your task is to identify and replace ALL student-identifying information with standardized placeholders.

Replace the following with these exact placeholders:
- Student names (full names, first names, last names) → [STUDENT_NAME]
- Student ID numbers → [STUDENT_ID]
- Student email addresses → [STUDENT_EMAIL]
- Other personal identifiers (phone numbers, addresses, etc.) → [STUDENT_INFO]

If there are multiple students, number the placeholders (e.g., [STUDENT_NAME_1], [STUDENT_NAME_2]).

IMPORTANT:
- Preserve ALL formatting, structure, line breaks, and markdown syntax exactly as written
- Do NOT modify or redact professor names, course names, institution names, or general content
- Only redact information that identifies specific students
- Return ONLY the redacted document without any additional commentary or explanation

Document to redact:

"#;

/// Low temperature — redaction must be as deterministic as the model allows.
pub const REDACTION_TEMPERATURE: f32 = 0.1;
