// Prompt constants for the style-extraction stage.

pub const STYLE_SYSTEM: &str = "You are an expert at analyzing writing style and creating \
    comprehensive style guides. You provide detailed, structured analysis.";

/// Instruction template; the redacted-letter corpus is appended by the
/// composer under a "Redacted Letters to Analyze" section.
pub const STYLE_TEMPLATE: &str = r#"Analyze the following redacted letters of recommendation, all written by the same professor, and produce a comprehensive writing style guide.

The style guide must capture:

1. **Tone and register** — formality level, warmth, directness, how enthusiasm is expressed and calibrated.
2. **Structure** — how letters open, how the body is organized (chronological, thematic, by skill), how they close.
3. **Sentence and paragraph patterns** — typical sentence length and rhythm, transitions, paragraph sizes.
4. **Reusable phrases** — recurring openings, closings, superlatives, hedges, and signature constructions, quoted exactly.
5. **Evidence style** — how claims about students are supported (anecdotes, course numbers, rankings, comparisons to peers).
6. **Letterhead and sign-off conventions** — salutations, date placement, signature block.

Write the guide in Markdown with one section per item above. Quote concrete examples from the letters wherever possible; the redaction placeholders (e.g. [STUDENT_NAME]) are expected and should be quoted as-is. Do not invent patterns that the letters do not show."#;

/// Low temperature — extraction should describe, not embellish.
pub const STYLE_TEMPERATURE: f32 = 0.2;
