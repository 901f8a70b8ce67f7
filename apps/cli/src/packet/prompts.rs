// Prompt constants for the packet-synthesis stage.

pub const SYNTHESIS_SYSTEM: &str = "You are an expert at extracting and organizing information \
    from student application materials. You provide accurate, well-structured analysis without \
    hallucinating details.";

/// Instruction template; the composer appends the role-labeled materials
/// under a "Student Materials" section.
pub const SYNTHESIS_TEMPLATE: &str = r#"Synthesize the student materials below into a single structured "student packet" that a professor will use when drafting a letter of recommendation.

Produce a Markdown document with exactly these sections, in this order:

## Profile
Name placeholder, program, year, and a two-sentence summary of who this student is.

## Academic Performance
Courses taken with the professor (numbers and titles where available), grades, rank signals, and notable coursework.

## Teaching Work
Any TA/grading/tutoring positions, with responsibilities and outcomes.

## Research Contributions
Projects, publications, posters, or substantial technical work, each with a one-line description of the student's concrete contribution.

## Goals
What the student is applying for and their stated long-term direction.

## Strengths from Professor's Perspective
[TO BE COMPLETED MANUALLY BY PROFESSOR]

Rules:
- Use ONLY facts present in the materials. If a section has no supporting material, write "No information available" rather than inventing content.
- A material marked [NOT PROVIDED] was not supplied; never guess at its contents.
- Keep the "Strengths from Professor's Perspective" section exactly as the placeholder above — it is filled in by a human.
- Be specific: prefer course numbers, dates, and named projects over generalities."#;

/// Factual extraction — keep the temperature low.
pub const SYNTHESIS_TEMPERATURE: f32 = 0.3;
