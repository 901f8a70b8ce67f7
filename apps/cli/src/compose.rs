//! Prompt Composer — assembles stage prompts from templates and converted
//! materials.
//!
//! Output bytes are a contract: downstream debugging splits on the fixed-width
//! rule line, and the section ordering/labels are what the prompt templates
//! reference. Change nothing here without changing the templates.

use crate::materials::Role;

/// Fixed-width delimiter reused across every composed prompt.
pub const RULE: &str =
    "================================================================================";

/// Marker emitted for a role with no located material.
pub const NOT_PROVIDED: &str = "[NOT PROVIDED]";

/// Policy for roles with no located material: show the model an explicit
/// placeholder section, or omit the section entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRoles {
    Placeholder,
    Omit,
}

/// Converted material text per role, filled by packet synthesis.
#[derive(Debug, Clone, Default)]
pub struct RoleTexts {
    pub resume: Option<String>,
    pub transcript: Option<String>,
    pub accomplishments: Option<String>,
    pub statement: Option<String>,
}

impl RoleTexts {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Resume => self.resume.as_deref(),
            Role::Transcript => self.transcript.as_deref(),
            Role::Accomplishments => self.accomplishments.as_deref(),
            Role::Statement => self.statement.as_deref(),
        }
    }

    pub fn set(&mut self, role: Role, text: String) {
        match role {
            Role::Resume => self.resume = Some(text),
            Role::Transcript => self.transcript = Some(text),
            Role::Accomplishments => self.accomplishments = Some(text),
            Role::Statement => self.statement = Some(text),
        }
    }
}

/// Composes the style-extraction prompt from a corpus of redacted letters.
///
/// Letters are sorted by stem, each introduced with a `# Letter: <stem>`
/// heading and separated by the rule line.
pub fn compose_letter_corpus(template: &str, letters: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = letters.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let blocks: Vec<String> = sorted
        .iter()
        .map(|(stem, content)| format!("# Letter: {stem}\n\n{content}"))
        .collect();
    let corpus = blocks.join(&format!("\n\n{RULE}\n\n"));

    format!("{template}\n\n---\n\n## Redacted Letters to Analyze\n\n{corpus}")
}

/// Composes the packet-synthesis prompt from role materials.
///
/// Sections always appear in canonical role order regardless of how the
/// materials were discovered. Under the default policy a missing role still
/// emits its heading with [NOT PROVIDED] — silence would let the model guess.
pub fn compose_materials(template: &str, materials: &RoleTexts, missing: MissingRoles) -> String {
    let mut sections: Vec<String> = Vec::new();
    for role in Role::ALL {
        match materials.get(role) {
            Some(content) => sections.push(format!("## {}\n\n{}", role.label(), content)),
            None => {
                if missing == MissingRoles::Placeholder {
                    sections.push(format!("## {}\n\n{}", role.label(), NOT_PROVIDED));
                }
            }
        }
    }
    let combined = sections.join(&format!("\n\n{RULE}\n\n"));

    format!("{template}\n\n{RULE}\n\n# Student Materials\n\n{combined}")
}

/// Composes the letter-generation prompt from the style guide and packet.
pub fn compose_letter_prompt(
    template: &str,
    style_guide: &str,
    student_packet: &str,
    current_date: &str,
) -> String {
    format!(
        "{template}\n\n\
         {RULE}\n\n\
         # STYLE GUIDE\n\n\
         {style_guide}\n\n\
         {RULE}\n\n\
         # STUDENT PACKET\n\n\
         {student_packet}\n\n\
         {RULE}\n\n\
         Now, generate a complete letter of recommendation in the professor's style for this student.\n\n\
         Remember:\n\
         - Use ONLY information from the student packet above\n\
         - Write in the professor's distinctive voice using the style guide\n\
         - Include specific details, course numbers, and concrete examples\n\
         - Follow the structural patterns from the style guide\n\
         - Output in Markdown format with proper letterhead\n\
         - Current date: {current_date}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "Analyze the following.";

    #[test]
    fn test_rule_is_80_chars() {
        assert_eq!(RULE.len(), 80);
        assert!(RULE.chars().all(|c| c == '='));
    }

    #[test]
    fn test_letter_corpus_sorted_by_stem() {
        let letters = vec![
            ("zeta".to_string(), "Z body".to_string()),
            ("alpha".to_string(), "A body".to_string()),
        ];
        let prompt = compose_letter_corpus(TEMPLATE, &letters);
        let alpha = prompt.find("# Letter: alpha").unwrap();
        let zeta = prompt.find("# Letter: zeta").unwrap();
        assert!(alpha < zeta);
        assert!(prompt.starts_with("Analyze the following.\n\n---\n\n## Redacted Letters to Analyze"));
    }

    #[test]
    fn test_letter_corpus_separated_by_rule() {
        let letters = vec![
            ("a".to_string(), "first".to_string()),
            ("b".to_string(), "second".to_string()),
        ];
        let prompt = compose_letter_corpus(TEMPLATE, &letters);
        assert!(prompt.contains(&format!("first\n\n{RULE}\n\n# Letter: b")));
    }

    #[test]
    fn test_role_order_invariant_to_insertion_order() {
        let mut forward = RoleTexts::default();
        forward.set(Role::Resume, "R".to_string());
        forward.set(Role::Statement, "S".to_string());

        let mut reverse = RoleTexts::default();
        reverse.set(Role::Statement, "S".to_string());
        reverse.set(Role::Resume, "R".to_string());

        assert_eq!(
            compose_materials(TEMPLATE, &forward, MissingRoles::Placeholder),
            compose_materials(TEMPLATE, &reverse, MissingRoles::Placeholder)
        );
    }

    #[test]
    fn test_canonical_section_order() {
        let mut materials = RoleTexts::default();
        for role in Role::ALL {
            materials.set(role, role.as_str().to_uppercase());
        }
        let prompt = compose_materials(TEMPLATE, &materials, MissingRoles::Placeholder);
        let positions: Vec<usize> = [
            "## Resume/CV",
            "## Academic Transcript",
            "## Accomplishments List",
            "## Personal Statement",
        ]
        .iter()
        .map(|h| prompt.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_roles_emit_placeholder_not_silence() {
        let mut materials = RoleTexts::default();
        materials.set(Role::Resume, "only the resume".to_string());

        let prompt = compose_materials(TEMPLATE, &materials, MissingRoles::Placeholder);
        assert!(prompt.contains(&format!("## Academic Transcript\n\n{NOT_PROVIDED}")));
        assert!(prompt.contains(&format!("## Accomplishments List\n\n{NOT_PROVIDED}")));
        assert!(prompt.contains(&format!("## Personal Statement\n\n{NOT_PROVIDED}")));
    }

    #[test]
    fn test_omit_policy_drops_missing_sections() {
        let mut materials = RoleTexts::default();
        materials.set(Role::Resume, "only the resume".to_string());

        let prompt = compose_materials(TEMPLATE, &materials, MissingRoles::Omit);
        assert!(prompt.contains("## Resume/CV"));
        assert!(!prompt.contains("## Academic Transcript"));
        assert!(!prompt.contains(NOT_PROVIDED));
    }

    #[test]
    fn test_materials_prompt_shape() {
        let mut materials = RoleTexts::default();
        materials.set(Role::Resume, "R".to_string());
        let prompt = compose_materials(TEMPLATE, &materials, MissingRoles::Omit);
        assert!(prompt.starts_with(&format!(
            "Analyze the following.\n\n{RULE}\n\n# Student Materials\n\n## Resume/CV\n\nR"
        )));
    }

    #[test]
    fn test_letter_prompt_carries_guide_packet_and_date() {
        let prompt = compose_letter_prompt("Write the letter.", "GUIDE", "PACKET", "March 01, 2026");
        let guide = prompt.find("# STYLE GUIDE\n\nGUIDE").unwrap();
        let packet = prompt.find("# STUDENT PACKET\n\nPACKET").unwrap();
        assert!(guide < packet);
        assert!(prompt.contains("- Current date: March 01, 2026"));
        assert_eq!(prompt.matches(RULE).count(), 3);
    }
}
