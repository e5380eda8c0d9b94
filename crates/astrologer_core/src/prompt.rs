//! crates/astrologer_core/src/prompt.rs
//!
//! The one prompt every answer provider sends, whatever the vendor.

use crate::domain::AstrologyContext;

/// Role line for vendors that take a separate system message.
pub const SYSTEM_INSTRUCTIONS: &str =
    "You are an expert astrologer providing personalized guidance.";

const USER_INPUT_TEMPLATE: &str = r#"You are an expert astrologer providing personalized guidance. Please answer the following question with deep astrological insight.

PERSONAL CONTEXT:
- Name: {name}
- Sun Sign: {sun_sign} ({element} element)
- Age: {age}
- Birth Date: {date_of_birth}
- Place: {place_of_birth}
- Key Traits: {traits}

QUESTION: "{question}"

INSTRUCTIONS:
- Provide a personalized, insightful answer (150-250 words)
- Reference their specific zodiac traits and element
- Use their name naturally in the response
- Offer practical guidance based on astrological principles
- Maintain a warm, mystical but grounded tone
- Include specific advice related to their {sun_sign} nature

ANSWER:"#;

/// Fills the template with the context fields and the literal question.
///
/// Placeholders are resolved in a single pass over the template, so braces
/// typed into any user field (name, place, question) are copied verbatim.
pub fn build_astrology_prompt(question: &str, context: &AstrologyContext) -> String {
    let age = context.age.to_string();
    let date_of_birth = context.date_of_birth.to_string();
    let traits = context.traits.join(", ");

    fill(USER_INPUT_TEMPLATE, |key| match key {
        "name" => Some(context.name.as_str()),
        "sun_sign" => Some(context.sun_sign.as_str()),
        "element" => Some(context.element.as_str()),
        "age" => Some(age.as_str()),
        "date_of_birth" => Some(date_of_birth.as_str()),
        "place_of_birth" => Some(context.place_of_birth.as_str()),
        "traits" => Some(traits.as_str()),
        "question" => Some(question),
        _ => None,
    })
}

/// Replaces each `{key}` in `template` with `value(key)`. Unknown keys and
/// unmatched braces are kept as written. Substituted text is never rescanned.
fn fill<'a>(template: &str, value: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| value(&after[..close]).map(|v| (close, v))) {
            Some((close, v)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> AstrologyContext {
        AstrologyContext {
            name: "Mira".to_string(),
            sun_sign: "Cancer".to_string(),
            element: "Water".to_string(),
            traits: vec!["Tenacious".to_string(), "Intuitive".to_string()],
            age: 31,
            date_of_birth: NaiveDate::from_ymd_opt(1993, 7, 2).unwrap(),
            place_of_birth: "Lisbon".to_string(),
        }
    }

    #[test]
    fn prompt_embeds_every_context_field() {
        let prompt = build_astrology_prompt("Should I move abroad?", &context());
        assert!(prompt.contains("- Name: Mira\n"));
        assert!(prompt.contains("- Sun Sign: Cancer (Water element)\n"));
        assert!(prompt.contains("- Age: 31\n"));
        assert!(prompt.contains("- Birth Date: 1993-07-02\n"));
        assert!(prompt.contains("- Place: Lisbon\n"));
        assert!(prompt.contains("- Key Traits: Tenacious, Intuitive\n"));
        assert!(prompt.contains("QUESTION: \"Should I move abroad?\""));
        assert!(prompt.contains("related to their Cancer nature"));
        assert!(prompt.contains("(150-250 words)"));
        assert!(prompt.ends_with("ANSWER:"));
    }

    #[test]
    fn placeholders_in_the_question_are_left_alone() {
        let prompt = build_astrology_prompt("what about {name}?", &context());
        assert!(prompt.contains("QUESTION: \"what about {name}?\""));
    }

    #[test]
    fn placeholders_in_user_fields_are_copied_verbatim() {
        let mut ctx = context();
        ctx.name = "Ana {question}".to_string();
        ctx.place_of_birth = "Rua {traits} {element}".to_string();

        let prompt = build_astrology_prompt("Q? {sun_sign}", &ctx);
        assert!(prompt.contains("- Name: Ana {question}\n"));
        assert!(prompt.contains("- Place: Rua {traits} {element}\n"));
        assert!(prompt.contains("QUESTION: \"Q? {sun_sign}\""));
        assert!(prompt.contains("- Key Traits: Tenacious, Intuitive\n"));
    }

    #[test]
    fn unknown_keys_and_stray_braces_survive() {
        assert_eq!(fill("a {b} {c", |k| (k == "c").then_some("C")), "a {b} {c");
        assert_eq!(fill("{x}{x}}", |_| Some("y")), "yy}");
    }
}
