//! crates/astrologer_core/src/reading.rs
//!
//! Deterministic reading generation and the offline, keyword-routed answers.
//!
//! Every piece of per-sign wording lives in the `PROFILES` table below; the
//! functions in this module only pick rows and append the age-banded text.

use chrono::NaiveDate;

use crate::domain::{Element, Reading, Sign, SignName};

/// Per-sign wording used to assemble a reading. One row per sign, in
/// `SignName::ALL` order.
struct SignProfile {
    personality: [&'static str; 3],
    strengths: [&'static str; 3],
    challenges: [&'static str; 3],
    advice: &'static str,
    career: &'static str,
    relationship: &'static str,
}

const PROFILES: [SignProfile; 12] = [
    // Aries
    SignProfile {
        personality: ["Natural leader", "Bold decision maker", "Energetic pioneer"],
        strengths: ["Leadership abilities", "Courage in challenges", "Quick decision making"],
        challenges: ["Impatience", "Impulsiveness", "Need to consider others"],
        advice: "Focus your natural leadership energy on meaningful goals. Channel your pioneering spirit into projects that benefit others.",
        career: "Leadership roles, entrepreneurship, sports, military, emergency services",
        relationship: "You bring passion and excitement to relationships. Seek partners who appreciate your direct nature and can match your energy.",
    },
    // Taurus
    SignProfile {
        personality: ["Steadfast companion", "Practical thinker", "Appreciates beauty"],
        strengths: ["Reliability", "Patience", "Financial wisdom"],
        challenges: ["Stubbornness", "Resistance to change", "Materialism"],
        advice: "Trust your practical instincts while remaining open to new experiences. Your steady nature is a gift to those around you.",
        career: "Finance, real estate, agriculture, arts, luxury goods, banking",
        relationship: "You offer stability and loyalty in relationships. Look for partners who value commitment and share your appreciation for life's pleasures.",
    },
    // Gemini
    SignProfile {
        personality: ["Excellent communicator", "Adaptable nature", "Intellectually curious"],
        strengths: ["Communication skills", "Adaptability", "Learning agility"],
        challenges: ["Inconsistency", "Superficiality", "Scattered focus"],
        advice: "Use your communication gifts to bridge understanding between people. Deepen your knowledge in areas that truly interest you.",
        career: "Communication, journalism, teaching, sales, technology, writing",
        relationship: "You thrive with intellectual connection and variety. Seek partners who enjoy deep conversations and can adapt to your changing interests.",
    },
    // Cancer
    SignProfile {
        personality: ["Emotionally intelligent", "Nurturing spirit", "Strong intuition"],
        strengths: ["Emotional support", "Family devotion", "Protective instincts"],
        challenges: ["Mood swings", "Over-sensitivity", "Living in the past"],
        advice: "Honor your emotional intelligence as a superpower. Create nurturing environments that support growth and healing.",
        career: "Healthcare, education, social work, hospitality, real estate",
        relationship: "You create emotional depth and nurturing in relationships. Find partners who appreciate your caring nature and offer emotional security.",
    },
    // Leo
    SignProfile {
        personality: ["Confident presence", "Creative expression", "Generous heart"],
        strengths: ["Creative talents", "Confidence", "Inspiring others"],
        challenges: ["Pride", "Need for attention", "Dominating tendencies"],
        advice: "Share your creative talents generously. Your natural warmth and confidence can inspire others to find their own light.",
        career: "Entertainment, leadership, creative arts, public speaking, management",
        relationship: "You bring warmth and generosity to relationships. Seek partners who admire your confidence and can share the spotlight occasionally.",
    },
    // Virgo
    SignProfile {
        personality: ["Detail-oriented", "Analytical mind", "Service-oriented"],
        strengths: ["Problem-solving", "Organization", "Attention to detail"],
        challenges: ["Perfectionism", "Over-criticism", "Worry"],
        advice: "Your attention to detail creates excellence. Balance perfectionism with self-compassion and appreciate progress over perfection.",
        career: "Healthcare, research, analysis, administration, quality control",
        relationship: "You offer practical support and devotion in relationships. Look for partners who appreciate your caring attention to their well-being.",
    },
    // Libra
    SignProfile {
        personality: ["Seeks harmony", "Diplomatic approach", "Aesthetic appreciation"],
        strengths: ["Relationship building", "Fair judgment", "Artistic appreciation"],
        challenges: ["Indecisiveness", "Avoiding confrontation", "People-pleasing"],
        advice: "Your gift for harmony brings peace to conflicts. Trust your judgment while maintaining your diplomatic nature.",
        career: "Law, diplomacy, arts, beauty industry, counseling, design",
        relationship: "You create harmony and balance in relationships. Seek partners who value fairness and can help you make decisions when needed.",
    },
    // Scorpio
    SignProfile {
        personality: ["Intense focus", "Transformative power", "Deep emotional insight"],
        strengths: ["Determination", "Emotional depth", "Transformation ability"],
        challenges: ["Jealousy", "Secretiveness", "Holding grudges"],
        advice: "Embrace your transformative power. Use your emotional depth to help others navigate life's mysteries and challenges.",
        career: "Investigation, psychology, research, surgery, detective work",
        relationship: "You bring intensity and loyalty to relationships. Find partners who can handle emotional depth and value authentic connection.",
    },
    // Sagittarius
    SignProfile {
        personality: ["Philosophical mind", "Adventurous spirit", "Optimistic outlook"],
        strengths: ["Optimism", "Adventure seeking", "Truth telling"],
        challenges: ["Overconfidence", "Tactlessness", "Restlessness"],
        advice: "Your optimistic worldview is infectious. Share your wisdom through teaching, travel, or philosophical exploration.",
        career: "Education, travel, philosophy, publishing, international business",
        relationship: "You offer adventure and growth in relationships. Seek partners who share your love of exploration and philosophical discussions.",
    },
    // Capricorn
    SignProfile {
        personality: ["Goal-oriented", "Disciplined approach", "Natural authority"],
        strengths: ["Goal achievement", "Responsibility", "Long-term planning"],
        challenges: ["Pessimism", "Rigidity", "Workaholic tendencies"],
        advice: "Your disciplined approach creates lasting achievements. Remember to celebrate milestones along your journey to success.",
        career: "Business, government, engineering, architecture, management",
        relationship: "You provide stability and long-term commitment in relationships. Look for partners who share your goals and appreciate your reliability.",
    },
    // Aquarius
    SignProfile {
        personality: ["Innovative thinking", "Humanitarian values", "Independent spirit"],
        strengths: ["Innovation", "Humanitarian spirit", "Independent thinking"],
        challenges: ["Emotional detachment", "Stubbornness", "Unpredictability"],
        advice: "Your innovative thinking can change the world. Channel your humanitarian ideals into practical solutions for society.",
        career: "Technology, innovation, humanitarian work, science, reform",
        relationship: "You bring friendship and innovation to relationships. Seek partners who respect your independence and share your humanitarian values.",
    },
    // Pisces
    SignProfile {
        personality: ["Compassionate nature", "Artistic sensibility", "Intuitive wisdom"],
        strengths: ["Empathy", "Creativity", "Spiritual connection"],
        challenges: ["Escapism", "Over-emotionalism", "Lack of boundaries"],
        advice: "Your compassionate nature heals others. Trust your intuition and use your artistic gifts to express deep truths.",
        career: "Arts, healing, spirituality, psychology, charitable work",
        relationship: "You offer compassion and understanding in relationships. Find partners who appreciate your emotional sensitivity and creative spirit.",
    },
];

fn profile(name: SignName) -> &'static SignProfile {
    &PROFILES[name.index()]
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

//=========================================================================================
// Reading Sections
//=========================================================================================

/// Two descriptors for the age bands `<25`, `25..40`, `40..60` and `60+`.
fn life_stage_traits(age: i32) -> [&'static str; 2] {
    if age < 25 {
        ["Discovering personal identity", "Learning life lessons"]
    } else if age < 40 {
        ["Building foundations", "Career-focused energy"]
    } else if age < 60 {
        ["Wisdom from experience", "Mentoring capabilities"]
    } else {
        ["Deep spiritual understanding", "Life mastery"]
    }
}

fn life_stage_advice(age: i32) -> &'static str {
    if age < 30 {
        "This is a time for exploration and discovering your true passions."
    } else if age < 50 {
        "Focus on building meaningful relationships and establishing your legacy."
    } else {
        "Share your wisdom with younger generations and embrace spiritual growth."
    }
}

pub fn personality_traits(name: SignName, age: i32) -> Vec<String> {
    let mut traits = to_strings(&profile(name).personality);
    traits.extend(life_stage_traits(age).iter().map(|s| s.to_string()));
    traits
}

pub fn strengths(name: SignName) -> Vec<String> {
    to_strings(&profile(name).strengths)
}

pub fn challenges(name: SignName) -> Vec<String> {
    to_strings(&profile(name).challenges)
}

pub fn life_advice(name: SignName, age: i32) -> String {
    format!("{} {}", profile(name).advice, life_stage_advice(age))
}

pub fn career_guidance(name: SignName) -> String {
    format!(
        "Your natural talents align with careers in: {}. Consider roles that utilize your innate strengths while allowing for personal growth.",
        profile(name).career
    )
}

pub fn relationship_insights(name: SignName) -> String {
    profile(name).relationship.to_string()
}

/// Assembles the full reading for a sign at a given age.
pub fn generate_reading(sign: &'static Sign, age: i32) -> Reading {
    let name = sign.name;
    Reading {
        sun_sign: sign,
        personality_traits: personality_traits(name, age),
        strengths: strengths(name),
        challenges: challenges(name),
        life_advice: life_advice(name, age),
        career_guidance: career_guidance(name),
        relationship_insights: relationship_insights(name),
    }
}

//=========================================================================================
// Rule-Based Answers
//=========================================================================================

/// The topic a free-text question is routed to, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionTopic {
    Career,
    Love,
    Future,
    Money,
    Health,
    Family,
    General,
}

const TOPIC_KEYWORDS: [(QuestionTopic, &[&str]); 6] = [
    (QuestionTopic::Career, &["career", "job", "work"]),
    (QuestionTopic::Love, &["love", "relationship", "partner"]),
    (QuestionTopic::Future, &["future", "what will happen", "prediction"]),
    (QuestionTopic::Money, &["money", "finance", "wealth"]),
    (QuestionTopic::Health, &["health", "wellness", "body"]),
    (QuestionTopic::Family, &["family", "home", "parents"]),
];

/// Case-insensitive substring routing; the first topic with a matching keyword wins.
pub fn classify_question(question: &str) -> QuestionTopic {
    let lowered = question.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(QuestionTopic::General)
}

/// Answers a question from the static tables alone, without any provider.
pub fn answer_question_rule_based(
    question: &str,
    sign: &Sign,
    age: i32,
    date_of_birth: NaiveDate,
) -> String {
    let name = sign.name;
    let element = sign.element;

    match classify_question(question) {
        QuestionTopic::Career => format!(
            "{} Given your {} nature, focus on roles that allow you to utilize your natural strengths.",
            career_guidance(name),
            name
        ),
        QuestionTopic::Love => {
            let values = match element {
                Element::Fire => "passion and independence",
                Element::Earth => "stability and loyalty",
                Element::Air => "intellectual connection and communication",
                Element::Water => "emotional depth and intuition",
            };
            format!(
                "{} Your {} element suggests you value {} in relationships.",
                relationship_insights(name),
                element,
                values
            )
        }
        QuestionTopic::Future => {
            let opportunities = match element {
                Element::Fire => "leadership and creative expression",
                Element::Earth => "building lasting foundations",
                Element::Air => "communication and learning",
                Element::Water => "emotional growth and healing",
            };
            format!(
                "Based on your {} energy, the future holds opportunities for {}. Focus on developing your natural talents while addressing your challenges with patience and self-awareness.",
                name, opportunities
            )
        }
        QuestionTopic::Money => {
            let approach = match element {
                Element::Earth => "You have natural financial wisdom and should trust your practical instincts.",
                Element::Fire => "You may be impulsive with money - create structured savings plans.",
                Element::Air => "You might benefit from diversified investments and financial education.",
                Element::Water => "Trust your intuition about investments, but seek practical advice.",
            };
            let outlook = match sign.ruling_planet {
                "Venus" => "prosperity through beauty and relationships",
                "Mars" => "wealth through bold actions and leadership",
                "Jupiter" => "abundance through expansion and education",
                _ => "steady growth through discipline and patience",
            };
            format!(
                "As a {}, your approach to finances reflects your {} nature. {} Your ruling planet {} suggests {}.",
                name, element, approach, sign.ruling_planet, outlook
            )
        }
        QuestionTopic::Health => {
            let focus = match element {
                Element::Fire => "physical activity and stress management",
                Element::Earth => "digestive health and regular exercise",
                Element::Air => "respiratory health and mental stimulation",
                Element::Water => "emotional balance and restorative practices",
            };
            format!(
                "Your {} constitution suggests focusing on {}. Pay attention to areas ruled by your sign and maintain a balanced lifestyle that honors both your body and spirit.",
                name, focus
            )
        }
        QuestionTopic::Family => {
            let role = match element {
                Element::Water => "feel deeply connected to family and may be the emotional caretaker",
                Element::Fire => "bring energy and leadership to family situations",
                Element::Earth => "provide stability and practical support to your family",
                Element::Air => "help family members communicate and see different perspectives",
            };
            format!(
                "Family relationships are influenced by your {} nature. You likely {}. Understanding your family members' signs can improve harmony and reduce conflicts.",
                name, role
            )
        }
        QuestionTopic::General => {
            let leading_traits = sign
                .traits
                .iter()
                .take(3)
                .copied()
                .collect::<Vec<_>>()
                .join(", ")
                .to_lowercase();
            let growth_area = profile(name).challenges[0].to_lowercase();
            format!(
                "As a {} born on {}, your {} energy guides you toward {}. The stars suggest that embracing your natural {} traits while working on {} will lead to personal growth and fulfillment.",
                name,
                date_of_birth,
                element,
                life_advice(name, age),
                leading_traits,
                growth_area
            )
        }
    }
}
