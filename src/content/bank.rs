/// Category labels for the content bank. Seasonal preference keys off these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCategory {
    Grind,
    Vengeance,
    Discipline,
    Mindset,
    Success,
    Struggle,
}

/// The curated line bank: six categories, seven lines each. Lines are
/// identified by exact string value; the cooldown history keys on them.
pub const CONTENT_BANK: &[(ContentCategory, &[&str])] = &[
    (
        ContentCategory::Grind,
        &[
            "While they sleep, I build.",
            "The grind doesn't care about your excuses.",
            "Late nights now. Private jets later.",
            "Work in silence. Let success make the noise.",
            "Your only competition is the person you were yesterday.",
            "Outwork everyone. Outlearn everyone. Outlast everyone.",
            "The hustle is lonely. So is the top. Get used to it.",
        ],
    ),
    (
        ContentCategory::Vengeance,
        &[
            "Let your success be the revenge they never saw coming.",
            "They laughed at my dreams. Now they watch me live them.",
            "Every rejection is just fuel for the fire.",
            "Doubt me. It only makes my victory sweeter.",
            "I remember every single person who counted me out.",
            "Use their disrespect as your motivation.",
            "The best revenge is massive success.",
        ],
    ),
    (
        ContentCategory::Discipline,
        &[
            "Motivation fades. Discipline stays.",
            "Champions are made when no one is watching.",
            "Show up even when you don't want to. Especially then.",
            "Consistency is more powerful than talent.",
            "Discipline is choosing between what you want now and what you want most.",
            "Suffer the pain of discipline or suffer the pain of regret.",
            "I don't count days. I make days count.",
        ],
    ),
    (
        ContentCategory::Mindset,
        &[
            "A lion doesn't lose sleep over the opinions of sheep.",
            "Your mind quits a thousand times before your body does.",
            "Weak thoughts create weak results.",
            "Think like a winner. Train like a winner. Become a winner.",
            "The only limits that exist are the ones you accept.",
            "Pressure either bursts pipes or creates diamonds.",
            "I didn't come this far to only come this far.",
        ],
    ),
    (
        ContentCategory::Success,
        &[
            "Success isn't given. It's earned.",
            "They don't want you to win. Win anyway.",
            "I'm not lucky. I'm relentless.",
            "The top is lonely, but the view is worth it.",
            "Build in silence. Arrive in violence.",
            "Results speak louder than intentions.",
            "Winners find ways. Losers find excuses.",
        ],
    ),
    (
        ContentCategory::Struggle,
        &[
            "The pain you feel today is the strength you'll have tomorrow.",
            "Embrace the struggle. It's forging you into something unstoppable.",
            "Rock bottom became the solid foundation I built my empire on.",
            "Every setback is a setup for a comeback.",
            "I didn't come from money. I came from hunger.",
            "Hard times create strong people.",
            "The wound is where the light enters. Then the fire begins.",
        ],
    ),
];

/// Month-keyed bias toward certain categories. Months not listed carry no
/// preference.
pub fn seasonal_categories(month: u32) -> &'static [ContentCategory] {
    match month {
        1 => &[ContentCategory::Mindset, ContentCategory::Discipline],
        9 => &[ContentCategory::Grind, ContentCategory::Discipline],
        12 => &[ContentCategory::Success, ContentCategory::Struggle],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bank_has_six_categories_of_seven_unique_lines() {
        assert_eq!(CONTENT_BANK.len(), 6);
        let mut all = HashSet::new();
        for (_, lines) in CONTENT_BANK {
            assert_eq!(lines.len(), 7);
            for line in *lines {
                assert!(all.insert(*line), "duplicate line: {line}");
            }
        }
        assert_eq!(all.len(), 42);
    }

    #[test]
    fn seasonal_map_covers_expected_months() {
        assert_eq!(
            seasonal_categories(1),
            &[ContentCategory::Mindset, ContentCategory::Discipline]
        );
        assert_eq!(
            seasonal_categories(9),
            &[ContentCategory::Grind, ContentCategory::Discipline]
        );
        assert_eq!(
            seasonal_categories(12),
            &[ContentCategory::Success, ContentCategory::Struggle]
        );
        assert!(seasonal_categories(6).is_empty());
    }
}
