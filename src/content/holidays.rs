/// A calendar-exact holiday override: fixed text and a fixed scene phrase.
/// Matched on `(month, day)` only; no ranges, no nearest-day fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayRule {
    pub month: u32,
    pub day: u32,
    pub name: &'static str,
    pub text: &'static str,
    pub scene: &'static str,
}

pub const HOLIDAYS: &[HolidayRule] = &[
    HolidayRule {
        month: 1,
        day: 1,
        name: "new_year",
        text: "New year. Same hunger. No days off.",
        scene: "city skyline at dawn with lone figure watching from rooftop, new year sunrise",
    },
    HolidayRule {
        month: 2,
        day: 14,
        name: "valentines",
        text: "Fall in love with the grind. It will never let you down.",
        scene: "late night desk with laptop and coffee, focused dedication, warm lamp light",
    },
    HolidayRule {
        month: 3,
        day: 8,
        name: "womens_day",
        text: "Strong women don't wait for opportunities. They create them.",
        scene: "woman in power suit walking through city at sunrise, confident stride",
    },
    HolidayRule {
        month: 4,
        day: 1,
        name: "april_fools",
        text: "The biggest joke? Thinking you can outwork me.",
        scene: "empty gym at 4am with heavy weights, single figure training",
    },
    HolidayRule {
        month: 5,
        day: 1,
        name: "labor_may",
        text: "They call it work. I call it war.",
        scene: "construction worker at dawn, steel and sweat, building something great",
    },
    HolidayRule {
        month: 6,
        day: 1,
        name: "pride",
        text: "Be proud of how far you've come. Be hungry for how far you'll go.",
        scene: "mountain peak view at sunset, victorious stance, clouds below",
    },
    HolidayRule {
        month: 7,
        day: 4,
        name: "independence",
        text: "Financial freedom is the only independence worth fighting for.",
        scene: "corner office at night, city lights below, empire builder",
    },
    HolidayRule {
        month: 8,
        day: 4,
        name: "friendship",
        text: "Your circle should motivate you, not comfort your mediocrity.",
        scene: "two figures training together at dawn, mutual respect and drive",
    },
    HolidayRule {
        month: 9,
        day: 1,
        name: "labor_sep",
        text: "While they vacation, I execute.",
        scene: "late night office, everyone gone home, one light still on",
    },
    HolidayRule {
        month: 10,
        day: 31,
        name: "halloween",
        text: "My demons? I put them to work.",
        scene: "dark city street at night with lone figure walking purposefully, neon reflections",
    },
    HolidayRule {
        month: 11,
        day: 28,
        name: "thanksgiving",
        text: "Grateful for the struggle that made me dangerous.",
        scene: "man looking out window at city dawn, reflection on the journey",
    },
    HolidayRule {
        month: 12,
        day: 25,
        name: "christmas",
        text: "The best gift you can give yourself is results.",
        scene: "person working at desk on christmas eve, dedication, city lights outside",
    },
];

pub fn holiday_for(month: u32, day: u32) -> Option<&'static HolidayRule> {
    HOLIDAYS.iter().find(|h| h.month == month && h.day == day)
}
