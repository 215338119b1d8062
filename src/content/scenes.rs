/// A background scene the image prompt is built from. `name` is the unique
/// key the scene cooldown history uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub details: &'static str,
}

pub const SCENES: &[SceneDescriptor] = &[
    SceneDescriptor {
        name: "city_skyline_night",
        description: "City skyline at night with lit office building windows",
        details: "Single illuminated corner office, distant city lights, urban ambition",
    },
    SceneDescriptor {
        name: "empty_gym_4am",
        description: "Empty industrial gym at 4 AM with harsh overhead lights",
        details: "Heavy weights, worn floor, motivational posters, solitary dedication",
    },
    SceneDescriptor {
        name: "late_night_desk",
        description: "Late-night desk setup with laptop glow and coffee cups",
        details: "Multiple monitors, scattered notes, dim room, focused energy",
    },
    SceneDescriptor {
        name: "rain_streets_dawn",
        description: "Rain-soaked city streets at dawn with neon reflections",
        details: "Empty sidewalks, puddle reflections, early morning hustle",
    },
    SceneDescriptor {
        name: "midnight_coffee_shop",
        description: "24-hour coffee shop at midnight with a lone figure working",
        details: "Warm interior light, laptop open, coffee steam, urban solitude",
    },
    SceneDescriptor {
        name: "construction_sunrise",
        description: "Construction site at sunrise with workers arriving",
        details: "Steel beams, hard hats, orange sky, building something great",
    },
    SceneDescriptor {
        name: "empty_boardroom",
        description: "Empty corporate boardroom at night with city view",
        details: "Glass walls, leather chairs, city lights backdrop, ambition",
    },
    SceneDescriptor {
        name: "mountain_peak_climb",
        description: "Person standing at mountain peak after grueling climb",
        details: "Dramatic clouds below, harsh wind, victorious moment, earned view",
    },
];
