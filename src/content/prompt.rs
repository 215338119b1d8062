use super::SceneDescriptor;

/// Assemble the regular doomer-illustration prompt for a scene. Deterministic
/// string template; the only variation comes from the scene itself.
pub fn regular_prompt(scene: &SceneDescriptor) -> String {
    format!(
        "A melancholic Wojak meme illustration, hand-drawn internet meme style. \
         A pale white Wojak character wearing a black beanie and dark hoodie, \
         thin face with minimal expression, slightly tired eyes, cigarette in \
         mouth with subtle smoke. Side-facing portrait, shoulders visible. \
         Background shows {} with {}, moody and cold atmosphere. Flat colors, \
         rough outlines, low-detail shading, classic Wojak / doomer aesthetic. \
         High contrast, centered composition, emotional loneliness vibe, \
         meme-style digital illustration.",
        scene.description, scene.details
    )
}

/// Holiday posts use a photorealistic template around the holiday's fixed
/// scene phrase instead of the illustration style.
pub fn holiday_prompt(scene_phrase: &str) -> String {
    format!(
        "Dramatic photorealistic digital art, ultra high detail, 8K quality, \
         cinematic photography style. {scene_phrase}, with a wide sense of \
         depth and scale. High contrast, deep shadows, bold colors, urban grit \
         aesthetic. Intense, driven, relentless mood, hustle culture \
         atmosphere. Magazine quality, sharp focus, dramatic composition, \
         no text, no watermark."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SCENES;

    #[test]
    fn regular_prompt_interpolates_scene_fields() {
        let scene = &SCENES[0];
        let prompt = regular_prompt(scene);
        assert!(prompt.contains(scene.description));
        assert!(prompt.contains(scene.details));
        assert!(prompt.contains("Wojak"));
    }

    #[test]
    fn holiday_prompt_is_photorealistic_and_text_free() {
        let prompt = holiday_prompt("city skyline at dawn");
        assert!(prompt.contains("city skyline at dawn"));
        assert!(prompt.contains("photorealistic"));
        assert!(prompt.contains("no text"));
    }

    #[test]
    fn prompts_are_deterministic() {
        let scene = &SCENES[3];
        assert_eq!(regular_prompt(scene), regular_prompt(scene));
    }
}
