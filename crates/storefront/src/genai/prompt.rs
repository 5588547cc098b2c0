//! Prompt templates for the generative model.

use askama::Template;
use kicklabs_core::DesignPrompt;

/// Studio render prompt wrapped around a design brief.
#[derive(Template)]
#[template(path = "genai/design_prompt.txt")]
struct DesignRenderTemplate<'a> {
    concept: &'a str,
    material: &'a str,
}

/// System instruction for the design assistant.
#[derive(Template)]
#[template(path = "genai/system_prompt.txt")]
struct SystemPromptTemplate;

/// Render the full image prompt for a brief.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_design_prompt(brief: &DesignPrompt) -> Result<String, askama::Error> {
    let enriched = brief.enriched();
    let rendered = DesignRenderTemplate {
        concept: enriched.trim_end_matches('.'),
        material: brief.material.name(),
    }
    .render()?;
    Ok(rendered.trim().to_string())
}

/// Render the assistant system instruction.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_system_prompt() -> Result<String, askama::Error> {
    Ok(SystemPromptTemplate.render()?.trim().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kicklabs_core::{LaceColor, LaceStyle, Material};

    use super::*;

    #[test]
    fn test_design_prompt_carries_brief_and_material() {
        let brief = DesignPrompt {
            prompt: "Yeti Footprints".to_string(),
            material: Material::Canvas,
            lace_style: LaceStyle::Round,
            lace_color: LaceColor::Sky,
        };

        let prompt = render_design_prompt(&brief).unwrap();

        assert!(prompt.starts_with("A hyper-realistic 3D product render of a professional kid's sneaker."));
        assert!(prompt.contains(
            "Design Concept: Yeti Footprints. The shoe features Sport Round laces in a vibrant \
             Himalayan Sky color, Organic Canvas upper. Primary Material: Organic Canvas"
        ));
        assert!(prompt.contains("Orthographic 3/4 side profile"));
        assert!(!prompt.contains(".."));
    }

    #[test]
    fn test_design_prompt_is_not_html_escaped() {
        let brief = DesignPrompt {
            prompt: "Kid's \"tiger\" & rhino".to_string(),
            ..DesignPrompt::default()
        };

        let prompt = render_design_prompt(&brief).unwrap();
        assert!(prompt.contains("Kid's \"tiger\" & rhino"));
    }

    #[test]
    fn test_system_prompt() {
        let prompt = render_system_prompt().unwrap();
        assert!(prompt.starts_with("You are the Head of Design at Kids KickLabs Nepal."));
        assert!(prompt.ends_with("Keep responses concise and cultural."));
    }
}
