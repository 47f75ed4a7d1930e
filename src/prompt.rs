use crate::models::ValidSticker;

pub const DEFAULT_DETAILS: &str = "No extra details";

pub fn build_sticker_prompt(sticker: &ValidSticker) -> String {
    let details = sticker.details.as_deref().unwrap_or(DEFAULT_DETAILS);
    format!(
        "Create a clean, print-ready sticker design (flat vector style).\n\
         Shape: {shape}\n\
         Material: {material}\n\
         Customer details: {details}\n\
         \n\
         Rules:\n\
         - Flat vector / simple shapes, no photo-realism\n\
         - High contrast, readable text, minimal tiny details\n\
         - Keep safe margins; avoid thin hairline strokes\n\
         - Centered composition, looks good as a real sticker\n",
        shape = sticker.shape,
        material = sticker.material,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sticker(details: Option<&str>) -> ValidSticker {
        ValidSticker { shape: "circle".into(), material: "holographic vinyl".into(), details: details.map(String::from) }
    }

    #[test]
    fn embeds_shape_material_and_details() {
        let prompt = build_sticker_prompt(&sticker(Some("a fox holding a coffee cup")));
        assert!(prompt.starts_with("Create a clean, print-ready sticker design (flat vector style).\n"));
        assert!(prompt.contains("\nShape: circle\n"));
        assert!(prompt.contains("\nMaterial: holographic vinyl\n"));
        assert!(prompt.contains("\nCustomer details: a fox holding a coffee cup\n"));
    }

    #[test]
    fn falls_back_to_placeholder_details() {
        let prompt = build_sticker_prompt(&sticker(None));
        assert!(prompt.contains("Customer details: No extra details\n"));
    }

    #[test]
    fn carries_print_rules() {
        let prompt = build_sticker_prompt(&sticker(None));
        assert!(prompt.contains("\n\nRules:\n"));
        assert!(prompt.contains("- Flat vector / simple shapes, no photo-realism\n"));
        assert!(prompt.contains("- Centered composition, looks good as a real sticker\n"));
        // Line continuations must not swallow indentation into the text.
        assert!(prompt.lines().all(|line| !line.starts_with(' ')));
    }
}
