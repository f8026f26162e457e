//! Pure projection from the canonical content view to display instructions.
//!
//! [`render_page`] emits an ordered list of [`Node`]s with no business logic
//! of its own; applying them to an output medium is a thin adapter
//! ([`render_text`] here, DOM mutation in the original page). Every absent
//! field gets explicit placeholder text so the adapter never has to decide.

use crate::model::{Ingredient, NutritionPerServing, Quantity};
use crate::normalize::ContentView;

/// Placeholder for a missing numeric nutrition field.
pub const EM_DASH: &str = "\u{2014}";

/// One display instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Placeholder text for an absent field.
    Muted(String),
    /// A group label within a section.
    Label(String),
    Bullet(String),
    Step { number: usize, text: String },
    /// Indented line under the preceding bullet.
    SubItem(String),
    Image { uri: String, alt: String },
    /// A labelled value row, used for tags and nutrition.
    Field { label: String, value: String },
}

/// Project a canonical view onto render nodes.
pub fn render_page(view: &ContentView) -> Vec<Node> {
    let mut nodes = Vec::new();

    nodes.push(Node::Heading {
        level: 1,
        text: view.title.clone(),
    });
    if let Some(subtitle) = &view.subtitle {
        nodes.push(Node::Paragraph(subtitle.clone()));
    }
    if !view.tags.is_empty() {
        nodes.push(Node::Field {
            label: "Tags".to_string(),
            value: view.tags.join(", "),
        });
    }

    match &view.description {
        Some(description) => nodes.push(Node::Paragraph(description.clone())),
        None => nodes.push(Node::Muted("No description provided.".to_string())),
    }

    for image in &view.images {
        nodes.push(Node::Image {
            uri: image.uri.clone(),
            alt: image.alt.clone().unwrap_or_default(),
        });
    }

    nodes.push(Node::Heading {
        level: 2,
        text: "Ingredients".to_string(),
    });
    if view.ingredients.is_empty() {
        nodes.push(Node::Muted("No ingredients listed.".to_string()));
    } else {
        for group in &view.ingredients {
            if let Some(label) = &group.group_label {
                nodes.push(Node::Label(label.clone()));
            }
            for item in &group.items {
                nodes.push(Node::Bullet(format_ingredient(item)));
            }
        }
    }

    nodes.push(Node::Heading {
        level: 2,
        text: "Instructions".to_string(),
    });
    if view.instructions.is_empty() {
        nodes.push(Node::Muted("No instructions listed.".to_string()));
    } else {
        for group in &view.instructions {
            if let Some(label) = &group.group_label {
                nodes.push(Node::Label(label.clone()));
            }
            for (i, step) in group.steps.iter().enumerate() {
                nodes.push(Node::Step {
                    number: i + 1,
                    text: step.text.clone(),
                });
            }
        }
    }

    nodes.push(Node::Heading {
        level: 2,
        text: "Adjustments".to_string(),
    });
    if view.adjustments.is_empty() {
        nodes.push(Node::Muted("No adjustments listed.".to_string()));
    } else {
        for adjustment in &view.adjustments {
            let after = adjustment
                .after_step_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| EM_DASH.to_string());
            let check = adjustment.check_text.clone().unwrap_or_default();
            nodes.push(Node::Bullet(
                format!("After step {}: {}", after, check).trim_end().to_string(),
            ));
            for conditional in &adjustment.conditional_actions {
                nodes.push(Node::SubItem(format!(
                    "If {}: {}",
                    conditional.condition, conditional.action
                )));
            }
        }
    }

    nodes.push(Node::Heading {
        level: 2,
        text: "Nutrition (per serving)".to_string(),
    });
    match &view.nutrition {
        Some(per_serving) => nodes.extend(nutrition_fields(per_serving)),
        None => nodes.push(Node::Muted("No nutrition data available.".to_string())),
    }

    nodes
}

/// Once the nutrition object is present, each number renders individually;
/// a missing one becomes an em-dash without short-circuiting the others.
fn nutrition_fields(per_serving: &NutritionPerServing) -> Vec<Node> {
    let metric = |label: &str, value: Option<f64>, unit: &str| Node::Field {
        label: label.to_string(),
        value: value
            .map(|n| format!("{} {}", n, unit))
            .unwrap_or_else(|| EM_DASH.to_string()),
    };

    vec![
        metric("Calories", per_serving.energy_kcal, "kcal"),
        metric("Protein", per_serving.protein_g, "g"),
        metric("Carbohydrates", per_serving.carbs_g, "g"),
        metric("Fat", per_serving.fat_g, "g"),
    ]
}

fn format_quantity(quantity: &Quantity) -> String {
    let mut parts = Vec::new();
    if let Some(value) = &quantity.value {
        parts.push(value.to_string());
    }
    if let Some(unit) = &quantity.unit {
        parts.push(unit.clone());
    }
    parts.join(" ")
}

fn format_ingredient(ingredient: &Ingredient) -> String {
    // Quantity or unit absent renders blank, not a placeholder.
    let quantity = ingredient
        .quantity
        .as_ref()
        .map(format_quantity)
        .unwrap_or_default();
    if quantity.is_empty() {
        ingredient.name.clone()
    } else {
        format!("{}: {}", ingredient.name, quantity)
    }
}

/// Apply render nodes to plain text. This is the terminal stand-in for the
/// original page's DOM adapter and carries no logic beyond formatting.
pub fn render_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Heading { level: 1, text } => {
                out.push_str(text);
                out.push('\n');
                out.push_str(&"=".repeat(text.chars().count()));
                out.push('\n');
            }
            Node::Heading { text, .. } => {
                out.push('\n');
                out.push_str(text);
                out.push('\n');
                out.push_str(&"-".repeat(text.chars().count()));
                out.push('\n');
            }
            Node::Paragraph(text) | Node::Muted(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Node::Label(text) => {
                out.push_str(text);
                out.push_str(":\n");
            }
            Node::Bullet(text) => {
                out.push_str("  - ");
                out.push_str(text);
                out.push('\n');
            }
            Node::Step { number, text } => {
                out.push_str(&format!("  {}. {}\n", number, text));
            }
            Node::SubItem(text) => {
                out.push_str("      ");
                out.push_str(text);
                out.push('\n');
            }
            Node::Image { uri, alt } => {
                out.push_str(&format!("[image: {}] {}\n", alt, uri));
            }
            Node::Field { label, value } => {
                out.push_str(&format!("  {}: {}\n", label, value));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeDocument;
    use crate::normalize::normalize_current;

    fn view(json: &str) -> ContentView {
        let doc: RecipeDocument = serde_json::from_str(json).unwrap();
        normalize_current(&doc).unwrap()
    }

    #[test]
    fn empty_sections_render_placeholders() {
        let view = view(r#"{ "meta": { "title": "Bare" }, "versions": [ {} ] }"#);
        let nodes = render_page(&view);

        assert!(nodes.contains(&Node::Muted("No description provided.".to_string())));
        assert!(nodes.contains(&Node::Muted("No ingredients listed.".to_string())));
        assert!(nodes.contains(&Node::Muted("No instructions listed.".to_string())));
        assert!(nodes.contains(&Node::Muted("No adjustments listed.".to_string())));
        assert!(nodes.contains(&Node::Muted("No nutrition data available.".to_string())));
    }

    #[test]
    fn missing_nutrition_numbers_dash_individually() {
        let view = view(r#"
        {
            "meta": { "title": "Soup" },
            "versions": [
                { "nutrition": { "perServing": { "calories": 520, "carbs": 48, "fat": 18 } } }
            ]
        }
        "#);
        let nodes = render_page(&view);

        let field = |label: &str| {
            nodes
                .iter()
                .find_map(|n| match n {
                    Node::Field { label: l, value } if l == label => Some(value.clone()),
                    _ => None,
                })
                .unwrap()
        };

        assert_eq!(field("Calories"), "520 kcal");
        assert_eq!(field("Protein"), EM_DASH);
        assert_eq!(field("Carbohydrates"), "48 g");
        assert_eq!(field("Fat"), "18 g");
    }

    #[test]
    fn absent_quantity_renders_blank() {
        let view = view(r#"
        {
            "meta": { "title": "Soup" },
            "versions": [
                {
                    "ingredients": [
                        {
                            "items": [
                                { "name": "salt" },
                                { "name": "stock", "quantity": { "value": 2, "unit": "cups" } },
                                { "name": "thyme", "quantity": { "unit": "sprigs" } }
                            ]
                        }
                    ]
                }
            ]
        }
        "#);
        let nodes = render_page(&view);

        assert!(nodes.contains(&Node::Bullet("salt".to_string())));
        assert!(nodes.contains(&Node::Bullet("stock: 2 cups".to_string())));
        assert!(nodes.contains(&Node::Bullet("thyme: sprigs".to_string())));
    }

    #[test]
    fn steps_are_numbered_per_group() {
        let view = view(r#"
        {
            "meta": { "title": "Soup" },
            "versions": [
                {
                    "instructions": [
                        { "groupLabel": "Prep", "steps": [ { "text": "Chop." }, { "text": "Rinse." } ] },
                        { "groupLabel": "Cook", "steps": [ { "text": "Simmer." } ] }
                    ]
                }
            ]
        }
        "#);
        let nodes = render_page(&view);

        let steps: Vec<(usize, &str)> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Step { number, text } => Some((*number, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(steps, vec![(1, "Chop."), (2, "Rinse."), (1, "Simmer.")]);
    }

    #[test]
    fn text_adapter_writes_every_node_kind() {
        let view = view(r#"
        {
            "meta": { "title": "Loaf", "subtitle": "Daily", "tags": ["bread"] },
            "images": { "hero": { "uri": "hero.jpg", "alt": "A loaf" } },
            "versions": [
                {
                    "status": "current",
                    "description": "A plain loaf.",
                    "imageRefs": ["hero"],
                    "ingredients": [ { "items": [ { "name": "flour" } ] } ],
                    "instructions": [ { "steps": [ { "text": "Bake." } ] } ],
                    "adjustments": [
                        {
                            "afterStep": 1,
                            "checkText": "Knock the base.",
                            "conditionalActions": [
                                { "condition": "it sounds dull", "action": "bake 5 more minutes" }
                            ]
                        }
                    ],
                    "nutrition": { "perServing": { "calories": 250 } }
                }
            ]
        }
        "#);

        let text = render_text(&render_page(&view));
        assert!(text.contains("Loaf\n===="));
        assert!(text.contains("  Tags: bread"));
        assert!(text.contains("A plain loaf."));
        assert!(text.contains("[image: A loaf] hero.jpg"));
        assert!(text.contains("  - flour"));
        assert!(text.contains("  1. Bake."));
        assert!(text.contains("  - After step 1: Knock the base."));
        assert!(text.contains("      If it sounds dull: bake 5 more minutes"));
        assert!(text.contains("  Calories: 250 kcal"));
        assert!(text.contains(&format!("  Protein: {}", EM_DASH)));
    }
}
