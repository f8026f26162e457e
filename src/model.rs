use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// One row of the collection manifest, mapping a recipe id to the path of
/// its document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IndexEntry {
    pub id: String,
    pub path: String,
}

/// The collection manifest, fetched once at startup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RecipeIndex {
    #[serde(default)]
    pub recipes: Vec<IndexEntry>,
}

impl RecipeIndex {
    /// Resolve a recipe id to its document path.
    pub fn path_for(&self, id: &str) -> Option<&str> {
        self.recipes
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.path.as_str())
    }
}

/// A full recipe document as fetched from its JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDocument {
    pub meta: Meta,
    #[serde(default)]
    pub images: HashMap<String, ImageAsset>,
    #[serde(default)]
    pub versions: Vec<Version>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImageAsset {
    pub uri: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// One version of a recipe.
///
/// Producers ship two shapes: the legacy one nests content under a `recipe`
/// field, the newer one puts the same fields directly on the version. Both
/// deserialize here; `normalize` resolves the precedence field by field.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub recipe: Option<VersionContent>,
    #[serde(flatten)]
    pub flat: VersionContent,
}

/// The content fields of a version, at either nesting depth.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionContent {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_refs: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientGroup>>,
    #[serde(default)]
    pub instructions: Option<Vec<InstructionGroup>>,
    #[serde(default)]
    pub adjustments: Option<Vec<RawAdjustment>>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(default)]
    pub items: Vec<Ingredient>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<Quantity>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Quantity {
    #[serde(default)]
    pub value: Option<QuantityValue>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Quantity values appear both as JSON numbers and as free-form strings
/// ("1/2", "a pinch").
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum QuantityValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Number(n) => write!(f, "{}", n),
            QuantityValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionGroup {
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Step {
    pub text: String,
}

/// An adjustment as it appears on the wire. The step reference comes in two
/// producer spellings, `afterStep` and `stepNumber`; `afterStep` wins when
/// both are present.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawAdjustment {
    #[serde(default)]
    pub after_step: Option<u32>,
    #[serde(default)]
    pub step_number: Option<u32>,
    #[serde(default)]
    pub check_text: Option<String>,
    #[serde(default)]
    pub conditional_actions: Vec<ConditionalAction>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConditionalAction {
    pub condition: String,
    pub action: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    #[serde(default)]
    pub per_serving: Option<NutritionPerServing>,
}

/// Per-serving nutrition numbers. Every field is optional and rendered
/// individually; short producer names are accepted as aliases.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPerServing {
    #[serde(default, alias = "calories")]
    pub energy_kcal: Option<f64>,
    #[serde(default, alias = "protein")]
    pub protein_g: Option<f64>,
    #[serde(default, alias = "carbs")]
    pub carbs_g: Option<f64>,
    #[serde(default, alias = "fat")]
    pub fat_g: Option<f64>,
}
