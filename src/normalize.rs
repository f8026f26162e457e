//! Resolves the two producer JSON shapes into one canonical content view.
//!
//! Every content field is resolved independently with the same rule: prefer
//! the value nested under `version.recipe.*`, fall back to the flattened
//! `version.*` field. The ambiguity stops here; the renderer only ever sees
//! the canonical view.

use crate::model::{
    ConditionalAction, ImageAsset, IngredientGroup, InstructionGroup, NutritionPerServing,
    RawAdjustment, RecipeDocument, Version, VersionContent,
};

/// Canonical, render-ready view of one recipe version.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentView {
    pub title: String,
    pub subtitle: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    /// Resolved images in `imageRefs` order; refs with no matching image
    /// are dropped.
    pub images: Vec<ImageAsset>,
    pub ingredients: Vec<IngredientGroup>,
    pub instructions: Vec<InstructionGroup>,
    pub adjustments: Vec<Adjustment>,
    pub nutrition: Option<NutritionPerServing>,
}

/// An adjustment with the `afterStep`/`stepNumber` producer split resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub after_step_number: Option<u32>,
    pub check_text: Option<String>,
    pub conditional_actions: Vec<ConditionalAction>,
}

impl From<&RawAdjustment> for Adjustment {
    fn from(raw: &RawAdjustment) -> Self {
        Adjustment {
            // `afterStep` wins over `stepNumber` when both are present.
            after_step_number: raw.after_step.or(raw.step_number),
            check_text: raw.check_text.clone(),
            conditional_actions: raw.conditional_actions.clone(),
        }
    }
}

/// Pick the version to display: the one whose status is `"current"`, or the
/// first in the document's declared order when none is marked.
pub fn current_version(doc: &RecipeDocument) -> Option<&Version> {
    doc.versions
        .iter()
        .find(|v| v.status.as_deref() == Some("current"))
        .or_else(|| doc.versions.first())
}

fn resolve<'a, T: ?Sized, F>(version: &'a Version, get: F) -> Option<&'a T>
where
    F: Fn(&'a VersionContent) -> Option<&'a T>,
{
    version
        .recipe
        .as_ref()
        .and_then(&get)
        .or_else(|| get(&version.flat))
}

/// Project a document and one of its versions onto the canonical view.
/// Pure: same inputs always yield a structurally identical view.
pub fn normalize(doc: &RecipeDocument, version: &Version) -> ContentView {
    let description = resolve(version, |c| c.description.as_deref()).map(str::to_string);
    let image_refs = resolve(version, |c| c.image_refs.as_deref()).unwrap_or(&[]);
    let ingredients = resolve(version, |c| c.ingredients.as_deref())
        .unwrap_or(&[])
        .to_vec();
    let instructions = resolve(version, |c| c.instructions.as_deref())
        .unwrap_or(&[])
        .to_vec();
    let adjustments = resolve(version, |c| c.adjustments.as_deref())
        .unwrap_or(&[])
        .iter()
        .map(Adjustment::from)
        .collect();
    let nutrition = resolve(version, |c| c.nutrition.as_ref())
        .and_then(|n| n.per_serving.clone());

    // Survivor order follows the ref list, not the image mapping.
    let images = image_refs
        .iter()
        .filter_map(|r| doc.images.get(r))
        .cloned()
        .collect();

    ContentView {
        title: doc.meta.title.clone(),
        subtitle: doc.meta.subtitle.clone(),
        tags: doc.meta.tags.clone(),
        description,
        images,
        ingredients,
        instructions,
        adjustments,
        nutrition,
    }
}

/// Normalize the current version of a document, or `None` when the document
/// has no versions at all.
pub fn normalize_current(doc: &RecipeDocument) -> Option<ContentView> {
    current_version(doc).map(|version| normalize(doc, version))
}
