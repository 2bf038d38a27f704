/// Combination builder
///
/// Turns the current wardrobe contents into the ordered list of work items
/// for a generation batch. The enumeration is deterministic: outfit batches
/// are the row-major cross product (tops outer, bottoms inner) or one item
/// per dress, and the accessory batch is always a single work item carrying
/// the union of every registered accessory. Per-category accessory
/// permutations are deliberately not enumerated.

use super::wardrobe::{NamedItem, Wardrobe};

/// Which garment combinations the outfit phase generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitMode {
    /// Every top paired with every bottom
    TopBottom,
    /// One look per dress
    FullBody,
}

impl Default for OutfitMode {
    fn default() -> Self {
        OutfitMode::TopBottom
    }
}

/// One concrete generation request, minus the base subject image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    TopBottom { top: NamedItem, bottom: NamedItem },
    Dress { dress: NamedItem },
    Accessories { items: Vec<NamedItem> },
}

impl WorkItem {
    /// Stable slug built from the constituent item ids, used as the prefix
    /// of the owning job record's id.
    pub fn id_slug(&self) -> String {
        match self {
            WorkItem::TopBottom { top, bottom } => format!("{}-{}", top.id, bottom.id),
            WorkItem::Dress { dress } => format!("{}", dress.id),
            WorkItem::Accessories { items } => {
                let ids: Vec<String> = items.iter().map(|item| item.id.to_string()).collect();
                ids.join("-")
            }
        }
    }

    /// Display names of the constituent items, in combination order.
    pub fn item_names(&self) -> Vec<&str> {
        match self {
            WorkItem::TopBottom { top, bottom } => vec![top.name.as_str(), bottom.name.as_str()],
            WorkItem::Dress { dress } => vec![dress.name.as_str()],
            WorkItem::Accessories { items } => {
                items.iter().map(|item| item.name.as_str()).collect()
            }
        }
    }
}

/// A batch was requested without the items its mode needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsufficientInput {
    #[error("Add at least one top before generating")]
    NoTops,

    #[error("Add at least one bottom before generating")]
    NoBottoms,

    #[error("Add at least one dress before generating")]
    NoDresses,

    #[error("Add at least one accessory before generating")]
    NoAccessories,
}

/// Enumerate the outfit-phase work items for the selected mode.
///
/// `TopBottom` yields `tops × bottoms` items in row-major order (tops are
/// the outer loop); `FullBody` yields one item per dress in registry order.
pub fn outfit_batch(
    wardrobe: &Wardrobe,
    mode: OutfitMode,
) -> Result<Vec<WorkItem>, InsufficientInput> {
    use super::wardrobe::Category;

    match mode {
        OutfitMode::TopBottom => {
            let tops = wardrobe.items(Category::Top);
            let bottoms = wardrobe.items(Category::Bottom);

            if tops.is_empty() {
                return Err(InsufficientInput::NoTops);
            }
            if bottoms.is_empty() {
                return Err(InsufficientInput::NoBottoms);
            }

            let mut items = Vec::with_capacity(tops.len() * bottoms.len());
            for top in tops {
                for bottom in bottoms {
                    items.push(WorkItem::TopBottom {
                        top: top.clone(),
                        bottom: bottom.clone(),
                    });
                }
            }
            Ok(items)
        }
        OutfitMode::FullBody => {
            let dresses = wardrobe.items(Category::Dress);
            if dresses.is_empty() {
                return Err(InsufficientInput::NoDresses);
            }

            Ok(dresses
                .iter()
                .map(|dress| WorkItem::Dress {
                    dress: dress.clone(),
                })
                .collect())
        }
    }
}

/// Build the single accessory-phase work item carrying every registered
/// accessory.
pub fn accessory_batch(wardrobe: &Wardrobe) -> Result<Vec<WorkItem>, InsufficientInput> {
    let items: Vec<NamedItem> = wardrobe
        .accessory_items()
        .into_iter()
        .cloned()
        .collect();

    if items.is_empty() {
        return Err(InsufficientInput::NoAccessories);
    }

    Ok(vec![WorkItem::Accessories { items }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::wardrobe::{Category, ImageBlob};

    fn blob() -> ImageBlob {
        ImageBlob::new(vec![0xAB], "image/png")
    }

    fn pair_names(items: &[WorkItem]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|item| match item {
                WorkItem::TopBottom { top, bottom } => (top.name.clone(), bottom.name.clone()),
                _ => panic!("expected a top/bottom work item"),
            })
            .collect()
    }

    #[test]
    fn test_top_bottom_is_row_major_cross_product() {
        let mut wardrobe = Wardrobe::new();
        wardrobe.add_item(Category::Top, blob(), "A");
        wardrobe.add_item(Category::Top, blob(), "B");
        wardrobe.add_item(Category::Bottom, blob(), "X");
        wardrobe.add_item(Category::Bottom, blob(), "Y");

        let items = outfit_batch(&wardrobe, OutfitMode::TopBottom).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(
            pair_names(&items),
            [
                ("A".into(), "X".into()),
                ("A".into(), "Y".into()),
                ("B".into(), "X".into()),
                ("B".into(), "Y".into()),
            ]
        );
    }

    #[test]
    fn test_full_body_yields_one_item_per_dress() {
        let mut wardrobe = Wardrobe::new();
        wardrobe.add_item(Category::Dress, blob(), "red");
        wardrobe.add_item(Category::Dress, blob(), "blue");
        wardrobe.add_item(Category::Dress, blob(), "green");

        let items = outfit_batch(&wardrobe, OutfitMode::FullBody).unwrap();

        assert_eq!(items.len(), 3);
        let names: Vec<Vec<&str>> = items.iter().map(|i| i.item_names()).collect();
        assert_eq!(names, [["red"], ["blue"], ["green"]]);
    }

    #[test]
    fn test_missing_categories_are_insufficient_input() {
        let mut wardrobe = Wardrobe::new();
        assert_eq!(
            outfit_batch(&wardrobe, OutfitMode::TopBottom),
            Err(InsufficientInput::NoTops)
        );

        wardrobe.add_item(Category::Top, blob(), "tee");
        assert_eq!(
            outfit_batch(&wardrobe, OutfitMode::TopBottom),
            Err(InsufficientInput::NoBottoms)
        );

        assert_eq!(
            outfit_batch(&wardrobe, OutfitMode::FullBody),
            Err(InsufficientInput::NoDresses)
        );
    }

    #[test]
    fn test_accessory_batch_is_single_union_item() {
        let mut wardrobe = Wardrobe::new();
        wardrobe.add_item(Category::Shoes, blob(), "heels");
        wardrobe.add_item(Category::Hat, blob(), "fedora");
        wardrobe.add_item(Category::Necklace, blob(), "chain");

        let items = accessory_batch(&wardrobe).unwrap();

        assert_eq!(items.len(), 1);
        match &items[0] {
            WorkItem::Accessories { items } => assert_eq!(items.len(), 3),
            other => panic!("expected accessories, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_accessories_is_insufficient_input() {
        let wardrobe = Wardrobe::new();
        assert_eq!(
            accessory_batch(&wardrobe),
            Err(InsufficientInput::NoAccessories)
        );
    }

    #[test]
    fn test_id_slug_reflects_composition() {
        let mut wardrobe = Wardrobe::new();
        wardrobe.add_item(Category::Top, blob(), "tee");
        wardrobe.add_item(Category::Bottom, blob(), "jeans");

        let items = outfit_batch(&wardrobe, OutfitMode::TopBottom).unwrap();
        assert_eq!(items[0].id_slug(), "0-1");
    }
}
