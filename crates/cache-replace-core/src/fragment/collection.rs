//! Collection expansion

use super::literal::replace_all;
use crate::error::Result;
use crate::instruction::CollectionMap;
use crate::marker::marker;

/// Build one copy of `original` per item, substituted with that item's values
pub(super) fn expand<T>(
    original: &str,
    items: &[T],
    map: &CollectionMap<'_, T>,
) -> Result<String> {
    // Markers are the same for every item
    let needles: Vec<String> = map.keys().map(marker).collect();
    let mut html = String::new();

    for (index, item) in items.iter().enumerate() {
        let values = map.resolve(item)?;
        let mut item_fragment = original.to_string();

        for (needle, (_, value)) in needles.iter().zip(values.iter()) {
            replace_all(&mut item_fragment, needle, value);
        }

        tracing::trace!(index, "expanded collection item");
        html.push_str(&item_fragment);
    }

    tracing::debug!(items = items.len(), keys = needles.len(), "expanded collection");
    Ok(html)
}
