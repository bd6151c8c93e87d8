use crate::item::Item;

/// Depth-first, pre-order search of an item tree for the first item with
/// the given id. The root itself is a candidate.
pub fn search<'a>(root: &'a Item, id: &str) -> Option<&'a Item> {
    let mut frontier = vec![root];
    while let Some(next) = frontier.pop() {
        if next.id == id {
            return Some(next);
        }
        frontier.extend(next.items.iter().rev());
    }
    None
}
