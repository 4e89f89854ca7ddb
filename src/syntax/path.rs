use super::SyntaxArena;
use crate::types::{NodeId, Pos, Span};

/// Returns the node that encloses `[start, end)` inside `root` together with
/// all of its ancestors, innermost first, and whether the innermost node's
/// span equals the interval exactly.
///
/// An empty path means `root` does not contain the interval.
pub fn path_enclosing_interval(
    arena: &SyntaxArena,
    root: NodeId,
    start: Pos,
    end: Pos,
) -> (Vec<NodeId>, bool) {
    if !arena.span(root).contains(start, end) {
        return (Vec::new(), false);
    }

    let mut path = vec![root];
    let mut current = root;
    'descend: loop {
        for child in arena.children(current) {
            let span = arena.span(child);
            if span.is_valid() && span.contains(start, end) {
                path.push(child);
                current = child;
                continue 'descend;
            }
        }
        break;
    }

    let exact = arena.span(current) == Span::new(start, end);
    path.reverse();
    (path, exact)
}
