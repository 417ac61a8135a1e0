//! Navigation over a hand-built term tree

use dsb_client::domain::{DomainError, LangString, Standard, Term, TermArena};
use dsb_client::util::testing;
use generational_arena::Index;

fn term(term_type: &str, id: &str) -> Term {
    Term::new(Standard::Educa, term_type, id, None)
}

/// root → languages → (french, german), root → maths
fn sample_tree() -> (TermArena, [Index; 5]) {
    let mut tree = TermArena::with_root(Term::root(Standard::Educa));
    let root = tree.root().unwrap();
    let languages = tree.append_term(root, term("discipline", "languages")).unwrap();
    let french = tree.append_term(languages, term("discipline", "french")).unwrap();
    let german = tree.append_term(languages, term("discipline", "german")).unwrap();
    let maths = tree.append_term(root, term("discipline", "maths")).unwrap();
    (tree, [root, languages, french, german, maths])
}

// ============================================================
// Structural invariants
// ============================================================

#[test]
fn given_built_tree_when_walking_children_then_each_child_points_back_to_parent() {
    testing::init_test_setup();
    let (tree, _) = sample_tree();

    for (idx, node) in tree.iter() {
        for &child in &node.children {
            assert_eq!(tree.parent(child), Ok(idx), "{}", node.term);
        }
    }
}

#[test]
fn given_built_tree_when_walking_siblings_then_links_match_child_order() {
    let (tree, _) = sample_tree();

    for (_, node) in tree.iter() {
        for pair in node.children.windows(2) {
            assert_eq!(tree.next_sibling(pair[0]), Ok(pair[1]));
            assert_eq!(tree.prev_sibling(pair[1]), Ok(pair[0]));
        }
        if let (Some(&first), Some(&last)) = (node.children.first(), node.children.last()) {
            assert!(!tree.has_prev_sibling(first));
            assert!(!tree.has_next_sibling(last));
        }
    }
}

// ============================================================
// Has/get pairs
// ============================================================

#[test]
fn given_leaf_term_when_adding_child_then_children_becomes_available() {
    // Arrange
    let mut tree = TermArena::with_root(Term::root(Standard::Educa));
    let root = tree.root().unwrap();
    let leaf = tree.append_term(root, term("discipline", "music")).unwrap();
    assert!(!tree.has_children(leaf));
    assert_eq!(
        tree.children(leaf),
        Err(DomainError::NoChildren {
            id: "music".to_string()
        })
    );

    // Act
    let child = tree.insert_detached(term("discipline", "singing"));
    tree.add_child(leaf, child).unwrap();

    // Assert
    assert!(tree.has_children(leaf));
    assert_eq!(tree.children(leaf).unwrap(), &[child]);
    assert_eq!(tree.parent(child), Ok(leaf));
}

#[test]
fn given_root_when_navigating_upwards_then_distinct_errors() {
    let (tree, [root, ..]) = sample_tree();

    assert!(tree.is_root(root));
    assert!(!tree.has_parent(root));
    assert!(matches!(tree.parent(root), Err(DomainError::NoParent { .. })));
    assert!(matches!(tree.get_root(root), Err(DomainError::IsRoot { .. })));
}

#[test]
fn given_nested_term_when_getting_root_then_topmost_ancestor() {
    let (tree, [root, _, french, ..]) = sample_tree();

    assert_eq!(tree.get_root(french), Ok(root));
    assert_eq!(tree.node_depth(french), 2);
}

#[test]
fn given_edge_children_when_asking_for_missing_siblings_then_errors() {
    let (tree, [_, languages, french, german, maths]) = sample_tree();

    assert_eq!(
        tree.prev_sibling(french),
        Err(DomainError::NoPrevSibling {
            id: "french".to_string()
        })
    );
    assert_eq!(
        tree.next_sibling(german),
        Err(DomainError::NoNextSibling {
            id: "german".to_string()
        })
    );
    assert_eq!(tree.next_sibling(languages), Ok(maths));
}

#[test]
fn given_attached_term_when_adding_again_then_invalid_attachment() {
    let (mut tree, [root, languages, french, ..]) = sample_tree();

    assert!(matches!(
        tree.add_child(root, french),
        Err(DomainError::InvalidAttachment { .. })
    ));
    // Attached terms are never moved.
    let orphan = tree.insert_detached(term("discipline", "orphan"));
    tree.add_child(orphan, languages).unwrap_err();
    assert!(tree.contains_child(root, languages));

    // Nor can a term become its own ancestor.
    tree.add_child(orphan, orphan).unwrap_err();
}

// ============================================================
// Searches
// ============================================================

#[test]
fn given_identifier_when_searching_then_direct_and_recursive_lookups_differ() {
    let (tree, [root, languages, french, ..]) = sample_tree();

    assert_eq!(tree.find_child_by_identifier(root, "languages"), Some(languages));
    assert_eq!(tree.find_child_by_identifier(root, "french"), None);
    assert_eq!(
        tree.find_child_by_identifier_recursive(root, "french"),
        Some(french)
    );
}

#[test]
fn given_localized_names_when_searching_by_name_then_any_language_matches() {
    // Arrange
    let mut tree = TermArena::with_root(Term::root(Standard::Educa));
    let root = tree.root().unwrap();
    let named = Term::new(
        Standard::Educa,
        "discipline",
        "french",
        Some(LangString::localized([
            ("de", "Französisch"),
            ("fr", "Français"),
        ])),
    );
    let french = tree.append_term(root, named).unwrap();
    let grammar = Term::new(
        Standard::Educa,
        "discipline",
        "grammar",
        Some(LangString::plain("grammar")),
    );
    let nested = tree.append_term(french, grammar).unwrap();

    // Act
    let direct = tree.find_children_by_name(root, "Français");
    let recursive = tree.find_children_by_name_recursive(root, "grammar");

    // Assert
    assert_eq!(direct, vec![french]);
    assert_eq!(recursive, vec![nested]);
    assert!(tree.find_children_by_name(root, "Deutsch").is_empty());
    assert!(tree.find_children_by_name(root, "grammar").is_empty());
}

#[test]
fn given_tree_when_collecting_leaves_then_left_to_right() {
    let (tree, [_, _, french, german, maths]) = sample_tree();

    assert_eq!(tree.leaf_nodes(), vec![french, german, maths]);
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.len(), 5);
}

#[test]
fn given_detached_subtree_when_pruning_then_only_reachable_terms_remain() {
    let (mut tree, _) = sample_tree();
    let stub = tree.insert_detached(term("placeholder", "ghost"));
    let child = tree.insert_detached(term("discipline", "haunted"));
    tree.add_child(stub, child).unwrap();

    let removed = tree.prune_detached();

    assert_eq!(removed, 2);
    assert_eq!(tree.len(), 5);
    assert!(tree.get_node(stub).is_none());
}
