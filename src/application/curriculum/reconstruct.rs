//! Tree reconstruction from LOM classification data
//!
//! Both entry points build a brand-new tree; nothing from a previous tree is
//! reused. Types and names always come from the dictionary, never from the
//! records, because stored records may predate the current definition.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use super::{TermSource, DISCIPLINE_TYPE};
use crate::domain::{
    Classification, DomainResult, TaxonNode, TaxonTreeRecord, Term, TermArena, DEFAULT_PURPOSE,
};

const ROOT_KEY: &str = "root";

/// Build a tree from flat taxonomy paths, merging shared prefixes.
///
/// Each created term is memoised under `"<parent path key>:<id>"`, so two paths
/// with a common prefix share the prefix nodes. Discipline terms are the
/// exception when `purpose` is `"discipline"`: their key is salted with the
/// index of the path within its record (`"<index>-<id>"`), so every path keeps
/// its own discipline branch.
#[instrument(level = "debug", skip(source, records), fields(count = records.len()))]
pub fn tree_from_taxon_paths<S>(
    source: &S,
    records: &[Classification],
    purpose: &str,
) -> DomainResult<TermArena>
where
    S: TermSource + ?Sized,
{
    let mut tree = TermArena::with_root(Term::root(source.standard()));
    let Some(root) = tree.root() else {
        return Ok(tree);
    };
    let mut registry: HashMap<String, Index> = HashMap::new();
    let salt_disciplines = purpose == DEFAULT_PURPOSE;

    for record in records.iter().filter(|r| r.purpose.value == purpose) {
        for (path_index, path) in record.taxon_path.iter().enumerate() {
            if !source.recognizes_source(&path.source) {
                trace!("skipping path from source {}", path.source);
                continue;
            }

            let mut parent = root;
            let mut parent_key = ROOT_KEY.to_string();
            for taxon in &path.taxon {
                let id = source.resolve_identifier(&taxon.id);
                let term_type = source.term_type(&id);
                let key_id = if salt_disciplines && term_type == DISCIPLINE_TYPE {
                    format!("{path_index}-{id}")
                } else {
                    id.clone()
                };
                let key = format!("{parent_key}:{key_id}");

                let idx = match registry.get(&key) {
                    Some(&existing) => existing,
                    None => {
                        let term = source.term_factory(&term_type, &id, source.term_name(&id));
                        let created = tree.insert_detached(term);
                        registry.insert(key.clone(), created);
                        created
                    }
                };

                if !tree.contains_child(parent, idx) {
                    tree.add_child(parent, idx)?;
                }
                parent = idx;
                parent_key = key;
            }
        }
    }

    debug!("tree_from_taxon_paths: {} terms", tree.len());
    Ok(tree)
}

/// Build a tree from nested taxonomy trees; one fresh term per node.
#[instrument(level = "debug", skip(source, records), fields(count = records.len()))]
pub fn tree_from_taxon_trees<S>(source: &S, records: &[TaxonTreeRecord]) -> DomainResult<TermArena>
where
    S: TermSource + ?Sized,
{
    let mut tree = TermArena::with_root(Term::root(source.standard()));
    let Some(root) = tree.root() else {
        return Ok(tree);
    };

    for record in records {
        if !source.recognizes_source(&record.source) {
            trace!("skipping tree from source {}", record.source);
            continue;
        }
        for node in &record.taxon_tree {
            attach_taxon(source, &mut tree, root, node)?;
        }
    }

    debug!("tree_from_taxon_trees: {} terms", tree.len());
    Ok(tree)
}

fn attach_taxon<S>(
    source: &S,
    tree: &mut TermArena,
    parent: Index,
    node: &TaxonNode,
) -> DomainResult<()>
where
    S: TermSource + ?Sized,
{
    let id = source.resolve_identifier(&node.id);
    let term = source.term_factory(&source.term_type(&id), &id, source.term_name(&id));
    let idx = tree.append_term(parent, term)?;
    for child in &node.child_taxons {
        attach_taxon(source, tree, idx, child)?;
    }
    Ok(())
}
