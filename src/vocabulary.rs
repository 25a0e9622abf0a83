//! Synset hierarchies and term relatedness.
//!
//! A [`VocabularyGraph`] is built once from a synset relation and a hypernym
//! relation, validated as a rooted DAG, and then only read. Every query runs
//! against the frozen graph, so a built vocabulary can be shared freely across
//! threads behind a plain reference or an `Arc`.
//!
//! # Examples
//!
//! ```
//! use lexnet::vocabulary::VocabularyGraph;
//!
//! let synsets = "0,animal,a living organism\n\
//!                1,horse Equus_caballus,a hoofed mammal\n\
//!                2,zebra,a striped equine\n";
//! let hypernyms = "1,0\n2,0\n";
//!
//! let graph = VocabularyGraph::build(synsets.as_bytes(), hypernyms.as_bytes()).unwrap();
//! assert!(graph.is_known_term("Equus_caballus"));
//! assert_eq!(graph.distance("horse", "zebra").unwrap(), 2);
//! assert_eq!(graph.ancestor_gloss("horse", "zebra").unwrap(), "animal");
//! ```

pub mod config;
pub mod parser;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{LexnetError, Result};
use crate::graph::{Digraph, DirectedCycle};
use crate::sap::Sap;

pub use config::VocabularyConfig;
pub use parser::{HypernymRecord, RecordFormat, SynsetRecord};

/// A concept group: one vertex of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    id: usize,
    terms: Vec<String>,
    gloss: String,
    definition: String,
}

impl Synset {
    fn from_record(record: SynsetRecord) -> Self {
        let gloss = record.terms.join(" ");
        Synset {
            id: record.id,
            terms: record.terms,
            gloss,
            definition: record.definition,
        }
    }

    /// Vertex id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Member terms in input order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Member terms joined by single spaces.
    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    /// Free text following the term field in the input record.
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

/// How two terms are related through their nearest common ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relatedness {
    pub term_a: String,
    pub term_b: String,
    pub distance: usize,
    pub ancestor: usize,
    pub gloss: String,
    /// Synset ids from the nearest synset of `term_a` up to the ancestor.
    pub path_a: Vec<usize>,
    /// Synset ids from the nearest synset of `term_b` up to the ancestor.
    pub path_b: Vec<usize>,
}

/// Summary figures for a loaded vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub synsets: usize,
    pub terms: usize,
    pub hypernym_edges: usize,
    pub root: usize,
    pub root_gloss: String,
}

/// A validated, immutable synset hierarchy with a term index.
#[derive(Debug, Clone)]
pub struct VocabularyGraph {
    synsets: Vec<Synset>,
    index: AHashMap<String, Vec<usize>>,
    root: usize,
    sap: Sap,
}

impl VocabularyGraph {
    /// Build from two readers using the default comma/space record format.
    pub fn build<S: BufRead, H: BufRead>(synsets: S, hypernyms: H) -> Result<Self> {
        Self::build_with_format(synsets, hypernyms, &RecordFormat::default())
    }

    /// Build from the two relation files using the default record format.
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(synsets: P, hypernyms: Q) -> Result<Self> {
        Self::open(&VocabularyConfig::new(
            synsets.as_ref(),
            hypernyms.as_ref(),
        ))
    }

    /// Build from the files named by `config`.
    pub fn open(config: &VocabularyConfig) -> Result<Self> {
        let synsets = open_relation(&config.synsets, "synsets")?;
        let hypernyms = open_relation(&config.hypernyms, "hypernyms")?;
        Self::build_with_format(synsets, hypernyms, &config.format)
    }

    /// Build from two readers in the given record format.
    ///
    /// Fails with a configuration error if either relation is malformed, if
    /// synset ids are not exactly `0..N` in input order, if a hypernym record
    /// names an id outside `0..N`, if the hypernym relation has a cycle, or if
    /// the hierarchy does not have exactly one root.
    pub fn build_with_format<S: BufRead, H: BufRead>(
        synsets: S,
        hypernyms: H,
        format: &RecordFormat,
    ) -> Result<Self> {
        format.validate()?;
        let records = format.read_synsets(synsets)?;

        let mut table = Vec::with_capacity(records.len());
        let mut index: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (position, record) in records.into_iter().enumerate() {
            if record.id != position {
                return Err(LexnetError::config(format!(
                    "synset ids must be contiguous from 0: record {position} has id {}",
                    record.id
                )));
            }
            for term in &record.terms {
                let ids = index.entry(term.clone()).or_default();
                if ids.last() != Some(&record.id) {
                    ids.push(record.id);
                }
            }
            table.push(Synset::from_record(record));
        }

        let mut digraph = Digraph::new(table.len());
        for record in format.read_hypernyms(hypernyms)? {
            for &parent in &record.parents {
                digraph.add_edge(record.id, parent).map_err(|_| {
                    LexnetError::config(format!(
                        "hypernym edge {} -> {parent} references a synset outside 0..{}",
                        record.id,
                        table.len()
                    ))
                })?;
            }
            if record.parents.is_empty() && record.id >= table.len() {
                return Err(LexnetError::config(format!(
                    "hypernym record names synset {} outside 0..{}",
                    record.id,
                    table.len()
                )));
            }
        }

        let root = validate_rooted_dag(&digraph)?;
        let sap = Sap::new(digraph).map_err(|e| LexnetError::config(e.to_string()))?;

        info!(
            "loaded vocabulary: {} synsets, {} terms, {} hypernym edges, root {}",
            table.len(),
            index.len(),
            sap.digraph().edge_count(),
            root
        );

        Ok(VocabularyGraph {
            synsets: table,
            index,
            root,
            sap,
        })
    }

    /// Whether `term` belongs to some synset. Matching is case-sensitive.
    pub fn is_known_term(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Every distinct term, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.index.len()
    }

    /// Number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// The synset with vertex id `id`.
    pub fn synset(&self, id: usize) -> Option<&Synset> {
        self.synsets.get(id)
    }

    /// Ids of every synset containing `term`, in input order.
    pub fn synsets_of(&self, term: &str) -> Option<&[usize]> {
        self.index.get(term).map(Vec::as_slice)
    }

    /// The unique synset with no hypernym.
    pub fn root(&self) -> &Synset {
        &self.synsets[self.root]
    }

    /// The hypernym digraph.
    pub fn digraph(&self) -> &Digraph {
        self.sap.digraph()
    }

    /// The shortest-ancestral-path engine over the hypernym digraph.
    pub fn sap(&self) -> &Sap {
        &self.sap
    }

    /// Summary figures.
    pub fn stats(&self) -> VocabularyStats {
        VocabularyStats {
            synsets: self.synset_count(),
            terms: self.term_count(),
            hypernym_edges: self.digraph().edge_count(),
            root: self.root,
            root_gloss: self.root().gloss().to_string(),
        }
    }

    /// Length of the shortest ancestral path between any synset of `term_a`
    /// and any synset of `term_b`.
    pub fn distance(&self, term_a: &str, term_b: &str) -> Result<usize> {
        let (ids_a, ids_b) = self.lookup_pair(term_a, term_b)?;
        let found = self.sap.query_sets(ids_a.iter().copied(), ids_b.iter().copied())?;
        found
            .length
            .ok_or_else(|| self.unreachable_ancestor(term_a, term_b))
    }

    /// Gloss of the common ancestor on a shortest ancestral path between the
    /// two terms.
    pub fn ancestor_gloss(&self, term_a: &str, term_b: &str) -> Result<&str> {
        let (ids_a, ids_b) = self.lookup_pair(term_a, term_b)?;
        let found = self.sap.query_sets(ids_a.iter().copied(), ids_b.iter().copied())?;
        let ancestor = found
            .ancestor
            .ok_or_else(|| self.unreachable_ancestor(term_a, term_b))?;
        Ok(self.synsets[ancestor].gloss())
    }

    /// Distance, ancestor and both paths for a pair of terms.
    pub fn relatedness(&self, term_a: &str, term_b: &str) -> Result<Relatedness> {
        let (ids_a, ids_b) = self.lookup_pair(term_a, term_b)?;
        let route = self
            .sap
            .route_sets(ids_a.iter().copied(), ids_b.iter().copied())?
            .ok_or_else(|| self.unreachable_ancestor(term_a, term_b))?;

        Ok(Relatedness {
            term_a: term_a.to_string(),
            term_b: term_b.to_string(),
            distance: route.length,
            ancestor: route.ancestor,
            gloss: self.synsets[route.ancestor].gloss().to_string(),
            path_a: route.from_v,
            path_b: route.from_w,
        })
    }

    fn lookup(&self, term: &str) -> Result<&[usize]> {
        self.synsets_of(term)
            .ok_or_else(|| LexnetError::invalid_argument(format!("unknown term: {term:?}")))
    }

    fn lookup_pair(&self, term_a: &str, term_b: &str) -> Result<(&[usize], &[usize])> {
        Ok((self.lookup(term_a)?, self.lookup(term_b)?))
    }

    // Every synset reaches the single root, so this only fires on a broken invariant.
    fn unreachable_ancestor(&self, term_a: &str, term_b: &str) -> LexnetError {
        LexnetError::internal(format!(
            "no common ancestor for {term_a:?} and {term_b:?} in a rooted hierarchy"
        ))
    }
}

fn open_relation(path: &Path, relation: &str) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        LexnetError::config(format!("cannot read {relation} relation {}: {e}", path.display()))
    })?;
    Ok(BufReader::new(file))
}

/// Check that `digraph` is acyclic with exactly one sink, and return the sink.
fn validate_rooted_dag(digraph: &Digraph) -> Result<usize> {
    if let Some(cycle) = DirectedCycle::new(digraph).cycle() {
        return Err(LexnetError::config(format!(
            "hypernym relation contains a cycle: {cycle:?}"
        )));
    }

    match digraph.sinks().as_slice() {
        [root] => Ok(*root),
        [] => Err(LexnetError::config("hierarchy has no root synset")),
        roots => Err(LexnetError::config(format!(
            "hierarchy has {} root synsets, expected exactly one: {:?}",
            roots.len(),
            &roots[..roots.len().min(10)]
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    const SYNSETS: &str = "\
0,entity,that which exists
1,animal animate_being,a living organism
2,equine equid,hoofed mammals
3,horse Equus_caballus,solid-hoofed, herbivorous quadruped
4,zebra,striped equine
5,feline felid,cats
6,cat true_cat,small domesticated feline
7,table,a piece of furniture
8,bear,massive plantigrade mammal
9,cat,a spiteful woman gossip
";

    const HYPERNYMS: &str = "\
1,0
2,1
3,2
4,2
5,1
6,5
7,0
8,1
9,0
";

    fn fixture() -> VocabularyGraph {
        VocabularyGraph::build(SYNSETS.as_bytes(), HYPERNYMS.as_bytes()).unwrap()
    }

    #[test]
    fn test_build() {
        let graph = fixture();
        assert_eq!(graph.synset_count(), 10);
        assert_eq!(graph.root().id(), 0);
        assert_eq!(graph.root().gloss(), "entity");
        assert_eq!(graph.digraph().edge_count(), 9);
        assert_eq!(
            graph.synset(3).unwrap().definition(),
            "solid-hoofed, herbivorous quadruped"
        );
        assert_eq!(graph.synset(3).unwrap().gloss(), "horse Equus_caballus");
    }

    #[test]
    fn test_term_index() {
        let graph = fixture();
        assert!(graph.is_known_term("Equus_caballus"));
        assert!(!graph.is_known_term("equus_caballus"));
        assert_eq!(graph.synsets_of("cat"), Some(&[6, 9][..]));

        let terms: Vec<&str> = graph.terms().collect();
        let unique: HashSet<&str> = terms.iter().copied().collect();
        assert_eq!(terms.len(), unique.len());
        assert_eq!(terms.len(), graph.term_count());
        assert!(unique.contains("true_cat"));
    }

    #[test]
    fn test_distance_and_gloss() {
        let graph = fixture();
        assert_eq!(graph.distance("horse", "zebra").unwrap(), 2);
        assert_eq!(graph.ancestor_gloss("horse", "zebra").unwrap(), "equine equid");
        assert_eq!(graph.distance("horse", "bear").unwrap(), 3);
        assert_eq!(graph.ancestor_gloss("horse", "bear").unwrap(), "animal animate_being");
        assert_eq!(graph.distance("zebra", "table").unwrap(), 4);
    }

    #[test]
    fn test_polysemous_term_uses_nearest_synset() {
        let graph = fixture();
        // cat(9) -> entity is 1 edge; cat(6) -> feline -> animal -> entity is 3.
        assert_eq!(graph.distance("cat", "table").unwrap(), 2);
        assert_eq!(graph.distance("cat", "bear").unwrap(), 3);
        assert_eq!(graph.distance("cat", "cat").unwrap(), 0);
        assert_eq!(graph.ancestor_gloss("cat", "cat").unwrap(), "cat true_cat");
    }

    #[test]
    fn test_relatedness() {
        let graph = fixture();
        let r = graph.relatedness("zebra", "horse").unwrap();
        assert_eq!(r.distance, 2);
        assert_eq!(r.ancestor, 2);
        assert_eq!(r.path_a, vec![4, 2]);
        assert_eq!(r.path_b, vec![3, 2]);

        // entity and animal tie at length 4; the lower id wins.
        let r = graph.relatedness("zebra", "cat").unwrap();
        assert_eq!(r.distance, 4);
        assert_eq!(r.ancestor, 0);
        assert_eq!(r.gloss, "entity");
        assert_eq!(r.path_a, vec![4, 2, 1, 0]);
        assert_eq!(r.path_b, vec![9, 0]);
    }

    #[test]
    fn test_unknown_terms() {
        let graph = fixture();
        assert!(graph.distance("horse", "unicorn").unwrap_err().is_invalid_argument());
        assert!(graph.ancestor_gloss("unicorn", "horse").unwrap_err().is_invalid_argument());
        assert!(graph.relatedness("Horse", "horse").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_rejects_cycle() {
        let err = VocabularyGraph::build(SYNSETS.as_bytes(), "1,0\n2,1\n1,2\n".as_bytes())
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_rejects_root_count() {
        let synsets = "0,a\n1,b\n2,c\n";
        let two_roots = VocabularyGraph::build(synsets.as_bytes(), "2,0\n".as_bytes());
        assert!(two_roots.unwrap_err().is_config());

        let no_edges = VocabularyGraph::build(synsets.as_bytes(), "".as_bytes());
        assert!(no_edges.unwrap_err().is_config());

        let empty = VocabularyGraph::build("".as_bytes(), "".as_bytes());
        assert!(empty.unwrap_err().is_config());
    }

    #[test]
    fn test_rejects_out_of_range_ids() {
        let synsets = "0,a\n1,b\n";
        let bad_parent = VocabularyGraph::build(synsets.as_bytes(), "1,2\n".as_bytes());
        assert!(bad_parent.unwrap_err().is_config());

        let bad_child = VocabularyGraph::build(synsets.as_bytes(), "1,0\n5,0\n".as_bytes());
        assert!(bad_child.unwrap_err().is_config());

        let lonely = VocabularyGraph::build(synsets.as_bytes(), "1,0\n5\n".as_bytes());
        assert!(lonely.unwrap_err().is_config());
    }

    #[test]
    fn test_rejects_gaps_in_ids() {
        let built = VocabularyGraph::build("0,a\n2,b\n".as_bytes(), "2,0\n".as_bytes());
        assert!(built.unwrap_err().is_config());
    }

    #[test]
    fn test_rejects_equal_delimiters() {
        let format = RecordFormat {
            field_delimiter: ' ',
            term_delimiter: ' ',
        };
        let err = VocabularyGraph::build_with_format(
            "0 entity thing\n".as_bytes(),
            "".as_bytes(),
            &format,
        )
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_stats() {
        let stats = fixture().stats();
        assert_eq!(stats.synsets, 10);
        assert_eq!(stats.hypernym_edges, 9);
        assert_eq!(stats.root, 0);
        assert_eq!(stats.root_gloss, "entity");
        // entity animal animate_being equine equid horse Equus_caballus zebra
        // feline felid cat true_cat table bear
        assert_eq!(stats.terms, 14);
    }
}
