use petgraph::stable_graph::NodeIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ud2ccg_category::{CategoryStore, Identity};
use ud2ccg_protocol::{SentenceRecord, TokenIndex, TokenRecord, UniversalPos};
use ud2ccg_tree::DependencyTree;

use super::*;
use crate::binarize::binarize;
use crate::btree::BinaryTree;
use crate::obliqueness::{ObliquenessEntry, ObliquenessTable};

struct Derived {
    btree: BinaryTree,
    store: CategoryStore,
}

impl Derived {
    fn leaf(&self, index: usize) -> NodeIndex {
        self.btree
            .leaves()
            .into_iter()
            .find(|leaf| self.btree.node(*leaf).index() == TokenIndex(index))
            .unwrap()
    }

    fn category_id(&self, index: usize) -> CatId {
        self.btree.node(self.leaf(index)).category.unwrap()
    }

    fn category(&self, index: usize) -> String {
        self.store.render(self.category_id(index))
    }

    fn type_changed(&self) -> NodeIndex {
        let root = self.btree.root().unwrap();
        self.btree
            .descendants(root)
            .into_iter()
            .find(|node| self.btree.node(*node).category_tc.is_some())
            .unwrap()
    }
}

fn derive_with(tokens: Vec<TokenRecord>, table: &ObliquenessTable) -> Derived {
    let sentence = SentenceRecord { sent_id: "r".to_string(), text: None, tokens };
    let tree = DependencyTree::from_sentence(&sentence).unwrap();
    let mut btree = binarize(&tree, table);
    let mut store = CategoryStore::standalone();
    let mut rng = StdRng::seed_from_u64(7);

    let mut ctx = RuleContext {
        tree: &tree,
        btree: &mut btree,
        store: &mut store,
        rng: &mut rng,
    };
    apply_rules(&mut ctx);
    Derived { btree, store }
}

fn derive(tokens: Vec<TokenRecord>) -> Derived {
    derive_with(tokens, &ObliquenessTable::default())
}

fn dogs_bark_loudly() -> Vec<TokenRecord> {
    vec![
        TokenRecord::basic(1, "Dogs", UniversalPos::Noun, 2, "nsubj"),
        TokenRecord::basic(2, "bark", UniversalPos::Verb, 0, "root"),
        TokenRecord::basic(3, "loudly", UniversalPos::Adv, 2, "advmod"),
    ]
}

#[test]
fn test_rule_selection() {
    assert_eq!(Rule::for_label("root"), Rule::Root);
    assert_eq!(Rule::for_label("xcomp"), Rule::Complement);
    assert_eq!(Rule::for_label("scop"), Rule::Copula);
    assert_eq!(Rule::for_label("punct2"), Rule::Modifier);
    assert_eq!(Rule::for_label("acl:relcl"), Rule::RelativeClause);
    assert_eq!(Rule::for_label("acl"), Rule::ClausalModifier);
    assert_eq!(Rule::for_label("ref-obj"), Rule::RelativePronoun);
    assert_eq!(Rule::for_label("nsubj"), Rule::Default);
    assert_eq!(Rule::for_label("made-up"), Rule::Default);
}

#[test]
fn test_slash_directions() {
    assert_eq!(argument_slash(TokenIndex(2), TokenIndex(1)), Slash::Backward);
    assert_eq!(argument_slash(TokenIndex(2), TokenIndex(3)), Slash::Forward);
    assert_eq!(modifier_slash(TokenIndex(2), TokenIndex(1)), Slash::Forward);
    assert_eq!(modifier_slash(TokenIndex(2), TokenIndex(3)), Slash::Backward);
}

#[test]
fn test_verb_phrase_modifier() {
    let derived = derive(dogs_bark_loudly());

    assert_eq!(derived.category(0), "ROOT");
    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "S\\NP");
    assert_eq!(derived.category(3), "(S\\NP)\\(S\\NP)");

    // The modifier's own identity is fresh
    let store = &derived.store;
    let loudly = derived.category_id(3);
    let modified = store.right(loudly).unwrap();
    assert_eq!(modified, derived.category_id(2));
    assert_ne!(store.identity(loudly), store.identity(modified));
    assert_ne!(store.identity(loudly), store.identity(store.left(loudly).unwrap()));
}

#[test]
fn test_subject_attached_first_gives_sentence_modifier() {
    let table = ObliquenessTable::from_entries([
        ObliquenessEntry { name: "nsubj".to_string(), priority: 1 },
        ObliquenessEntry { name: "advmod".to_string(), priority: 2 },
        ObliquenessEntry { name: "root".to_string(), priority: 3 },
    ])
    .unwrap();
    let derived = derive_with(dogs_bark_loudly(), &table);

    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "S\\NP");
    assert_eq!(derived.category(3), "S\\S");
}

#[test]
fn test_subjectless_root_is_open_clause() {
    let derived = derive(vec![TokenRecord::basic(1, "Run", UniversalPos::Verb, 0, "root")]);

    let category = derived.category_id(1);
    assert_eq!(derived.store.render(category), "S|NP");
    let result = derived.store.left(category).unwrap();
    assert_eq!(derived.store.identity(category), derived.store.identity(result));
}

#[test]
fn test_lone_punctuation_root_is_nominal() {
    let derived = derive(vec![TokenRecord::basic(1, "!", UniversalPos::Punct, 0, "root")]);
    assert_eq!(derived.category(1), "NP");
}

#[test]
fn test_copula_shares_subject_slot() {
    let derived = derive(vec![
        TokenRecord::basic(1, "She", UniversalPos::Pron, 3, "nsubj"),
        TokenRecord::basic(2, "is", UniversalPos::Aux, 3, "cop"),
        TokenRecord::basic(3, "happy", UniversalPos::Adj, 0, "root"),
    ]);
    let store = &derived.store;

    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "(S\\NP)/(S|NP)");
    assert_eq!(derived.category(3), "S|NP");

    let copula = derived.category_id(2);
    let phrase = store.left(copula).unwrap();
    let predicate = derived.category_id(3);
    assert_eq!(
        store.identity(store.right(predicate).unwrap()),
        store.identity(store.right(phrase).unwrap())
    );
}

#[test]
fn test_coordination_tags_each_conjunct() {
    let derived = derive(vec![
        TokenRecord::basic(1, "cats", UniversalPos::Noun, 0, "root"),
        TokenRecord::basic(2, "and", UniversalPos::Cconj, 3, "cc"),
        TokenRecord::basic(3, "dogs", UniversalPos::Noun, 1, "conj"),
    ]);

    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "conj");
    assert_eq!(derived.category(3), "NP");
    assert_eq!(derived.category_id(1), derived.category_id(3));

    let tag = |index: usize| derived.btree.node(derived.leaf(index)).conjunct.clone().unwrap();
    assert_eq!(tag(1).relation, "conj:1-3");
    assert_eq!(tag(3).relation, "conj:1-3");
    assert_eq!(tag(2), tag(3));
}

#[test]
fn test_unmarked_adverbial_clause_is_type_changed() {
    let derived = derive(vec![
        TokenRecord::basic(1, "Dogs", UniversalPos::Noun, 2, "nsubj"),
        TokenRecord::basic(2, "bark", UniversalPos::Verb, 0, "root"),
        TokenRecord::basic(3, "sleeping", UniversalPos::Verb, 2, "advcl"),
    ]);
    let store = &derived.store;
    let clause = derived.btree.node(derived.type_changed());
    assert_eq!(derived.type_changed(), derived.leaf(3));

    assert_eq!(derived.category(3), "S|NP");
    let changed = clause.category_tc.unwrap();
    assert_eq!(store.render(changed), "(S\\NP)\\(S\\NP)");

    let original = clause.category.unwrap();
    assert_eq!(store.identity(original), store.identity(changed));
    assert_eq!(store.identity(store.left(original).unwrap()), store.identity(changed));
    assert_eq!(
        store.identity(store.right(original).unwrap()),
        store.identity(derived.category_id(2))
    );
}

#[test]
fn test_reduced_relative_clause_points_at_its_noun() {
    let derived = derive(vec![
        TokenRecord::basic(1, "man", UniversalPos::Noun, 0, "root")
            .with_enhanced(0, "root")
            .with_enhanced(3, "obj"),
        TokenRecord::basic(2, "I", UniversalPos::Pron, 3, "nsubj").with_enhanced(3, "nsubj"),
        TokenRecord::basic(3, "saw", UniversalPos::Verb, 1, "acl:relcl").with_enhanced(1, "acl:relcl"),
    ]);
    let store = &derived.store;
    let clause = derived.btree.node(derived.type_changed());

    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "NP");
    assert_eq!(derived.category(3), "(S|NP)\\NP");
    assert_eq!(store.render(clause.category_tc.unwrap()), "NP\\NP");

    let open = clause.category.unwrap();
    assert_eq!(store.render(open), "S|NP");
    let gap = store.right(open).unwrap();
    assert_eq!(store.identity(gap), Identity::Deferred(TokenIndex(1)));
}

#[test]
fn test_control_complement_shares_subject() {
    let derived = derive(vec![
        TokenRecord::basic(1, "She", UniversalPos::Pron, 2, "nsubj")
            .with_enhanced(2, "nsubj")
            .with_enhanced(4, "nsubj:xsubj"),
        TokenRecord::basic(2, "wants", UniversalPos::Verb, 0, "root").with_enhanced(0, "root"),
        TokenRecord::basic(3, "to", UniversalPos::Part, 4, "mark").with_enhanced(4, "mark"),
        TokenRecord::basic(4, "leave", UniversalPos::Verb, 2, "xcomp").with_enhanced(2, "xcomp"),
    ]);
    let store = &derived.store;

    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "(S\\NP)/(S|NP)");
    assert_eq!(derived.category(3), "(S|NP)/(S|NP)");
    assert_eq!(derived.category(4), "S|NP");

    let wants = derived.category_id(2);
    assert_eq!(store.right(store.left(wants).unwrap()), Some(derived.category_id(1)));
    let complement = store.right(wants).unwrap();
    assert_eq!(
        store.identity(store.right(complement).unwrap()),
        Identity::Deferred(TokenIndex(1))
    );

    // The marker passes the complement's identity down to the verb
    let to = derived.category_id(3);
    let leave = derived.category_id(4);
    assert_eq!(store.left(to), Some(complement));
    assert_eq!(store.right(to), Some(leave));
    assert_eq!(store.identity(leave), store.identity(complement));
    assert_eq!(
        store.identity(store.right(leave).unwrap()),
        Identity::Deferred(TokenIndex(1))
    );
}

#[test]
fn test_relative_pronoun_takes_clause_with_gap() {
    let derived = derive(vec![
        TokenRecord::basic(1, "man", UniversalPos::Noun, 0, "root")
            .with_enhanced(0, "root")
            .with_enhanced(3, "nsubj"),
        TokenRecord::basic(2, "who", UniversalPos::Pron, 3, "ref-nsubj").with_enhanced(1, "ref"),
        TokenRecord::basic(3, "left", UniversalPos::Verb, 1, "acl:relcl").with_enhanced(1, "acl:relcl"),
    ]);
    let store = &derived.store;

    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "(NP\\NP)/(S|NP)");
    assert_eq!(derived.category(3), "S|NP");

    let who = derived.category_id(2);
    let clause = derived.category_id(3);
    let modifier = store.left(who).unwrap();
    assert_eq!(store.right(who), Some(clause));
    assert_eq!(store.left(modifier), Some(derived.category_id(1)));
    assert_eq!(store.identity(clause), store.identity(modifier));
    assert_eq!(store.identity(store.left(clause).unwrap()), store.identity(modifier));
    assert_eq!(
        store.identity(store.right(clause).unwrap()),
        Identity::Deferred(TokenIndex(1))
    );

    // The pronoun makes the modifier lexical
    let root = derived.btree.root().unwrap();
    assert!(derived
        .btree
        .descendants(root)
        .into_iter()
        .all(|node| derived.btree.node(node).category_tc.is_none()));
}

#[test]
fn test_case_marked_modifier_shares_identity() {
    let derived = derive(vec![
        TokenRecord::basic(1, "sleep", UniversalPos::Verb, 0, "root"),
        TokenRecord::basic(2, "in", UniversalPos::Adp, 4, "case"),
        TokenRecord::basic(3, "the", UniversalPos::Det, 4, "det"),
        TokenRecord::basic(4, "house", UniversalPos::Noun, 1, "obl"),
    ]);
    let store = &derived.store;

    assert_eq!(derived.category(1), "S|NP");
    assert_eq!(derived.category(2), "((S|NP)\\(S|NP))/NP");
    assert_eq!(derived.category(3), "NP/NP");
    assert_eq!(derived.category(4), "NP");

    let adposition = derived.category_id(2);
    let house = derived.category_id(4);
    assert_eq!(store.right(adposition), Some(house));
    assert_eq!(store.identity(house), store.identity(store.left(adposition).unwrap()));
    assert_ne!(store.identity(adposition), store.identity(house));
}

#[test]
fn test_oblique_argument_is_prepositional_phrase() {
    let derived = derive(vec![
        TokenRecord::basic(1, "She", UniversalPos::Pron, 2, "nsubj"),
        TokenRecord::basic(2, "relies", UniversalPos::Verb, 0, "root"),
        TokenRecord::basic(3, "on", UniversalPos::Adp, 4, "case"),
        TokenRecord::basic(4, "him", UniversalPos::Pron, 2, "obl-ap"),
    ]);
    let store = &derived.store;

    assert_eq!(derived.category(1), "NP");
    assert_eq!(derived.category(2), "(S\\NP)/PP");
    assert_eq!(derived.category(3), "PP/NP");
    assert_eq!(derived.category(4), "NP");

    let phrase = store.right(derived.category_id(2)).unwrap();
    let on = derived.category_id(3);
    assert_eq!(store.left(on), Some(phrase));
    assert_eq!(store.identity(derived.category_id(4)), store.identity(phrase));
}

#[test]
fn test_nominal_modifier_falls_back_to_noun_phrase() {
    // A verb in object position gets no lexical NP of its own
    let derived = derive(vec![
        TokenRecord::basic(1, "Stop", UniversalPos::Verb, 0, "root"),
        TokenRecord::basic(2, "doing", UniversalPos::Verb, 1, "obj"),
        TokenRecord::basic(3, "of", UniversalPos::Adp, 4, "case"),
        TokenRecord::basic(4, "that", UniversalPos::Pron, 2, "nmod"),
    ]);
    let store = &derived.store;

    assert_eq!(derived.category(1), "(S|NP)/NP");
    assert_eq!(derived.category(2), "NP");
    assert_eq!(derived.category(3), "(NP\\NP)/NP");
    assert_eq!(derived.category(4), "NP");
    assert_eq!(store.right(derived.category_id(1)), Some(derived.category_id(2)));
}
