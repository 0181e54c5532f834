use proptest::prelude::*;
use rulegrid_core::{Grid, Noun, Predicate, Property, Sentence, Symbol, Token};
use rulegrid_system_rules::{resolve, scan};

fn grid(layout: &str) -> Grid {
    Grid::parse(layout).expect("valid grid")
}

#[test]
fn baba_is_you_and_wall_is_push_populate_behaviors() {
    let sentences = scan(&grid(
        "baba is you .
         wall is push .
         . Baba . Wall",
    ));
    let resolution = resolve(&sentences);
    let behaviors = resolution.behaviors();

    assert!(behaviors.noun(Noun::Baba).you);
    assert!(behaviors.noun(Noun::Wall).push);
    assert!(!behaviors.noun(Noun::Baba).push);
    assert!(!behaviors.noun(Noun::Wall).you);
    assert!(resolution.conversions().is_empty());
}

#[test]
fn properties_accumulate_on_the_same_noun() {
    let sentences = scan(&grid(
        "lava is hot
         lava is push
         lava is sink",
    ));
    let lava = resolve(&sentences).behaviors().noun(Noun::Lava);
    assert!(lava.hot && lava.push && lava.sink);
    assert!(!lava.melt && !lava.you && !lava.win);
}

#[test]
fn rows_and_columns_are_both_read() {
    let sentences = scan(&grid(
        "baba is you
         is . .
         win . .",
    ));
    assert_eq!(
        sentences,
        vec![
            Sentence::new(Noun::Baba, Predicate::Property(Property::Win)),
            Sentence::new(Noun::Baba, Predicate::Property(Property::You)),
        ]
    );
}

#[test]
fn sentences_are_sorted_by_subject_word_then_object_word() {
    let sentences = scan(&grid(
        "rock is win
         baba is rock
         baba is flag",
    ));
    assert_eq!(
        sentences,
        vec![
            Sentence::new(Noun::Baba, Predicate::Noun(Noun::Flag)),
            Sentence::new(Noun::Baba, Predicate::Noun(Noun::Rock)),
            Sentence::new(Noun::Rock, Predicate::Property(Property::Win)),
        ]
    );
}

#[test]
fn word_order_differs_from_declaration_order() {
    let sentences = scan(&grid(
        "wall is push
         key is you
         baba is wall",
    ));
    let subjects: Vec<Noun> = sentences.iter().map(|sentence| sentence.subject).collect();
    assert_eq!(subjects, vec![Noun::Baba, Noun::Key, Noun::Wall]);
}

#[test]
fn text_behavior_is_push_regardless_of_sentences() {
    let resolution = resolve(&scan(&grid("baba is you")));
    assert!(resolution.behaviors().of(Symbol::Text(Token::Is)).push);
    assert!(resolution.behaviors().of(Symbol::noun(Noun::Baba)).push);
}

fn text_strategy() -> impl Strategy<Value = Symbol> {
    prop_oneof![
        Just(Symbol::Empty),
        Just(Symbol::is()),
        prop::sample::select(Noun::ALL.to_vec()).prop_map(Symbol::noun),
        prop::sample::select(Property::ALL.to_vec()).prop_map(Symbol::property),
    ]
}

proptest! {
    #[test]
    fn scanning_and_resolving_is_pure(
        rows in prop::collection::vec(prop::collection::vec(text_strategy(), 4), 1..6)
    ) {
        let grid = Grid::from_rows(rows).expect("generated grid is rectangular");
        let first = resolve(&scan(&grid));
        let second = resolve(&scan(&grid));
        prop_assert_eq!(first, second);
    }
}
