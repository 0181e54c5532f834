#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure rule system: finds sentences on the grid and turns them into behavior.
//!
//! Nothing here is remembered between ticks. Callers scan the grid that is
//! current, resolve the resulting sentences, and throw both away once the
//! tick has been applied.

use rulegrid_core::{BehaviorTable, Conversion, Grid, Noun, Predicate, Sentence, Symbol, Token};

/// Finds every `NOUN IS NOUN` and `NOUN IS PROPERTY` run on the grid.
///
/// Rows are read left to right and columns top to bottom. Overlapping runs
/// are all reported. The result is sorted by the subject's word then the
/// object's word; equal sentences keep the order in which they were found.
#[must_use]
pub fn scan(grid: &Grid) -> Vec<Sentence> {
    let columns = grid.transpose();
    let mut sentences: Vec<Sentence> = grid
        .iter_rows()
        .chain(columns.iter_rows())
        .flat_map(|line| line.windows(3).filter_map(sentence_at))
        .collect();
    sentences.sort_by_key(|sentence| (sentence.subject.name(), sentence.object.name()));
    sentences
}

fn sentence_at(window: &[Symbol]) -> Option<Sentence> {
    let [Symbol::Text(Token::Noun(subject)), Symbol::Text(Token::Is), Symbol::Text(object)] = window
    else {
        return None;
    };
    let object = match object {
        Token::Noun(noun) => Predicate::Noun(*noun),
        Token::Property(property) => Predicate::Property(*property),
        Token::Is => return None,
    };
    Some(Sentence::new(*subject, object))
}

/// Behavior and conversions derived from one tick's sentences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    behaviors: BehaviorTable,
    conversions: Vec<Conversion>,
}

impl Resolution {
    /// Capability flags per noun.
    #[must_use]
    pub const fn behaviors(&self) -> &BehaviorTable {
        &self.behaviors
    }

    /// Conversions in application order, self-conversions included.
    #[must_use]
    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    /// First noun that is both `you` and `win`, which wins the level outright.
    #[must_use]
    pub fn you_and_win(&self) -> Option<Noun> {
        self.behaviors
            .iter()
            .find(|(_, behavior)| behavior.you && behavior.win)
            .map(|(noun, _)| noun)
    }

    /// Consumes the resolution, yielding its parts.
    #[must_use]
    pub fn into_parts(self) -> (BehaviorTable, Vec<Conversion>) {
        (self.behaviors, self.conversions)
    }
}

/// Turns sentences into a behavior table and an ordered conversion list.
///
/// Explicit conversions come first, sorted by the source's word then the
/// target's word, so `baba is key` is applied before `baba is rock`. Every
/// noun that ends up both `hot` and `melt` then gets an implicit conversion
/// to [`Noun::Empty`] in declaration order, so an explicit `NOUN IS NOUN`
/// takes precedence over melting on the same tick.
#[must_use]
pub fn resolve(sentences: &[Sentence]) -> Resolution {
    let mut behaviors = BehaviorTable::default();
    let mut conversions = Vec::new();

    for sentence in sentences {
        match sentence.object {
            Predicate::Property(property) => behaviors.grant(sentence.subject, property),
            Predicate::Noun(target) => conversions.push(Conversion::new(sentence.subject, target)),
        }
    }
    conversions.sort_by_key(|conversion| (conversion.source.name(), conversion.target.name()));

    let melting: Vec<Conversion> = behaviors
        .iter()
        .filter(|(_, behavior)| behavior.hot && behavior.melt)
        .map(|(noun, _)| Conversion::new(noun, Noun::Empty))
        .collect();
    conversions.extend(melting);

    Resolution {
        behaviors,
        conversions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulegrid_core::Property;

    fn grid(layout: &str) -> Grid {
        Grid::parse(layout).expect("valid grid")
    }

    #[test]
    fn sentence_requires_noun_is_then_noun_or_property() {
        let you = Symbol::property(Property::You);
        let baba = Symbol::noun(Noun::Baba);
        assert_eq!(
            sentence_at(&[baba, Symbol::is(), you]),
            Some(Sentence::new(Noun::Baba, Predicate::Property(Property::You)))
        );
        assert_eq!(sentence_at(&[you, Symbol::is(), baba]), None);
        assert_eq!(sentence_at(&[baba, Symbol::is(), Symbol::is()]), None);
        assert_eq!(sentence_at(&[baba, Symbol::Empty, you]), None);
        assert_eq!(
            sentence_at(&[Symbol::entity(Noun::Baba), Symbol::is(), you]),
            None
        );
    }

    #[test]
    fn narrow_grids_have_no_vertical_sentences() {
        let found = scan(&grid("baba is you\nwall is push"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn short_rows_have_no_horizontal_sentences() {
        let found = scan(&grid("baba\nis\nyou"));
        assert_eq!(
            found,
            vec![Sentence::new(Noun::Baba, Predicate::Property(Property::You))]
        );
    }

    #[test]
    fn overlapping_windows_are_read_independently() {
        let found = scan(&grid("baba is rock is win"));
        assert_eq!(
            found,
            vec![
                Sentence::new(Noun::Baba, Predicate::Noun(Noun::Rock)),
                Sentence::new(Noun::Rock, Predicate::Property(Property::Win)),
            ]
        );
    }

    #[test]
    fn implicit_melting_follows_explicit_conversions() {
        let resolution = resolve(&[
            Sentence::new(Noun::Lava, Predicate::Property(Property::Hot)),
            Sentence::new(Noun::Lava, Predicate::Property(Property::Melt)),
            Sentence::new(Noun::Rock, Predicate::Noun(Noun::Flag)),
            Sentence::new(Noun::Baba, Predicate::Noun(Noun::Key)),
        ]);
        assert_eq!(
            resolution.conversions(),
            &[
                Conversion::new(Noun::Baba, Noun::Key),
                Conversion::new(Noun::Rock, Noun::Flag),
                Conversion::new(Noun::Lava, Noun::Empty),
            ]
        );
    }

    #[test]
    fn conversions_are_ordered_by_word() {
        let resolution = resolve(&[
            Sentence::new(Noun::Baba, Predicate::Noun(Noun::Rock)),
            Sentence::new(Noun::Baba, Predicate::Noun(Noun::Key)),
            Sentence::new(Noun::Baba, Predicate::Noun(Noun::Flag)),
            Sentence::new(Noun::Baba, Predicate::Noun(Noun::Empty)),
        ]);
        assert_eq!(
            resolution.conversions(),
            &[
                Conversion::new(Noun::Baba, Noun::Empty),
                Conversion::new(Noun::Baba, Noun::Flag),
                Conversion::new(Noun::Baba, Noun::Key),
                Conversion::new(Noun::Baba, Noun::Rock),
            ]
        );
    }

    #[test]
    fn you_and_win_reports_the_winning_noun() {
        let resolution = resolve(&[
            Sentence::new(Noun::Flag, Predicate::Property(Property::You)),
            Sentence::new(Noun::Flag, Predicate::Property(Property::Win)),
            Sentence::new(Noun::Baba, Predicate::Property(Property::You)),
        ]);
        assert_eq!(resolution.you_and_win(), Some(Noun::Flag));
        assert_eq!(resolve(&[]).you_and_win(), None);
    }
}
