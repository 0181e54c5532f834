use rulegrid_core::{Command, Direction, Event, Grid, Noun, PlayState, Symbol, WinCause};
use rulegrid_world::{self as world, query, World};

fn level(layout: &str) -> Grid {
    Grid::parse(layout).expect("valid level")
}

fn step(world: &mut World, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Step { direction }, &mut events);
    events
}

fn command(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn reach_the_flag() -> Grid {
    level(
        "baba is you . .
         flag is win . .
         . . . Baba Flag",
    )
}

fn lose_by_conversion() -> Grid {
    level(
        "baba is you . .
         baba is . . .
         . . rock . .
         . . Baba . .",
    )
}

fn already_won() -> Grid {
    level(
        "baba is you
         baba is win
         . . .",
    )
}

fn walkable() -> Grid {
    level(
        "baba is you
         . Baba .",
    )
}

#[test]
fn walking_into_a_win_object_wins_the_level() {
    let mut world = World::new(vec![reach_the_flag()]).expect("world");
    let before = query::grid(&world).clone();

    let events = step(&mut world, Direction::Right);

    assert_eq!(
        events,
        vec![Event::Won {
            cause: WinCause::ReachedWin {
                mover: Noun::Baba,
                target: Noun::Flag,
            },
        }]
    );
    assert_eq!(query::play_state(&world), PlayState::Won);
    assert_eq!(query::grid(&world), &before);
    assert_eq!(query::history(&world), &[Direction::Right]);
}

#[test]
fn rule_formed_by_a_move_takes_effect_in_the_same_step() {
    let mut world = World::new(vec![level(
        "baba is you
         . . .
         baba is .
         . . win
         . . Baba",
    )])
    .expect("world");

    let events = step(&mut world, Direction::Up);

    assert_eq!(
        events,
        vec![
            Event::Moved {
                direction: Direction::Up
            },
            Event::Won {
                cause: WinCause::YouAreWin { noun: Noun::Baba },
            },
        ]
    );
}

#[test]
fn converting_away_every_you_object_loses() {
    let mut world = World::new(vec![lose_by_conversion()]).expect("world");

    let events = step(&mut world, Direction::Up);

    assert_eq!(
        events,
        vec![
            Event::Moved {
                direction: Direction::Up
            },
            Event::ObjectsConverted { count: 1 },
            Event::Lost,
        ]
    );
    assert_eq!(query::play_state(&world), PlayState::Lost);
    assert_eq!(
        query::grid(&world).get(2, 2),
        Some(Symbol::Entity {
            kind: Noun::Rock,
            facing: Direction::Up,
        })
    );

    let ignored = step(&mut world, Direction::Down);
    assert_eq!(
        ignored,
        vec![Event::CommandIgnored {
            state: PlayState::Lost
        }]
    );
}

#[test]
fn undo_recovers_from_a_loss() {
    let fresh = World::new(vec![lose_by_conversion()]).expect("world");
    let mut world = fresh.clone();
    let _ = step(&mut world, Direction::Up);

    let events = command(&mut world, Command::Undo);

    assert_eq!(events, vec![Event::HistoryRewound { remaining: 0 }]);
    assert_eq!(query::play_state(&world), PlayState::Playing);
    assert_eq!(query::grid(&world), query::grid(&fresh));
    assert!(query::history(&world).is_empty());
}

#[test]
fn undo_after_a_win_resumes_play() {
    let fresh = World::new(vec![reach_the_flag()]).expect("world");
    let mut world = fresh.clone();
    let _ = step(&mut world, Direction::Right);

    let _ = command(&mut world, Command::Undo);

    assert_eq!(query::play_state(&world), PlayState::Playing);
    assert_eq!(query::grid(&world), query::grid(&fresh));
}

#[test]
fn undo_with_empty_history_restores_the_settled_layout() {
    let fresh = World::new(vec![walkable()]).expect("world");
    let mut world = fresh.clone();

    let events = command(&mut world, Command::Undo);

    assert_eq!(events, vec![Event::HistoryRewound { remaining: 0 }]);
    assert_eq!(query::grid(&world), query::grid(&fresh));
}

#[test]
fn advance_loads_the_next_level_with_fresh_history() {
    let mut world = World::new(vec![already_won(), walkable()]).expect("world");
    assert_eq!(query::play_state(&world), PlayState::Won);

    let events = command(&mut world, Command::Advance);

    assert_eq!(events, vec![Event::LevelLoaded { level: 1 }]);
    assert_eq!(query::level_index(&world), 1);
    assert_eq!(query::level_count(&world), 2);
    assert_eq!(query::play_state(&world), PlayState::Playing);
    assert!(query::history(&world).is_empty());
    assert_eq!(query::grid(&world), &walkable());
}

#[test]
fn advancing_past_the_last_level_completes_the_campaign() {
    let mut world = World::new(vec![already_won()]).expect("world");

    let events = command(&mut world, Command::Advance);
    assert_eq!(events, vec![Event::CampaignComplete]);
    assert_eq!(query::play_state(&world), PlayState::LevelComplete);

    for ignored in [
        Command::Step {
            direction: Direction::Left,
        },
        Command::Settle,
        Command::Undo,
        Command::Advance,
    ] {
        assert_eq!(
            command(&mut world, ignored),
            vec![Event::CommandIgnored {
                state: PlayState::LevelComplete
            }]
        );
    }
}

#[test]
fn starting_level_can_be_chosen() {
    let world = World::starting_at(vec![already_won(), walkable()], 1).expect("world");
    assert_eq!(query::level_index(&world), 1);
    assert_eq!(query::play_state(&world), PlayState::Playing);
}

#[test]
fn active_sentences_reflect_the_current_grid() {
    let world = World::new(vec![reach_the_flag()]).expect("world");
    let rules: Vec<String> = query::active_sentences(&world)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(rules, vec!["baba is you", "flag is win"]);
}
