use snake_arcade_core::{Cell, Event};
use snake_arcade_system_high_score::{
    HighScore, HighScoreStore, MemoryHighScoreStore, StoreError,
};

#[derive(Debug, Default)]
struct BrokenStore {
    save_attempts: u32,
}

impl HighScoreStore for BrokenStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Err(StoreError::Unparsable {
            value: "NaN".to_owned(),
        })
    }

    fn save(&mut self, _score: u32) -> Result<(), StoreError> {
        self.save_attempts += 1;
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

#[test]
fn loads_the_stored_record_once() {
    let high_score = HighScore::new(MemoryHighScoreStore::with_value(12));
    assert_eq!(high_score.record(), 12);
}

#[test]
fn saves_only_when_the_record_is_beaten() {
    let mut high_score = HighScore::new(MemoryHighScoreStore::with_value(7));

    assert_eq!(high_score.handle(&[Event::ScoreChanged { length: 7 }]), None);
    assert_eq!(
        high_score.handle(&[Event::FoodEaten {
            cell: Cell::new(1, 1)
        }]),
        None
    );
    assert_eq!(high_score.store().value(), Some(7));

    assert_eq!(
        high_score.handle(&[
            Event::ScoreChanged { length: 8 },
            Event::ScoreChanged { length: 11 },
        ]),
        Some(11)
    );
    assert_eq!(high_score.record(), 11);
    assert_eq!(high_score.store().value(), Some(11));
}

#[test]
fn empty_store_starts_at_zero() {
    let mut high_score = HighScore::new(MemoryHighScoreStore::default());
    assert_eq!(high_score.record(), 0);
    assert_eq!(high_score.handle(&[Event::ScoreChanged { length: 4 }]), Some(4));
}

#[test]
fn failing_store_falls_back_to_memory() {
    let mut high_score = HighScore::new(BrokenStore::default());
    assert_eq!(high_score.record(), 0);

    assert_eq!(high_score.handle(&[Event::ScoreChanged { length: 5 }]), Some(5));
    assert_eq!(high_score.record(), 5);
    assert_eq!(high_score.store().save_attempts, 1);
}
