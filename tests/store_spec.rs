use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use speculate2::speculate;
use uuid::Uuid;
use wordle_sessions::config::ConfigError;
use wordle_sessions::game::{GameStatus, GuessRejection};
use wordle_sessions::service::{ServiceError, SessionService};
use wordle_sessions::store::{lock_session, FixedPicker, SessionStore};
use wordle_sessions::words::{Word, WordLists};

fn word(text: &str) -> Word {
    Word::new(text).expect("valid word")
}

fn word_lists() -> Arc<WordLists> {
    let answers = ["alley", "crane", "slate"].map(word);
    let allowed = ["level", "robot", "speed", "audio", "pious", "rusty"].map(word);
    Arc::new(WordLists::from_words(answers, allowed).expect("valid lists"))
}

fn fixed_service(target: &str, max_guesses: u32) -> SessionService {
    SessionService::new(SessionStore::with_picker(
        word_lists(),
        max_guesses,
        FixedPicker(word(target)),
    )
    .expect("valid store"))
}

speculate! {
    before {
        let store = SessionStore::new(word_lists(), 6).expect("valid store");
    }

    describe "construction" {
        it "refuses a zero guess limit" {
            assert!(matches!(
                SessionStore::new(word_lists(), 0),
                Err(ConfigError::InvalidMaxGuesses)
            ));
            assert!(matches!(
                SessionStore::with_picker(word_lists(), 0, FixedPicker(word("alley"))),
                Err(ConfigError::InvalidMaxGuesses)
            ));
        }

        it "gives a one-guess game exactly one chance" {
            let service = fixed_service("alley", 1);
            let id = service.create().session_id;

            let state = service.guess(id, "crane").expect("first guess accepted");
            assert_eq!(state.chances_left, 0);
            assert!(state.lost);
            assert_eq!(service.guess(id, "alley"), Err(ServiceError::Rejected(GuessRejection::GameOver)));
        }
    }

    describe "create" {
        it "starts every session with a full set of chances and no guesses" {
            let (id, session) = store.create();
            let game = lock_session(&session);

            assert_eq!(game.id(), id);
            assert_eq!(game.status(), GameStatus::InProgress);
            assert_eq!(game.state().chances_left, 6);
            assert!(game.state().guesses.is_empty());
        }

        it "draws targets from the answer set" {
            for _ in 0..50 {
                let (_, session) = store.create();
                let target = lock_session(&session).target().clone();
                assert!(store.words().answers().contains(&target));
            }
        }

        it "generates pairwise distinct ids" {
            let ids: HashSet<Uuid> = (0..500).map(|_| store.create().0).collect();
            assert_eq!(ids.len(), 500);
            assert_eq!(store.len(), 500);
        }

        it "generates distinct ids under concurrent creation" {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    thread::spawn(move || (0..100).map(|_| store.create().0).collect::<Vec<_>>())
                })
                .collect();

            let ids: HashSet<Uuid> = handles
                .into_iter()
                .flat_map(|h| h.join().expect("creator thread panicked"))
                .collect();

            assert_eq!(ids.len(), 800);
            assert_eq!(store.len(), 800);
        }
    }

    describe "get" {
        it "returns the session that was created" {
            let (id, _) = store.create();
            let found = store.get(id).expect("session exists");
            assert_eq!(lock_session(&found).id(), id);
        }

        it "returns None for an unknown id without inserting anything" {
            store.create();
            assert!(store.get(Uuid::new_v4()).is_none());
            assert_eq!(store.len(), 1);
        }
    }

    describe "service lookups" {
        it "reports NotFound for unknown and malformed ids" {
            let service = SessionService::new(store.clone());

            assert_eq!(service.state(Uuid::new_v4()), Err(ServiceError::NotFound));
            assert_eq!(service.state_by_key("not-a-uuid"), Err(ServiceError::NotFound));
            assert_eq!(
                service.guess_by_key("not-a-uuid", "crane"),
                Err(ServiceError::NotFound)
            );
            assert!(store.is_empty());
        }
    }

    describe "concurrent guesses on one session" {
        it "never accepts more than max_guesses" {
            let service = fixed_service("alley", 6);
            let id = service.create().session_id;

            let handles: Vec<_> = (0..24)
                .map(|_| {
                    let service = service.clone();
                    thread::spawn(move || service.guess(id, "crane"))
                })
                .collect();
            let results: Vec<_> = handles
                .into_iter()
                .map(|h| h.join().expect("guess thread panicked"))
                .collect();

            let accepted = results.iter().filter(|r| r.is_ok()).count();
            let game_over = results
                .iter()
                .filter(|r| **r == Err(ServiceError::Rejected(GuessRejection::GameOver)))
                .count();

            assert_eq!(accepted, 6);
            assert_eq!(game_over, 18);

            let state = service.state(id).expect("session exists");
            assert_eq!(state.guesses.len(), 6);
            assert!(state.lost);
        }

        it "accepts exactly one winning guess" {
            let service = fixed_service("alley", 6);
            let id = service.create().session_id;

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let service = service.clone();
                    thread::spawn(move || service.guess(id, "alley"))
                })
                .collect();
            let results: Vec<_> = handles
                .into_iter()
                .map(|h| h.join().expect("guess thread panicked"))
                .collect();

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert_eq!(
                results
                    .iter()
                    .filter(|r| **r == Err(ServiceError::Rejected(GuessRejection::AlreadyWon)))
                    .count(),
                7
            );
            assert_eq!(service.state(id).expect("session exists").guesses.len(), 1);
        }

        it "keeps sessions independent" {
            let service = fixed_service("alley", 6);
            let first = service.create().session_id;
            let second = service.create().session_id;

            service.guess(first, "alley").expect("winning guess");

            let other = service.state(second).expect("session exists");
            assert!(!other.win);
            assert!(other.guesses.is_empty());
        }
    }
}
