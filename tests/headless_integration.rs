use std::sync::{mpsc, Arc};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use wordmatch::app::{Action, App, AppState};
use wordmatch::runtime::{AppEvent, ChannelEventSource, FixedTicker, Runner};
use wordmatch::words::{BundledList, PoolOrigin};
use wordmatch::{Session, SessionSettings, WordEntry, WordPool};

fn press(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn five_word_app(feedback_ms: u64) -> App {
    let pool = WordPool::new(vec![
        WordEntry::new("apple", "苹果"),
        WordEntry::new("banana", "香蕉"),
        WordEntry::new("cat", "猫"),
        WordEntry::new("dog", "狗"),
        WordEntry::new("egg", "蛋"),
    ]);
    let session = Session::new(Arc::new(pool), SessionSettings::default())
        .with_rng(StdRng::seed_from_u64(2024));
    App::new(
        session,
        PoolOrigin::Bundled(BundledList::Starter),
        Duration::from_millis(feedback_ms),
    )
}

/// Feed one event into the app the way the binary's loop does.
fn dispatch(app: &mut App, ev: AppEvent, tick: Duration) -> Action {
    match ev {
        AppEvent::Tick => {
            app.on_tick(tick).unwrap();
            Action::Continue
        }
        AppEvent::Resize => Action::Continue,
        AppEvent::Key(key) => app.on_key(key).unwrap(),
    }
}

// Headless integration using the runtime + App without a TTY: answers every
// round correctly by key press and lets feedback expire through ticks.
#[test]
fn headless_quiz_flow_completes() {
    let mut app = five_word_app(30);
    let (tx, rx) = mpsc::channel();
    let tick = Duration::from_millis(5);
    let runner = Runner::new(ChannelEventSource::new(rx), FixedTicker::new(tick));

    tx.send(press(KeyCode::Enter)).unwrap();
    dispatch(&mut app, runner.step(), tick);
    assert_eq!(app.state, AppState::Quiz);

    for _ in 0..200u32 {
        if app.state == AppState::Summary {
            break;
        }
        if app.state == AppState::Quiz {
            let pos = app
                .session
                .current_round()
                .and_then(|r| r.correct_position())
                .unwrap();
            let digit = char::from_digit(pos as u32 + 1, 10).unwrap();
            tx.send(press(KeyCode::Char(digit))).unwrap();
        }
        dispatch(&mut app, runner.step(), tick);
    }

    assert_eq!(app.state, AppState::Summary);
    let summary = app.session.summary().unwrap();
    assert_eq!(summary.score, 5);
    assert_eq!(summary.session_limit, 5);
    assert!(summary.is_perfect());
    assert!(app.celebration.is_active);
}

#[test]
fn headless_wrong_answers_show_feedback_then_advance() {
    let mut app = five_word_app(20);
    let tick = Duration::from_millis(10);
    dispatch(&mut app, press(KeyCode::Enter), tick);

    let round = app.session.current_round().unwrap().clone();
    let correct = round.correct_position().unwrap();
    let wrong = (correct + 1) % round.choices.len();
    app.cursor = wrong;
    dispatch(&mut app, press(KeyCode::Enter), tick);

    assert_eq!(app.state, AppState::Feedback);
    let feedback = app.feedback.clone().unwrap();
    assert!(!feedback.verdict.correct);
    assert_eq!(feedback.verdict.answer, round.word.translation);
    assert_eq!(app.session.score(), 0);

    dispatch(&mut app, AppEvent::Tick, tick);
    assert_eq!(app.state, AppState::Feedback);
    dispatch(&mut app, AppEvent::Tick, tick);
    assert_eq!(app.state, AppState::Quiz);
    assert_eq!(app.session.round_index(), 1);
    assert_ne!(app.session.current_round().unwrap().word, round.word);
}

#[test]
fn headless_quit_from_every_screen() {
    let tick = Duration::from_millis(1);
    for steps in 0..3usize {
        let mut app = five_word_app(0);
        for _ in 0..steps {
            dispatch(&mut app, press(KeyCode::Enter), tick);
        }
        assert_eq!(dispatch(&mut app, press(KeyCode::Esc), tick), Action::Quit);
    }
}
