//! Session phases and the dispatcher that runs a game while it is being played.

use std::time::Duration;

use bevy::math::Vec3;
use log::{debug, info, warn};
use thiserror::Error;

use super::{
    apple::Apple,
    camera::{CameraMode, CameraRig},
    collision::{check_apple_collision, Arena},
    input::{GameKey, InputEvent, TapTarget},
    scheduler::{InputKind, Job, Scheduler},
    snake::Snake,
    Difficulty, MapKind, Rules,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Phase {
    #[default]
    Home,
    MapSelect,
    DifficultySelect,
    Playing,
    GameOver,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Clip {
    AppleEaten,
    Crash,
}

/// Notifications for the host, renderer and audio. Drained with [`Session::drain_events`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum GameEvent {
    SessionStarted { map: MapKind, difficulty: Difficulty },
    AppleEaten { apples: usize, length: usize },
    AppleMoved(Vec3),
    PlaySound(Clip),
    ToggleMorph { morphed: bool },
    GameOver { length: usize, apples: usize },
}

#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum SessionError {
    #[error("cannot {action} while in {from:?}")]
    InvalidTransition { from: Phase, action: &'static str },
}

/// Everything that exists only while a game is on screen.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    map: MapKind,
    difficulty: Difficulty,
    arena: Arena,
    snake: Snake,
    apple: Apple,
    camera: CameraRig,
    apples_eaten: usize,
    cooldown: u32,
    morphed: bool,
    camera_warned: bool,
}

impl SnakeGame {
    pub fn new(rules: &Rules, map: MapKind, difficulty: Difficulty) -> Self {
        let snake = Snake::new(rules.snake_start, rules.initial_direction);
        let apple_start = Vec3::new(rules.apple_start.x, rules.apple_y, rules.apple_start.z);
        let apple = Apple::new(apple_start, rules.apple_spawn_extent, rules.seed);
        let camera = CameraRig::new(CameraMode::from(difficulty), rules, &snake);
        Self {
            map,
            difficulty,
            arena: Arena::new(rules.arena_half_extent),
            snake,
            apple,
            camera,
            apples_eaten: 0,
            cooldown: 0,
            morphed: false,
            camera_warned: false,
        }
    }

    pub fn map(&self) -> MapKind {
        self.map
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn apples_eaten(&self) -> usize {
        self.apples_eaten
    }

    pub fn is_morphed(&self) -> bool {
        self.morphed
    }
}

/// Home -> MapSelect -> DifficultySelect -> Playing -> GameOver -> Home.
///
/// While `Playing`, the scheduler moves the snake and checks the apple on their own
/// cadences and routes queued input to the snake and (in `OrbitZoom`) the camera.
/// Leaving `Playing` for any reason unregisters every task and drops queued input.
#[derive(Debug)]
pub struct Session {
    rules: Rules,
    phase: Phase,
    pending_map: Option<MapKind>,
    game: Option<SnakeGame>,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            phase: Phase::Home,
            pending_map: None,
            game: None,
            scheduler: Scheduler::new(),
            events: Vec::with_capacity(16),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game(&self) -> Option<&SnakeGame> {
        self.game.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn open_map_select(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::Home], "open map select")?;
        self.phase = Phase::MapSelect;
        Ok(())
    }

    pub fn select_map(&mut self, map: MapKind) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::MapSelect], "select a map")?;
        self.pending_map = Some(map);
        self.phase = Phase::DifficultySelect;
        Ok(())
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.expect_phase(&[Phase::DifficultySelect], "select a difficulty")?;
        let map = self.pending_map.take().unwrap_or_default();
        self.begin_game(map, difficulty);
        Ok(())
    }

    /// Skip the menus and start playing straight away.
    pub fn start(&mut self, map: MapKind, difficulty: Difficulty) -> Result<(), SessionError> {
        self.expect_phase(
            &[Phase::Home, Phase::MapSelect, Phase::DifficultySelect],
            "start a game",
        )?;
        self.pending_map = None;
        self.begin_game(map, difficulty);
        Ok(())
    }

    /// Always allowed. Tears down the game and every scheduled task.
    pub fn return_home(&mut self) {
        self.scheduler.clear();
        self.game = None;
        self.pending_map = None;
        self.phase = Phase::Home;
    }

    /// Queue input for the next [`Session::update`]. Dropped unless playing.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.phase == Phase::Playing {
            self.scheduler.push_input(event);
        }
    }

    /// One frame: handle queued input, run every periodic job that came due during `dt`,
    /// then re-aim the chase camera.
    pub fn update(&mut self, dt: Duration) {
        if self.phase != Phase::Playing {
            return;
        }
        while let Some((event, jobs)) = self.scheduler.next_input() {
            for job in jobs {
                self.run_input_job(job, event);
            }
        }
        for job in self.scheduler.advance(dt) {
            self.run_periodic_job(job);
            if self.phase != Phase::Playing {
                return;
            }
        }
        self.follow_camera();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn expect_phase(&self, allowed: &[Phase], action: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.phase,
                action,
            })
        }
    }

    fn begin_game(&mut self, map: MapKind, difficulty: Difficulty) {
        let game = SnakeGame::new(&self.rules, map, difficulty);
        self.scheduler.clear();
        self.scheduler.every(self.rules.move_interval, Job::MoveSnake);
        self.scheduler.every(self.rules.apple_check_interval, Job::CheckApple);
        self.scheduler.on_input(InputKind::Key, Job::SteerSnake);
        if game.camera.mode() == CameraMode::OrbitZoom {
            self.scheduler.on_input(InputKind::Key, Job::SteerCamera);
        }
        self.scheduler.on_input(InputKind::Tap, Job::ToggleMorph);
        self.game = Some(game);
        self.phase = Phase::Playing;
        info!("Starting {difficulty} game on the {map} map");
        self.events.push(GameEvent::SessionStarted { map, difficulty });
    }

    fn end_game(&mut self) {
        self.scheduler.clear();
        self.phase = Phase::GameOver;
        let (length, apples) = self
            .game
            .as_ref()
            .map_or((0, 0), |game| (game.snake.length(), game.apples_eaten));
        self.events.push(GameEvent::PlaySound(Clip::Crash));
        self.events.push(GameEvent::GameOver { length, apples });
    }

    fn run_periodic_job(&mut self, job: Job) {
        match job {
            Job::MoveSnake => self.move_snake(),
            Job::CheckApple => self.check_apple(),
            _ => debug!("{job:?} is not a periodic job"),
        }
    }

    fn run_input_job(&mut self, job: Job, event: InputEvent) {
        let Some(game) = self.game.as_mut() else { return };
        match (job, event) {
            (Job::SteerSnake, InputEvent::Key(GameKey::TurnLeft)) => game.snake.turn_left(),
            (Job::SteerSnake, InputEvent::Key(GameKey::TurnRight)) => game.snake.turn_right(),
            (Job::SteerCamera, InputEvent::Key(key)) => {
                game.camera.handle_key(key);
            }
            (Job::ToggleMorph, InputEvent::Tap(TapTarget::Apple)) => {
                game.morphed = !game.morphed;
                self.events.push(GameEvent::ToggleMorph { morphed: game.morphed });
            }
            _ => {}
        }
    }

    fn move_snake(&mut self) {
        let result = match self.game.as_mut() {
            Some(game) => game.snake.move_snake(&game.arena),
            None => return,
        };
        if let Err(violation) = result {
            info!("Game Over: {violation}");
            self.end_game();
        }
    }

    fn check_apple(&mut self) {
        let Some(game) = self.game.as_mut() else { return };
        if game.cooldown > 0 {
            game.cooldown -= 1;
            return;
        }
        let head = game.snake.head_location();
        if !check_apple_collision(head, game.apple.location(), self.rules.eat_threshold) {
            return;
        }
        if let Some(eaten) = game.apple.on_eaten(&mut game.snake, self.rules.growth_per_apple) {
            game.apples_eaten += 1;
            game.cooldown = self.rules.apple_cooldown_checks;
            self.events.push(GameEvent::AppleEaten {
                apples: game.apples_eaten,
                length: game.snake.length(),
            });
            self.events.push(GameEvent::PlaySound(Clip::AppleEaten));
            self.events.push(GameEvent::AppleMoved(eaten.new_position));
        }
    }

    fn follow_camera(&mut self) {
        let Some(game) = self.game.as_mut() else { return };
        match game.camera.follow(&game.snake) {
            Ok(()) => game.camera_warned = false,
            Err(err) if !game.camera_warned => {
                warn!("{err}");
                game.camera_warned = true;
            }
            Err(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn playing(rules: Rules, difficulty: Difficulty) -> Session {
        let mut session = Session::new(rules);
        session.start(MapKind::Ground, difficulty).unwrap();
        session.drain_events();
        session
    }

    #[test]
    fn test_menu_flow() {
        let mut session = Session::new(Rules::default());
        assert_eq!(session.phase(), Phase::Home);
        assert!(session.select_map(MapKind::Ocean).is_err());
        session.open_map_select().unwrap();
        session.select_map(MapKind::Ocean).unwrap();
        assert_eq!(session.phase(), Phase::DifficultySelect);
        session.select_difficulty(Difficulty::Hard).unwrap();
        assert_eq!(session.phase(), Phase::Playing);

        let game = session.game().unwrap();
        assert_eq!(game.map(), MapKind::Ocean);
        assert_eq!(game.camera().mode(), CameraMode::FirstPersonFollow);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::SessionStarted { map: MapKind::Ocean, difficulty: Difficulty::Hard }]
        );
        assert_eq!(
            session.open_map_select(),
            Err(SessionError::InvalidTransition { from: Phase::Playing, action: "open map select" })
        );
    }

    #[test]
    fn test_moves_on_cadence() {
        let mut session = playing(Rules::default(), Difficulty::Easy);
        session.update(ms(100));
        let head = session.game().unwrap().snake().head_location();
        assert!(head.abs_diff_eq(Vec3::new(0.0, -0.4, 0.05), 1e-5));
    }

    #[test]
    fn test_apple_eaten_grows_seven_and_sounds_once() {
        let rules = Rules {
            snake_start: Vec3::new(1.9, -0.4, 1.0),
            apple_start: Vec3::new(2.0, -0.4, 1.0),
            seed: Some(17),
            ..Rules::default()
        };
        let mut session = playing(rules, Difficulty::Easy);
        session.update(ms(100));

        let game = session.game().unwrap();
        assert_eq!(game.snake().length(), 8);
        assert_eq!(game.apples_eaten(), 1);
        assert!(!game.apple().is_eaten());
        let apple = game.apple().location();
        assert!(apple.x.abs() <= 4.0 && apple.z.abs() <= 4.0);

        let events = session.drain_events();
        let sounds = events
            .iter()
            .filter(|e| **e == GameEvent::PlaySound(Clip::AppleEaten))
            .count();
        assert_eq!(sounds, 1);
        assert!(events.contains(&GameEvent::AppleEaten { apples: 1, length: 8 }));
        assert!(events.contains(&GameEvent::AppleMoved(apple)));
    }

    fn eating_rules(cooldown_checks: u32) -> Rules {
        Rules {
            snake_start: Vec3::new(1.9, -0.4, 1.0),
            apple_start: Vec3::new(2.0, -0.4, 1.0),
            apple_cooldown_checks: cooldown_checks,
            seed: Some(5),
            ..Rules::default()
        }
    }

    /// Puts the apple back under the head so the next check overlaps it.
    fn apple_onto_head(session: &mut Session) {
        let game = session.game.as_mut().unwrap();
        let head = game.snake.head_location();
        game.apple.place(head);
    }

    fn eat_sounds(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| **e == GameEvent::PlaySound(Clip::AppleEaten))
            .count()
    }

    #[test]
    fn test_cooldown_blocks_second_eat() {
        let mut session = playing(eating_rules(3), Difficulty::Easy);
        session.update(ms(100));
        assert_eq!(session.game().unwrap().apples_eaten(), 1);
        assert_eq!(session.game().unwrap().cooldown, 3);
        assert_eq!(eat_sounds(&session.drain_events()), 1);

        for remaining in [2, 1, 0] {
            apple_onto_head(&mut session);
            session.update(ms(100));
            let game = session.game().unwrap();
            assert_eq!(game.apples_eaten(), 1);
            assert_eq!(game.cooldown, remaining);
            assert_eq!(eat_sounds(&session.drain_events()), 0);
        }

        // Cooldown spent: the overlap counts again.
        apple_onto_head(&mut session);
        session.update(ms(100));
        assert_eq!(session.game().unwrap().apples_eaten(), 2);
        assert_eq!(eat_sounds(&session.drain_events()), 1);
    }

    #[test]
    fn test_no_cooldown_rearms_on_next_check() {
        let mut session = playing(eating_rules(0), Difficulty::Easy);
        session.update(ms(100));
        assert_eq!(session.game().unwrap().apples_eaten(), 1);
        assert_eq!(eat_sounds(&session.drain_events()), 1);

        apple_onto_head(&mut session);
        session.update(ms(100));
        let game = session.game().unwrap();
        assert_eq!(game.apples_eaten(), 2);
        assert_eq!(game.snake().length(), 15);
        assert!(!game.apple().is_eaten());
        assert_eq!(eat_sounds(&session.drain_events()), 1);
    }

    #[test]
    fn test_wall_hit_ends_game_and_cancels_tasks() {
        let rules = Rules {
            snake_start: Vec3::new(0.0, -0.4, 4.95),
            ..Rules::default()
        };
        let mut session = playing(rules, Difficulty::Easy);
        session.update(ms(200));
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(session.scheduler().is_idle());

        let events = session.drain_events();
        assert!(events.contains(&GameEvent::PlaySound(Clip::Crash)));
        assert!(events.contains(&GameEvent::GameOver { length: 1, apples: 0 }));

        // Nothing runs after game over.
        let head = session.game().unwrap().snake().head_location();
        assert!(head.z <= 5.0);
        session.push_input(InputEvent::Key(GameKey::TurnLeft));
        session.update(ms(1000));
        assert_eq!(session.game().unwrap().snake().head_location(), head);
        assert!(session.drain_events().is_empty());

        session.return_home();
        assert_eq!(session.phase(), Phase::Home);
        assert!(session.game().is_none());
    }

    #[test]
    fn test_turn_applies_to_next_move() {
        let mut session = playing(Rules::default(), Difficulty::Easy);
        session.push_input(InputEvent::Key(GameKey::TurnLeft));
        session.update(ms(20));
        let game = session.game().unwrap();
        assert!(game.snake().direction().abs_diff_eq(Vec3::new(0.01, 0.0, 0.0), 1e-6));
        assert!(game.snake().head_location().abs_diff_eq(Vec3::new(0.01, -0.4, 0.0), 1e-6));
    }

    #[test]
    fn test_camera_keys_only_in_easy() {
        let mut easy = playing(Rules::default(), Difficulty::Easy);
        let before = easy.game().unwrap().camera().transform().translation;
        easy.push_input(InputEvent::Key(GameKey::CameraRight));
        easy.update(Duration::ZERO);
        let after = easy.game().unwrap().camera().transform().translation;
        assert!(after.abs_diff_eq(before + Vec3::new(0.1, 0.0, 0.0), 1e-6));

        let mut hard = playing(Rules::default(), Difficulty::Hard);
        hard.push_input(InputEvent::Key(GameKey::CameraRight));
        hard.update(Duration::ZERO);
        let head = hard.game().unwrap().snake().head_location();
        let expected = head + Vec3::new(0.0, 0.0, 0.01) + Vec3::new(0.0, 0.5, 1.5);
        let eye = hard.game().unwrap().camera().transform().translation;
        assert!(eye.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_chase_camera_follows_every_update() {
        let mut session = playing(Rules::default(), Difficulty::Hard);
        session.update(ms(60));
        let game = session.game().unwrap();
        let expected =
            game.snake().head_location() + game.snake().direction() + Vec3::new(0.0, 0.5, 1.5);
        assert!(game.camera().transform().translation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_tap_toggles_morph() {
        let mut session = playing(Rules::default(), Difficulty::Easy);
        session.push_input(InputEvent::Tap(TapTarget::Apple));
        session.update(Duration::ZERO);
        assert!(session.game().unwrap().is_morphed());
        session.push_input(InputEvent::Tap(TapTarget::Apple));
        session.update(Duration::ZERO);
        assert!(!session.game().unwrap().is_morphed());
        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::ToggleMorph { morphed: true },
                GameEvent::ToggleMorph { morphed: false },
            ]
        );
    }

    #[test]
    fn test_return_home_drops_pending_input() {
        let mut session = playing(Rules::default(), Difficulty::Easy);
        session.push_input(InputEvent::Key(GameKey::TurnLeft));
        session.return_home();
        assert!(session.scheduler().is_idle());
        assert_eq!(session.scheduler().pending_input(), 0);
        session.start(MapKind::Ground, Difficulty::Easy).unwrap();
        let dir = session.game().unwrap().snake().direction();
        assert!(dir.abs_diff_eq(Vec3::new(0.0, 0.0, 0.01), 1e-6));
    }
}
